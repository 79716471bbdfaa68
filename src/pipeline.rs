// WHY: end-to-end run - validate inputs, read both sides, compare, write every output
// Reading goes through the ParagraphSource port and highlighting through HighlightSink

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::config::CompareConfig;
use crate::document::{ensure_supported, DocumentRole, HighlightSink, ParagraphSource};
use crate::engine::{Comparison, DiffEngine};
use crate::highlight::HighlightedDocument;
use crate::output::{
    default_csv_path, default_highlight_path, ensure_parent_dir, write_csv_report, write_json,
};

/// Paths for one comparison run
#[derive(Debug, Clone)]
pub struct DiffJob {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Highlighted revised document
    pub highlight_out: PathBuf,
    pub csv_out: PathBuf,
    /// Full comparison dump, when requested
    pub json_out: Option<PathBuf>,
}

impl DiffJob {
    /// Job with outputs placed next to the target document
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            highlight_out: default_highlight_path(&target),
            csv_out: default_csv_path(&target),
            json_out: None,
            source,
            target,
        }
    }

    pub fn with_highlight_out(mut self, path: impl Into<PathBuf>) -> Self {
        self.highlight_out = path.into();
        self
    }

    pub fn with_csv_out(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_out = path.into();
        self
    }

    pub fn with_json_out(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_out = Some(path.into());
        self
    }
}

/// Timing of a finished run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunTiming {
    pub comparison_time_ms: u64,
    pub total_time_ms: u64,
}

fn check_input(path: &Path, role: DocumentRole) -> Result<()> {
    if !path.exists() {
        bail!("{} does not exist: {}", role.as_str(), path.display());
    }
    ensure_supported(path, role)?;
    Ok(())
}

/// Compare two documents and write the highlighted document, CSV report and
/// optional JSON dump. Inputs and output formats are checked before anything
/// is read.
pub async fn run_diff<S, K>(
    job: &DiffJob,
    config: &CompareConfig,
    source: &S,
    sink: &K,
) -> Result<Comparison>
where
    S: ParagraphSource + Sync,
    K: HighlightSink + Sync,
{
    run_diff_timed(job, config, source, sink).await.map(|(comparison, _)| comparison)
}

/// `run_diff` that also reports where the time went
pub async fn run_diff_timed<S, K>(
    job: &DiffJob,
    config: &CompareConfig,
    source: &S,
    sink: &K,
) -> Result<(Comparison, RunTiming)>
where
    S: ParagraphSource + Sync,
    K: HighlightSink + Sync,
{
    let start_time = Instant::now();

    check_input(&job.source, DocumentRole::Source)?;
    check_input(&job.target, DocumentRole::Target)?;
    ensure_supported(&job.highlight_out, DocumentRole::HighlightOutput)?;

    info!("Comparing {} against {}", job.source.display(), job.target.display());

    let (paragraphs_a, paragraphs_b) = futures::try_join!(
        source.read_paragraphs(&job.source),
        source.read_paragraphs(&job.target)
    )?;

    let comparison_start = Instant::now();
    let engine = DiffEngine::new(config.clone());
    let comparison = engine.compare(&paragraphs_a, &paragraphs_b);
    let comparison_time_ms = comparison_start.elapsed().as_millis() as u64;

    ensure_parent_dir(&job.highlight_out).await?;
    ensure_parent_dir(&job.csv_out).await?;
    if let Some(json_out) = &job.json_out {
        ensure_parent_dir(json_out).await?;
    }

    let document = HighlightedDocument::from_operations(&comparison.operations);
    sink.write_highlighted(&document, &job.highlight_out).await?;
    write_csv_report(&comparison.rows, &job.csv_out).await?;
    if let Some(json_out) = &job.json_out {
        write_json(&comparison, json_out).await?;
    }

    let timing = RunTiming {
        comparison_time_ms,
        total_time_ms: start_time.elapsed().as_millis() as u64,
    };
    info!(
        "Diff complete: {} changes in {}ms (comparison {}ms)",
        comparison.summary.total_changes(),
        timing.total_time_ms,
        timing.comparison_time_ms
    );

    Ok((comparison, timing))
}
