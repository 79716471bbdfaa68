// WHY: machine-readable summary of one CLI run, written next to the reports on request

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::engine::Comparison;
use crate::report::ChangeSummary;

/// Run status as recorded in the stats file
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    ConfigError,
    CapabilityUnavailable,
    Failed,
}

/// Per-run statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Original document path
    pub source: String,
    /// Revised document path
    pub target: String,
    pub sentences_original: usize,
    pub sentences_revised: usize,
    pub summary: ChangeSummary,
    /// Rows in the tabular report (non-equal operations)
    pub rows_written: usize,
    /// Segmentation + alignment time in milliseconds (subset of total_time_ms)
    pub comparison_time_ms: u64,
    /// Wall time including reading and writing
    pub total_time_ms: u64,
    pub status: RunStatus,
    /// Error message if the run failed
    pub error: Option<String>,
}

impl RunStats {
    pub fn new(source: &Path, target: &Path) -> Self {
        Self {
            source: source.display().to_string(),
            target: target.display().to_string(),
            sentences_original: 0,
            sentences_revised: 0,
            summary: ChangeSummary::default(),
            rows_written: 0,
            comparison_time_ms: 0,
            total_time_ms: 0,
            status: RunStatus::Failed,
            error: None,
        }
    }

    /// Fill counts from a finished comparison and mark the run successful
    pub fn record_comparison(&mut self, comparison: &Comparison) {
        self.sentences_original = comparison.sentences_original;
        self.sentences_revised = comparison.sentences_revised;
        self.summary = comparison.summary;
        self.rows_written = comparison.rows.len();
        self.status = RunStatus::Success;
        self.error = None;
    }

    pub fn record_failure(&mut self, status: RunStatus, error: impl ToString) {
        self.status = status;
        self.error = Some(error.to_string());
    }
}

/// Write run stats as pretty JSON
pub async fn write_run_stats(stats: &RunStats, path: &Path) -> Result<()> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    let json = serde_json::to_string_pretty(stats)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
