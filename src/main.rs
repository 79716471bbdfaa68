use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn, Level};

use seamdiff::{
    run_diff_timed, write_run_stats, CompareConfig, Comparison, DiffError, DiffJob, IgnoreSet,
    MarkupSink, PlainTextSource, RunStats, RunStatus, RunTiming, DEFAULT_THRESHOLD,
};

#[derive(Parser, Debug)]
#[command(name = "seamdiff")]
#[command(about = "Compare two documents sentence by sentence with word-level highlighting")]
#[command(version)]
struct Args {
    /// Original document (UTF-8 text, one paragraph per line)
    source: PathBuf,

    /// Revised document
    target: PathBuf,

    /// Highlighted document output [default: <target stem>_diff.txt]
    #[arg(long)]
    out: Option<PathBuf>,

    /// CSV report output [default: <target stem>_diff.csv]
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also dump every operation as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Comma separated ignore options (punct, space)
    #[arg(long, default_value = "")]
    ignore: String,

    /// Similarity threshold (0-1) for classifying replacements
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Stats output file path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Suppress console progress spinner
    #[arg(long)]
    no_progress: bool,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn job(&self) -> DiffJob {
        let mut job = DiffJob::new(&self.source, &self.target);
        if let Some(out) = &self.out {
            job = job.with_highlight_out(out);
        }
        if let Some(csv) = &self.csv {
            job = job.with_csv_out(csv);
        }
        if let Some(json) = &self.json {
            job = job.with_json_out(json);
        }
        job
    }
}

fn build_config(args: &Args) -> Result<CompareConfig, DiffError> {
    let ignore = IgnoreSet::parse_list(&args.ignore)?;
    CompareConfig::new(ignore, args.threshold)
}

fn spinner(enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message("Comparing documents");
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

async fn execute(args: &Args) -> Result<(Comparison, RunTiming, DiffJob)> {
    // WHY: configuration errors must surface before any file is touched
    let config = build_config(args)?;
    let job = args.job();

    let progress = spinner(!args.no_progress);
    let result = run_diff_timed(&job, &config, &PlainTextSource::default(), &MarkupSink).await;
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let (comparison, timing) = result?;
    Ok((comparison, timing, job))
}

fn exit_status(err: &anyhow::Error) -> (RunStatus, u8) {
    match err.downcast_ref::<DiffError>() {
        Some(DiffError::CapabilityUnavailable { .. }) => (RunStatus::CapabilityUnavailable, 2),
        Some(_) => (RunStatus::ConfigError, 1),
        None => (RunStatus::Failed, 1),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // WHY: structured JSON logging on stderr keeps stdout for the run summary
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting seamdiff");
    info!(?args, "Parsed CLI arguments");

    let mut stats = RunStats::new(&args.source, &args.target);

    let code = match execute(&args).await {
        Ok((comparison, timing, job)) => {
            stats.record_comparison(&comparison);
            stats.comparison_time_ms = timing.comparison_time_ms;
            stats.total_time_ms = timing.total_time_ms;

            let summary = comparison.summary;
            println!("seamdiff v{} - comparison complete", env!("CARGO_PKG_VERSION"));
            println!(
                "Sentences: {} original, {} revised",
                comparison.sentences_original, comparison.sentences_revised
            );
            println!(
                "  Added: {}, Deleted: {}, Replaced: {}, Unchanged: {}",
                summary.added, summary.deleted, summary.replaced, summary.unchanged
            );
            println!("Highlighted document: {}", job.highlight_out.display());
            println!("CSV report: {}", job.csv_out.display());
            if let Some(json_out) = &job.json_out {
                println!("JSON dump: {}", json_out.display());
            }
            0
        }
        Err(err) => {
            let (status, code) = exit_status(&err);
            error!("Comparison failed: {:#}", err);
            eprintln!("Error: {:#}", err);
            stats.record_failure(status, format!("{:#}", err));
            code
        }
    };

    if let Some(stats_out) = &args.stats_out {
        match write_run_stats(&stats, stats_out).await {
            Ok(()) => info!("Wrote run stats to {}", stats_out.display()),
            Err(e) => warn!("Failed to write run stats to {}: {}", stats_out.display(), e),
        }
    }

    ExitCode::from(code)
}
