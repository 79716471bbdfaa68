// End-to-end runs through the pipeline and the CLI binary
// WHY: validates file reading, comparison and every written output together

use seamdiff::{
    run_diff, CompareConfig, DiffError, DiffJob, IgnoreOption, IgnoreSet, MarkupSink,
    PlainTextSource,
};
use std::process::Command;

#[path = "integration/fixtures/mod.rs"]
mod fixtures;
use fixtures::*;

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{assert_golden_file, TestFixture};

#[tokio::test]
async fn test_contract_pair_golden_outputs() {
    let fixture = TestFixture::new();
    let (original, revised) = fixture.create_pair(CONTRACT_ORIGINAL, CONTRACT_REVISED);

    let job = DiffJob::new(&original, &revised)
        .with_highlight_out(fixture.output_path("out/highlight.txt"))
        .with_csv_out(fixture.output_path("out/report.csv"));

    let comparison = run_diff(&job, &CompareConfig::default(), &PlainTextSource::default(), &MarkupSink)
        .await
        .expect("Diff run should succeed");

    assert_eq!(comparison.sentences_original, 4);
    assert_eq!(comparison.sentences_revised, 4);
    assert_eq!(comparison.summary.unchanged, 2);

    let csv = fixture.read_output(&job.csv_out);
    assert!(csv.contains("\r\n"), "CSV rows should end with CRLF");
    assert_golden_file(&csv, CONTRACT_EXPECTED_CSV, "Contract CSV report");

    let markup = fixture.read_output(&job.highlight_out);
    assert_golden_file(&markup, CONTRACT_EXPECTED_MARKUP, "Contract highlighted document");
}

#[tokio::test]
async fn test_identical_documents_produce_header_only_report() {
    let fixture = TestFixture::new();
    let (original, revised) = fixture.create_pair(CONTRACT_ORIGINAL, CONTRACT_ORIGINAL);

    let job = DiffJob::new(&original, &revised);
    let comparison = run_diff(&job, &CompareConfig::default(), &PlainTextSource::default(), &MarkupSink)
        .await
        .expect("Diff run should succeed");

    assert!(comparison.rows.is_empty());
    assert!(comparison.operations.iter().all(|op| op.similarity() == 1.0));

    let csv = fixture.read_output(&job.csv_out);
    assert_golden_file(&csv, "type,sim,original,revised,idxA,idxB", "Header-only CSV");

    // Highlighting an unchanged document reproduces it
    let markup = fixture.read_output(&job.highlight_out);
    assert_golden_file(&markup, CONTRACT_ORIGINAL, "Unchanged highlighted document");
}

#[tokio::test]
async fn test_korean_decimal_delta_in_report() {
    let fixture = TestFixture::new();
    let (original, revised) = fixture.create_pair(KOREAN_ORIGINAL, KOREAN_REVISED);

    let job = DiffJob::new(&original, &revised);
    let comparison = run_diff(&job, &CompareConfig::default(), &PlainTextSource::default(), &MarkupSink)
        .await
        .expect("Diff run should succeed");

    assert_eq!(comparison.rows.len(), 1);
    assert_eq!(comparison.rows[0].kind, "replace");
    assert_eq!(comparison.rows[0].revised_text, KOREAN_EXPECTED_REVISED);
}

#[tokio::test]
async fn test_ignore_options_suppress_cosmetic_changes() {
    let fixture = TestFixture::new();
    let (original, revised) = fixture.create_pair(SPACING_ORIGINAL, SPACING_REVISED);

    let literal = DiffJob::new(&original, &revised);
    let comparison = run_diff(&literal, &CompareConfig::default(), &PlainTextSource::default(), &MarkupSink)
        .await
        .expect("Diff run should succeed");
    assert_eq!(comparison.summary.replaced, 2);

    let ignore = IgnoreSet::none().with(IgnoreOption::Space).with(IgnoreOption::Punct);
    let config = CompareConfig::new(ignore, 0.8).unwrap();
    let comparison = run_diff(&literal, &config, &PlainTextSource::default(), &MarkupSink)
        .await
        .expect("Diff run should succeed");
    assert!(comparison.rows.is_empty());
}

#[tokio::test]
async fn test_json_dump_contains_operations() {
    let fixture = TestFixture::new();
    let (original, revised) = fixture.create_pair(CONTRACT_ORIGINAL, CONTRACT_REVISED);

    let json_path = fixture.output_path("dump/comparison.json");
    let job = DiffJob::new(&original, &revised).with_json_out(&json_path);
    run_diff(&job, &CompareConfig::default(), &PlainTextSource::default(), &MarkupSink)
        .await
        .expect("Diff run should succeed");

    let json: serde_json::Value =
        serde_json::from_str(&fixture.read_output(&json_path)).expect("JSON dump should parse");
    let operations = json["operations"].as_array().expect("operations array");
    assert_eq!(operations.len(), 5);
    assert_eq!(operations[0]["kind"], "replace");
    assert_eq!(operations[0]["word_diff"][1]["revised"], "250");
    assert_eq!(json["rows"][0]["revised"], "Budget total: 1,250 USD. (Δ +250)");
}

#[tokio::test]
async fn test_docx_output_is_capability_unavailable() {
    let fixture = TestFixture::new();
    let (original, revised) = fixture.create_pair(CONTRACT_ORIGINAL, CONTRACT_REVISED);

    let job = DiffJob::new(&original, &revised).with_highlight_out(fixture.output_path("out.docx"));
    let err = run_diff(&job, &CompareConfig::default(), &PlainTextSource::default(), &MarkupSink)
        .await
        .expect_err("docx output has no adapter");

    assert!(matches!(
        err.downcast_ref::<DiffError>(),
        Some(DiffError::CapabilityUnavailable { .. })
    ));
}

fn seamdiff_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_seamdiff"))
}

#[test]
fn test_cli_writes_reports_and_stats() {
    let fixture = TestFixture::new();
    let (original, revised) = fixture.create_pair(CONTRACT_ORIGINAL, CONTRACT_REVISED);
    let stats_file = fixture.output_path("run_stats.json");

    let output = seamdiff_command()
        .arg(&original)
        .arg(&revised)
        .arg("--stats-out")
        .arg(&stats_file)
        .arg("--no-progress")
        .output()
        .expect("Failed to run seamdiff");

    assert!(
        output.status.success(),
        "seamdiff failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added: 1, Deleted: 1, Replaced: 1, Unchanged: 2"));

    assert_golden_file(
        &fixture.read_output(fixture.output_path("revised_diff.csv")),
        CONTRACT_EXPECTED_CSV,
        "CLI CSV report",
    );

    let stats: serde_json::Value =
        serde_json::from_str(&fixture.read_output(&stats_file)).expect("Stats should be valid JSON");
    assert_eq!(stats["status"], "success");
    assert_eq!(stats["rows_written"], 3);
    assert!(stats["error"].is_null());
}

#[test]
fn test_cli_rejects_bad_configuration_before_reading() {
    let fixture = TestFixture::new();
    let missing = fixture.output_path("missing.txt");

    let output = seamdiff_command()
        .arg(&missing)
        .arg(&missing)
        .args(["--ignore", "bogus,space", "--no-progress"])
        .output()
        .expect("Failed to run seamdiff");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("bogus"));

    let output = seamdiff_command()
        .arg(&missing)
        .arg(&missing)
        .args(["--threshold", "1.5", "--no-progress"])
        .output()
        .expect("Failed to run seamdiff");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1.5"));
}

#[test]
fn test_cli_capability_exit_code() {
    let fixture = TestFixture::new();
    let source = fixture.create_document("contract.docx", "not really a docx");
    let target = fixture.create_document("contract.txt", CONTRACT_REVISED);
    let stats_file = fixture.output_path("stats.json");

    let output = seamdiff_command()
        .arg(&source)
        .arg(&target)
        .arg("--stats-out")
        .arg(&stats_file)
        .arg("--no-progress")
        .output()
        .expect("Failed to run seamdiff");

    assert_eq!(output.status.code(), Some(2));
    let stats: serde_json::Value =
        serde_json::from_str(&fixture.read_output(&stats_file)).expect("Stats should be valid JSON");
    assert_eq!(stats["status"], "capability_unavailable");
}
