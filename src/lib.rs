pub mod alignment;
pub mod cache;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod numeric_delta;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod segmenter;
pub mod stats;
pub mod word_diff;

// Re-export the comparison core for convenient access
pub use alignment::{opcodes, similarity_ratio, MatchBlock, OpTag, Opcode, SequenceAligner};
pub use config::{CompareConfig, IgnoreOption, IgnoreSet, DEFAULT_THRESHOLD};
pub use engine::{compare_sentences, Comparison, DiffEngine, Operation, OperationKind};
pub use error::{DiffError, DiffResult};
pub use numeric_delta::annotate_numeric_delta;
pub use report::{build_rows, write_csv, ChangeSummary, DiffRow};
pub use segmenter::{normalize_for_comparison, tokenize, ParagraphSegment, Segmenter, SegmenterRules, Sentence};
pub use word_diff::{build_word_diff, SegmentKind, WordDiffSegment};

// Re-export ports, adapters and the run pipeline
pub use cache::ReportCache;
pub use document::{ensure_supported, DocumentFormat, DocumentRole, HighlightSink, ParagraphSource};
pub use highlight::{HighlightedDocument, HighlightedParagraph, Run, RunStyle};
pub use output::MarkupSink;
pub use pipeline::{run_diff, run_diff_timed, DiffJob, RunTiming};
pub use reader::{PlainTextSource, ReaderConfig};
pub use stats::{write_run_stats, RunStats, RunStatus};
