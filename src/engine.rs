// WHY: sentence-level comparison core - alignment, replacement refinement, result assembly
// Pure and synchronous; every call owns its inputs and outputs

use serde::Serialize;
use tracing::{debug, info};

use crate::alignment::{similarity_ratio, OpTag, SequenceAligner};
use crate::config::CompareConfig;
use crate::report::{build_rows, ChangeSummary, DiffRow};
use crate::segmenter::{normalize_into, Segmenter, Sentence};
use crate::word_diff::{build_word_diff, WordDiffSegment};

/// Operation kind as it appears in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Equal,
    Add,
    Del,
    Replace,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Equal => "equal",
            OperationKind::Add => "add",
            OperationKind::Del => "del",
            OperationKind::Replace => "replace",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sentence-level change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Operation {
    Equal {
        original: Sentence,
        revised: Sentence,
    },
    Add {
        revised: Sentence,
    },
    Del {
        original: Sentence,
    },
    /// Soft replace: similar enough to be shown as one edited sentence
    Replace {
        similarity: f64,
        original: Sentence,
        revised: Sentence,
        word_diff: Vec<WordDiffSegment>,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Equal { .. } => OperationKind::Equal,
            Operation::Add { .. } => OperationKind::Add,
            Operation::Del { .. } => OperationKind::Del,
            Operation::Replace { .. } => OperationKind::Replace,
        }
    }

    /// 1.0 for equal, 0.0 for add/del, the pair ratio for replace
    pub fn similarity(&self) -> f64 {
        match self {
            Operation::Equal { .. } => 1.0,
            Operation::Add { .. } | Operation::Del { .. } => 0.0,
            Operation::Replace { similarity, .. } => *similarity,
        }
    }

    pub fn original(&self) -> Option<&Sentence> {
        match self {
            Operation::Equal { original, .. }
            | Operation::Del { original }
            | Operation::Replace { original, .. } => Some(original),
            Operation::Add { .. } => None,
        }
    }

    pub fn revised(&self) -> Option<&Sentence> {
        match self {
            Operation::Equal { revised, .. }
            | Operation::Add { revised }
            | Operation::Replace { revised, .. } => Some(revised),
            Operation::Del { .. } => None,
        }
    }

    /// Word-level segments; empty unless this is a replace
    pub fn word_diff(&self) -> &[WordDiffSegment] {
        match self {
            Operation::Replace { word_diff, .. } => word_diff,
            _ => &[],
        }
    }
}

/// Align two segmented documents and classify every sentence
pub fn compare_sentences(
    sentences_a: &[Sentence],
    sentences_b: &[Sentence],
    config: &CompareConfig,
) -> Vec<Operation> {
    let mut scratch = String::new();
    let norm_a = normalize_sentences(sentences_a, config, &mut scratch);
    let norm_b = normalize_sentences(sentences_b, config, &mut scratch);

    let opcodes = SequenceAligner::new(&norm_a, &norm_b).opcodes();
    debug!("Sentence alignment produced {} opcodes", opcodes.len());

    let mut operations = Vec::with_capacity(sentences_a.len().max(sentences_b.len()));

    for op in opcodes {
        match op.tag {
            OpTag::Equal => {
                for (a, b) in (op.i1..op.i2).zip(op.j1..op.j2) {
                    operations.push(Operation::Equal {
                        original: sentences_a[a].clone(),
                        revised: sentences_b[b].clone(),
                    });
                }
            }
            OpTag::Delete => {
                for a in op.i1..op.i2 {
                    operations.push(Operation::Del { original: sentences_a[a].clone() });
                }
            }
            OpTag::Insert => {
                for b in op.j1..op.j2 {
                    operations.push(Operation::Add { revised: sentences_b[b].clone() });
                }
            }
            OpTag::Replace => {
                // Positional pairing; leftovers on the longer side stay unpaired
                let paired = (op.i2 - op.i1).min(op.j2 - op.j1);
                for offset in 0..paired {
                    let (a, b) = (op.i1 + offset, op.j1 + offset);
                    refine_pair(&sentences_a[a], &sentences_b[b], &norm_a[a], &norm_b[b], config, &mut operations);
                }
                for a in op.i1 + paired..op.i2 {
                    operations.push(Operation::Del { original: sentences_a[a].clone() });
                }
                for b in op.j1 + paired..op.j2 {
                    operations.push(Operation::Add { revised: sentences_b[b].clone() });
                }
            }
        }
    }

    operations
}

/// Comparison keys for every sentence, built through one scratch buffer
fn normalize_sentences(sentences: &[Sentence], config: &CompareConfig, scratch: &mut String) -> Vec<String> {
    sentences
        .iter()
        .map(|sentence| {
            normalize_into(&sentence.text, config.ignore(), scratch);
            scratch.as_str().to_owned()
        })
        .collect()
}

/// Classify one positional pair from a replace run
fn refine_pair(
    original: &Sentence,
    revised: &Sentence,
    norm_original: &str,
    norm_revised: &str,
    config: &CompareConfig,
    operations: &mut Vec<Operation>,
) {
    if norm_original == norm_revised {
        operations.push(Operation::Equal {
            original: original.clone(),
            revised: revised.clone(),
        });
        return;
    }

    let ratio = similarity_ratio(norm_original, norm_revised);
    if ratio >= config.threshold() {
        operations.push(Operation::Replace {
            similarity: ratio,
            original: original.clone(),
            revised: revised.clone(),
            word_diff: build_word_diff(&original.text, &revised.text),
        });
    } else {
        debug!(
            "Splitting pair {} / {} (ratio {:.3} below {:.3})",
            original.index,
            revised.index,
            ratio,
            config.threshold()
        );
        operations.push(Operation::Del { original: original.clone() });
        operations.push(Operation::Add { revised: revised.clone() });
    }
}

/// Full result of one comparison run
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub operations: Vec<Operation>,
    pub rows: Vec<DiffRow>,
    pub summary: ChangeSummary,
    pub sentences_original: usize,
    pub sentences_revised: usize,
}

impl Comparison {
    pub fn has_changes(&self) -> bool {
        !self.rows.is_empty()
    }
}

/// Segments both documents and compares them with one validated configuration
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: CompareConfig,
    segmenter: Segmenter,
}

impl DiffEngine {
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            segmenter: Segmenter::with_default_rules(),
        }
    }

    pub fn with_segmenter(mut self, segmenter: Segmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare two documents given as ordered paragraph texts
    pub fn compare<A, B, S, T>(&self, paragraphs_a: A, paragraphs_b: B) -> Comparison
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let sentences_a = self.segmenter.segment_document(paragraphs_a);
        let sentences_b = self.segmenter.segment_document(paragraphs_b);

        let operations = compare_sentences(&sentences_a, &sentences_b, &self.config);
        let rows = build_rows(&operations);
        let summary = ChangeSummary::from_operations(&operations);

        info!(
            "Compared {} vs {} sentences: {} added, {} deleted, {} replaced, {} unchanged",
            sentences_a.len(),
            sentences_b.len(),
            summary.added,
            summary.deleted,
            summary.replaced,
            summary.unchanged
        );

        Comparison {
            operations,
            rows,
            summary,
            sentences_original: sentences_a.len(),
            sentences_revised: sentences_b.len(),
        }
    }
}
