// WHY: renderer-facing rows and summary counts derived from an operation list

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::engine::{Operation, OperationKind};
use crate::numeric_delta::annotate_numeric_delta;

/// Column order of the tabular report
pub const CSV_HEADER: [&str; 6] = ["type", "sim", "original", "revised", "idxA", "idxB"];

/// One non-equal operation flattened for a tabular report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    #[serde(rename = "type")]
    pub kind: String,
    /// Similarity with two decimals, e.g. `0.86`
    #[serde(rename = "sim")]
    pub similarity: String,
    #[serde(rename = "original")]
    pub original_text: String,
    /// Revised text, numeric-delta annotated for replacements
    #[serde(rename = "revised")]
    pub revised_text: String,
    /// 1-based global sentence index, empty when the side is absent
    #[serde(rename = "idxA")]
    pub index_a: String,
    #[serde(rename = "idxB")]
    pub index_b: String,
}

impl DiffRow {
    fn fields(&self) -> [&str; 6] {
        [
            self.kind.as_str(),
            self.similarity.as_str(),
            self.original_text.as_str(),
            self.revised_text.as_str(),
            self.index_a.as_str(),
            self.index_b.as_str(),
        ]
    }
}

/// Flatten operations into report rows, skipping unchanged sentences
pub fn build_rows(operations: &[Operation]) -> Vec<DiffRow> {
    operations
        .iter()
        .filter(|op| op.kind() != OperationKind::Equal)
        .map(|op| {
            let original_text = op.original().map(|s| s.text.clone()).unwrap_or_default();
            let mut revised_text = op.revised().map(|s| s.text.clone()).unwrap_or_default();
            if op.kind() == OperationKind::Replace {
                revised_text = annotate_numeric_delta(&original_text, &revised_text);
            }

            DiffRow {
                kind: op.kind().as_str().to_string(),
                similarity: format!("{:.2}", op.similarity()),
                original_text,
                revised_text,
                index_a: op.original().map(|s| (s.index + 1).to_string()).unwrap_or_default(),
                index_b: op.revised().map(|s| (s.index + 1).to_string()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Per-kind operation counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub added: usize,
    pub deleted: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

impl ChangeSummary {
    pub fn from_operations(operations: &[Operation]) -> Self {
        let mut summary = Self::default();
        for op in operations {
            match op.kind() {
                OperationKind::Add => summary.added += 1,
                OperationKind::Del => summary.deleted += 1,
                OperationKind::Replace => summary.replaced += 1,
                OperationKind::Equal => summary.unchanged += 1,
            }
        }
        summary
    }

    pub fn total_changes(&self) -> usize {
        self.added + self.deleted + self.replaced
    }
}

/// Write the header and one line per row as CSV.
///
/// Fields containing a comma, quote, CR or LF are quoted with inner quotes
/// doubled; lines end with CRLF.
pub fn write_csv<W: Write>(rows: &[DiffRow], writer: &mut W) -> io::Result<()> {
    write_record(writer, CSV_HEADER)?;
    for row in rows {
        write_record(writer, row.fields())?;
    }
    writer.flush()
}

fn write_record<W: Write>(writer: &mut W, fields: [&str; 6]) -> io::Result<()> {
    for (position, field) in fields.iter().enumerate() {
        if position > 0 {
            writer.write_all(b",")?;
        }
        if field.contains([',', '"', '\r', '\n']) {
            write!(writer, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            writer.write_all(field.as_bytes())?;
        }
    }
    writer.write_all(b"\r\n")
}
