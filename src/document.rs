// WHY: narrow document I/O ports so the comparison core never touches a file format
// Container formats without an adapter surface as CapabilityUnavailable, not as core defects

use anyhow::Result;
use std::future::Future;
use std::path::Path;

use crate::error::{DiffError, DiffResult};
use crate::highlight::HighlightedDocument;

/// Supplies the ordered paragraph texts of one document
pub trait ParagraphSource {
    fn read_paragraphs(&self, path: &Path) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Persists a highlighted document
pub trait HighlightSink {
    fn write_highlighted(
        &self,
        document: &HighlightedDocument,
        path: &Path,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// File format as judged from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    /// Word-processor container (docx, doc, odt)
    Container,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("docx") | Some("doc") | Some("odt") => DocumentFormat::Container,
            _ => DocumentFormat::PlainText,
        }
    }
}

/// Which side of a run a path plays, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Source,
    Target,
    HighlightOutput,
}

impl DocumentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentRole::Source => "source document",
            DocumentRole::Target => "target document",
            DocumentRole::HighlightOutput => "highlighted output",
        }
    }
}

/// Reject formats the available adapters cannot handle
pub fn ensure_supported(path: &Path, role: DocumentRole) -> DiffResult<()> {
    match DocumentFormat::from_path(path) {
        DocumentFormat::PlainText => Ok(()),
        DocumentFormat::Container => Err(DiffError::CapabilityUnavailable {
            capability: format!("{} adapter for {}", role.as_str(), path.display()),
            hint: "convert the document to UTF-8 plain text (one paragraph per line)".to_string(),
        }),
    }
}
