// WHY: report file naming and writers shared by the CLI, pipeline and tests

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::document::HighlightSink;
use crate::highlight::HighlightedDocument;
use crate::report::{write_csv, DiffRow};

/// `<dir>/<stem><suffix>` next to the given document
fn sibling_path(document_path: &Path, suffix: &str) -> PathBuf {
    let mut path = document_path.to_path_buf();
    let file_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();
    path.set_file_name(format!("{file_stem}{suffix}"));
    path
}

/// Default highlighted-document path for a target document: `<stem>_diff.txt`
pub fn default_highlight_path(target_path: &Path) -> PathBuf {
    sibling_path(target_path, "_diff.txt")
}

/// Default CSV report path for a target document: `<stem>_diff.csv`
pub fn default_csv_path(target_path: &Path) -> PathBuf {
    sibling_path(target_path, "_diff.csv")
}

/// Create missing parent directories of an output path
pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !tokio::fs::try_exists(parent).await.unwrap_or(false) {
            debug!("Creating output directory {}", parent.display());
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Write `bytes` to `path` through a buffered async writer
async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).await?;
    writer.flush().await?;
    Ok(())
}

/// Write the tabular report as UTF-8 CSV
pub async fn write_csv_report(rows: &[DiffRow], path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    write_bytes(path, &buffer).await?;
    info!("Wrote {} report rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write any serializable value as pretty-printed JSON
pub async fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_bytes(path, json.as_bytes()).await?;
    info!("Wrote JSON to {}", path.display());
    Ok(())
}

/// Highlight sink producing the lightweight text markup
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupSink;

impl HighlightSink for MarkupSink {
    async fn write_highlighted(&self, document: &HighlightedDocument, path: &Path) -> Result<()> {
        write_bytes(path, document.render_markup().as_bytes()).await?;
        info!(
            "Wrote highlighted document with {} paragraphs to {}",
            document.paragraphs().len(),
            path.display()
        );
        Ok(())
    }
}
