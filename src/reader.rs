use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::document::ParagraphSource;

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: 8192, // WHY: 8KB is optimal for most filesystems and network storage
        }
    }
}

/// Statistics for one document read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub paragraphs_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Plain-text paragraph source: each line of a UTF-8 file is one paragraph.
///
/// Blank lines are kept so paragraph indices match line numbers.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSource {
    config: ReaderConfig,
}

impl PlainTextSource {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read paragraphs line-by-line with async buffered I/O
    pub async fn read_lines<P: AsRef<Path>>(&self, file_path: P) -> Result<(Vec<String>, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of document: {}", path.display());

        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open document {}", path.display()))?;

        // WHY: BufReader with custom buffer size reduces syscalls and improves throughput
        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut lines = reader.lines();
        let mut paragraphs = Vec::new();
        let mut byte_count = 0u64;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    byte_count += line.len() as u64 + 1; // +1 for newline
                    paragraphs.push(line);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Read failed in {} at line {}: {}", path.display(), paragraphs.len() + 1, e);
                    return Err(e).with_context(|| {
                        format!("UTF-8 decoding error in {} at line {}", path.display(), paragraphs.len() + 1)
                    });
                }
            }
        }

        // Drop a leading byte order mark
        if let Some(first) = paragraphs.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{FEFF}') {
                *first = stripped.to_string();
            }
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            paragraphs_read: paragraphs.len() as u64,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Read {}: {} paragraphs, {} bytes in {}ms",
            stats.file_path, stats.paragraphs_read, stats.bytes_read, stats.duration_ms
        );

        Ok((paragraphs, stats))
    }
}

impl ParagraphSource for PlainTextSource {
    async fn read_paragraphs(&self, path: &Path) -> Result<Vec<String>> {
        let (paragraphs, _stats) = self.read_lines(path).await?;
        Ok(paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    async fn create_test_file(dir: &Path, name: &str, content: &[u8]) -> Result<std::path::PathBuf> {
        let file_path = dir.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&file_path, content).await?;
        Ok(file_path)
    }

    #[tokio::test]
    async fn test_read_paragraphs_keeps_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let source = PlainTextSource::default();

        let file_path = create_test_file(temp_dir.path(), "doc.txt", b"First. Second.\n\nThird.\n")
            .await
            .unwrap();

        let paragraphs = source.read_paragraphs(&file_path).await.unwrap();
        assert_eq!(paragraphs, vec!["First. Second.", "", "Third."]);
    }

    #[tokio::test]
    async fn test_crlf_and_bom_are_removed() {
        let temp_dir = TempDir::new().unwrap();
        let source = PlainTextSource::default();

        let file_path = create_test_file(temp_dir.path(), "win.txt", "\u{FEFF}Alpha.\r\nBeta.\r\n".as_bytes())
            .await
            .unwrap();

        let (paragraphs, stats) = source.read_lines(&file_path).await.unwrap();
        assert_eq!(paragraphs, vec!["Alpha.", "Beta."]);
        assert_eq!(stats.paragraphs_read, 2);
    }

    #[tokio::test]
    async fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = PlainTextSource::default();

        let file_path = create_test_file(temp_dir.path(), "empty.txt", b"").await.unwrap();

        let (paragraphs, stats) = source.read_lines(&file_path).await.unwrap();
        assert!(paragraphs.is_empty());
        assert_eq!(stats.bytes_read, 0);
    }

    #[tokio::test]
    async fn test_read_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = PlainTextSource::default();

        let result = source.read_paragraphs(&temp_dir.path().join("missing.txt")).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = PlainTextSource::default();

        let file_path = create_test_file(temp_dir.path(), "bad.txt", &[b'o', b'k', b'\n', 0xFF, 0xFE, b'\n'])
            .await
            .unwrap();

        let err = source.read_paragraphs(&file_path).await.unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[tokio::test]
    async fn test_custom_buffer_size() {
        let temp_dir = TempDir::new().unwrap();
        let source = PlainTextSource::new(ReaderConfig { buffer_size: 1024 });

        // Create file larger than buffer
        let content = "x".repeat(2048) + "\n" + &"y".repeat(2048);
        let file_path = create_test_file(temp_dir.path(), "large.txt", content.as_bytes())
            .await
            .unwrap();

        let (paragraphs, _stats) = source.read_lines(&file_path).await.unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].len(), 2048);
        assert_eq!(paragraphs[1].len(), 2048);
    }
}
