// WHY: paragraph -> sentence segmentation with lossless prefix/postfix bookkeeping
// Every byte of a paragraph lands in exactly one of prefix, text or postfix of some segment

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub mod normalization;
pub mod tokenizer;

pub use normalization::{is_ignorable_punctuation, normalize_for_comparison, normalize_into};
pub use tokenizer::tokenize;

/// One segmented sentence of a document, immutable for the lifetime of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// 0-based position across the whole document
    pub index: usize,
    /// Trimmed sentence content
    pub text: String,
    pub paragraph_index: usize,
    pub sentence_in_paragraph: usize,
    /// Non-content text preceding `text` in the paragraph
    pub prefix: String,
    /// Non-content text following `text` up to the next sentence
    pub postfix: String,
}

impl Sentence {
    /// Original paragraph substring covered by this sentence
    pub fn raw(&self) -> String {
        let mut raw = String::with_capacity(self.prefix.len() + self.text.len() + self.postfix.len());
        raw.push_str(&self.prefix);
        raw.push_str(&self.text);
        raw.push_str(&self.postfix);
        raw
    }
}

/// Borrowed `(prefix, text, postfix)` triple inside one paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphSegment<'a> {
    pub prefix: &'a str,
    pub text: &'a str,
    pub postfix: &'a str,
}

/// Sentence boundary configuration
#[derive(Debug, Clone)]
pub struct SegmenterRules {
    /// Characters whose run, followed by whitespace or end of text, ends a sentence
    pub terminal_punctuation: Vec<char>,
}

impl Default for SegmenterRules {
    fn default() -> Self {
        Self {
            terminal_punctuation: vec!['.', '!', '?', '\u{3002}', '\u{FF01}', '\u{FF1F}'],
        }
    }
}

/// Splits paragraphs into sentences
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    rules: SegmenterRules,
}

impl Segmenter {
    pub fn new(rules: SegmenterRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(SegmenterRules::default())
    }

    fn is_terminal(&self, ch: char) -> bool {
        self.rules.terminal_punctuation.contains(&ch)
    }

    /// Split one paragraph into segments.
    ///
    /// Concatenating `prefix + text + postfix` over the result reproduces `text`
    /// exactly. Whitespace-only input yields no segments. A paragraph without any
    /// sentence boundary comes back as a single trimmed segment.
    pub fn split_paragraph<'a>(&self, text: &'a str) -> Vec<ParagraphSegment<'a>> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let spans = self.sentence_spans(text);
        if spans.is_empty() {
            return vec![whole_paragraph(text)];
        }

        let mut segments = Vec::with_capacity(spans.len());
        let mut cursor = 0;
        for (position, &(start, end)) in spans.iter().enumerate() {
            // Whitespace up to the next sentence belongs to this one's postfix
            let next_start = spans
                .get(position + 1)
                .map(|&(next, _)| next)
                .unwrap_or(text.len());
            segments.push(ParagraphSegment {
                prefix: &text[cursor..start],
                text: &text[start..end],
                postfix: &text[end..next_start],
            });
            cursor = next_start;
        }
        segments
    }

    /// Byte ranges of trimmed sentence content, in order.
    /// Empty when the paragraph has no terminal-punctuation boundary at all.
    fn sentence_spans(&self, text: &str) -> Vec<(usize, usize)> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |pos: usize| chars.get(pos).map(|&(byte, _)| byte).unwrap_or(text.len());

        let mut spans = Vec::new();
        let mut saw_boundary = false;
        let mut start: Option<usize> = None;
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i].1;

            if ch == '\n' {
                if let Some(s) = start.take() {
                    push_trimmed(text, &mut spans, byte_at(s), byte_at(i));
                }
                i += 1;
                continue;
            }

            if start.is_none() {
                if ch.is_whitespace() {
                    i += 1;
                    continue;
                }
                start = Some(i);
            }

            if self.is_terminal(ch) {
                let mut run_end = i;
                while run_end < chars.len() && self.is_terminal(chars[run_end].1) {
                    run_end += 1;
                }
                // Terminal run counts only when followed by whitespace or end of text
                let at_boundary = run_end == chars.len() || chars[run_end].1.is_whitespace();
                if at_boundary {
                    saw_boundary = true;
                    if let Some(s) = start.take() {
                        spans.push((byte_at(s), byte_at(run_end)));
                    }
                }
                i = run_end;
                continue;
            }

            i += 1;
        }

        if let Some(s) = start {
            push_trimmed(text, &mut spans, byte_at(s), text.len());
        }

        if saw_boundary {
            spans
        } else {
            Vec::new()
        }
    }

    /// Segment a whole document given as ordered paragraph texts.
    ///
    /// `\r` is dropped before splitting. Whitespace-only paragraphs produce no
    /// sentences but still occupy their paragraph index.
    pub fn segment_document<I, S>(&self, paragraphs: I) -> Vec<Sentence>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sentences = Vec::new();

        for (paragraph_index, paragraph) in paragraphs.into_iter().enumerate() {
            let cleaned = paragraph.as_ref().replace('\r', "");
            let segments = self.split_paragraph(&cleaned);
            if segments.is_empty() {
                debug!("Skipping empty paragraph {}", paragraph_index);
                continue;
            }

            for (sentence_in_paragraph, segment) in segments.into_iter().enumerate() {
                sentences.push(Sentence {
                    index: sentences.len(),
                    text: segment.text.to_string(),
                    paragraph_index,
                    sentence_in_paragraph,
                    prefix: segment.prefix.to_string(),
                    postfix: segment.postfix.to_string(),
                });
            }
        }

        info!("Segmented {} sentences", sentences.len());
        sentences
    }
}

fn push_trimmed(text: &str, spans: &mut Vec<(usize, usize)>, start: usize, end: usize) {
    let trimmed_len = text[start..end].trim_end().len();
    if trimmed_len > 0 {
        spans.push((start, start + trimmed_len));
    }
}

fn whole_paragraph(text: &str) -> ParagraphSegment<'_> {
    let trimmed = text.trim();
    let leading = text.len() - text.trim_start().len();
    let end = leading + trimmed.len();
    ParagraphSegment {
        prefix: &text[..leading],
        text: trimmed,
        postfix: &text[end..],
    }
}
