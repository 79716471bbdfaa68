// WHY: format-neutral highlighted document built from operations, rendered by a HighlightSink
// Paragraph slots are tracked in an explicit index table instead of a lazily filled cache

use serde::Serialize;

use crate::engine::Operation;
use crate::segmenter::Sentence;

/// Visual treatment of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStyle {
    Plain,
    /// Deleted sentence
    Strikethrough,
    /// Added sentence
    Underline,
    /// Inserted or replaced words inside a soft replace
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Run {
    Text { text: String, style: RunStyle },
    /// Explicit line break inside a paragraph
    Break,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightedParagraph {
    pub runs: Vec<Run>,
}

impl HighlightedParagraph {
    /// Append text, turning each `\n` into a break run. Empty text adds nothing.
    pub fn append(&mut self, text: &str, style: RunStyle) {
        for (position, line) in text.split('\n').enumerate() {
            if position > 0 {
                self.runs.push(Run::Break);
            }
            if !line.is_empty() {
                self.runs.push(Run::Text {
                    text: line.to_string(),
                    style,
                });
            }
        }
    }

    /// Text content with breaks as `\n`
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|run| match run {
                Run::Text { text, .. } => text.as_str(),
                Run::Break => "\n",
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Revised-document view of a comparison.
///
/// Paragraphs are kept in creation order. Sentences that survive into the
/// revised document go to the paragraph slot of their paragraph index; each
/// deleted sentence gets a paragraph of its own appended at that point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightedDocument {
    paragraphs: Vec<HighlightedParagraph>,
    /// slots[paragraph_index] = position in `paragraphs`
    #[serde(skip)]
    slots: Vec<usize>,
}

impl HighlightedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_operations(operations: &[Operation]) -> Self {
        let mut document = Self::new();
        for op in operations {
            document.push_operation(op);
        }
        document
    }

    pub fn paragraphs(&self) -> &[HighlightedParagraph] {
        &self.paragraphs
    }

    /// Position of the slot for `paragraph_index`, creating it and every
    /// missing lower slot in order
    pub fn ensure_paragraph(&mut self, paragraph_index: usize) -> usize {
        while self.slots.len() <= paragraph_index {
            self.slots.push(self.paragraphs.len());
            self.paragraphs.push(HighlightedParagraph::default());
        }
        self.slots[paragraph_index]
    }

    fn push_operation(&mut self, op: &Operation) {
        match op {
            Operation::Del { original } => {
                let mut paragraph = HighlightedParagraph::default();
                paragraph.append(&original.prefix, RunStyle::Plain);
                paragraph.append(&original.text, RunStyle::Strikethrough);
                paragraph.append(&original.postfix, RunStyle::Plain);
                if paragraph.is_empty() {
                    paragraph.append("\u{00A0}", RunStyle::Plain);
                }
                self.paragraphs.push(paragraph);
            }
            Operation::Add { revised } => {
                self.with_slot(revised, |paragraph| {
                    paragraph.append(&revised.text, RunStyle::Underline);
                });
            }
            Operation::Equal { revised, .. } => {
                self.with_slot(revised, |paragraph| {
                    paragraph.append(&revised.text, RunStyle::Plain);
                });
            }
            Operation::Replace { revised, word_diff, .. } => {
                self.with_slot(revised, |paragraph| {
                    for segment in word_diff.iter().filter(|s| s.is_rendered()) {
                        let style = if segment.is_highlighted() {
                            RunStyle::Highlight
                        } else {
                            RunStyle::Plain
                        };
                        paragraph.append(&segment.revised, style);
                    }
                });
            }
        }
    }

    /// Wrap `body` with the sentence's prefix and postfix inside its paragraph slot
    fn with_slot<F>(&mut self, sentence: &Sentence, body: F)
    where
        F: FnOnce(&mut HighlightedParagraph),
    {
        let position = self.ensure_paragraph(sentence.paragraph_index);
        let paragraph = &mut self.paragraphs[position];
        paragraph.append(&sentence.prefix, RunStyle::Plain);
        body(paragraph);
        paragraph.append(&sentence.postfix, RunStyle::Plain);
    }

    /// Lightweight text markup: one paragraph per line,
    /// `~~deleted~~`, `++added++`, `==highlighted==`
    pub fn render_markup(&self) -> String {
        let mut out = String::new();
        for paragraph in &self.paragraphs {
            for run in &paragraph.runs {
                match run {
                    Run::Break => out.push('\n'),
                    Run::Text { text, style } => {
                        let marker = match style {
                            RunStyle::Plain => "",
                            RunStyle::Strikethrough => "~~",
                            RunStyle::Underline => "++",
                            RunStyle::Highlight => "==",
                        };
                        out.push_str(marker);
                        out.push_str(text);
                        out.push_str(marker);
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}
