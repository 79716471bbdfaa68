// WHY: sub-sentence diff for soft replacements, aligned with the same primitive as sentences

use serde::{Deserialize, Serialize};

use crate::alignment::{OpTag, SequenceAligner};
use crate::segmenter::tokenize;

/// Kind of a word-level segment, one per opcode tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl From<OpTag> for SegmentKind {
    fn from(tag: OpTag) -> Self {
        match tag {
            OpTag::Equal => SegmentKind::Equal,
            OpTag::Insert => SegmentKind::Insert,
            OpTag::Delete => SegmentKind::Delete,
            OpTag::Replace => SegmentKind::Replace,
        }
    }
}

/// Covered token text on each side of one opcode range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDiffSegment {
    pub kind: SegmentKind,
    pub original: String,
    pub revised: String,
}

impl WordDiffSegment {
    /// Segments that carry new text in the revised sentence
    pub fn is_highlighted(&self) -> bool {
        matches!(self.kind, SegmentKind::Insert | SegmentKind::Replace)
    }

    /// Deletions have no revised text and are skipped when rendering
    pub fn is_rendered(&self) -> bool {
        !self.revised.is_empty()
    }
}

/// Word-level diff of two sentence texts.
///
/// Every opcode becomes a segment, including deletions, so both sides stay
/// reconstructible from the result.
pub fn build_word_diff(original: &str, revised: &str) -> Vec<WordDiffSegment> {
    let left = tokenize(original);
    let right = tokenize(revised);

    SequenceAligner::new(&left, &right)
        .opcodes()
        .into_iter()
        .map(|op| WordDiffSegment {
            kind: op.tag.into(),
            original: left[op.i1..op.i2].concat(),
            revised: right[op.j1..op.j2].concat(),
        })
        .collect()
}

/// Concatenation of every segment's original text
pub fn reconstruct_original(segments: &[WordDiffSegment]) -> String {
    segments.iter().map(|s| s.original.as_str()).collect()
}

/// Concatenation of every segment's revised text
pub fn reconstruct_revised(segments: &[WordDiffSegment]) -> String {
    segments.iter().map(|s| s.revised.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_replaced() {
        let segments = build_word_diff("The cat sat.", "The dog sat.");
        let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Equal, SegmentKind::Replace, SegmentKind::Equal]
        );
        assert_eq!(segments[1].original, "cat");
        assert_eq!(segments[1].revised, "dog");
        assert!(segments[1].is_highlighted());
    }

    #[test]
    fn test_insert_and_delete_segments() {
        let deleted = build_word_diff("keep this old text", "keep this text");
        assert_eq!(deleted.len(), 3);
        assert_eq!(deleted[1].kind, SegmentKind::Delete);
        assert_eq!(deleted[1].original, "old ");
        assert!(!deleted[1].is_rendered());
        assert!(!deleted[1].is_highlighted());

        let inserted = build_word_diff("keep this text", "keep this text now");
        assert_eq!(inserted.len(), 2);
        assert_eq!(inserted[1].kind, SegmentKind::Insert);
        assert_eq!(inserted[1].revised, " now");
        assert!(inserted[1].is_highlighted());
    }

    #[test]
    fn test_segments_reconstruct_both_sides() {
        let pairs = [
            ("Budget total: 1,000 USD.", "Budget total: 1,250 USD."),
            ("변경 전 값은 -1,234.5 입니다.", "변경 후 값은 -1,200.0 입니다."),
            ("Spacing   matters.", "Spacing matters."),
            ("", "Entirely new."),
        ];

        for (original, revised) in pairs {
            let segments = build_word_diff(original, revised);
            assert_eq!(reconstruct_original(&segments), original);
            assert_eq!(reconstruct_revised(&segments), revised);
        }
    }

    #[test]
    fn test_identical_text_is_one_equal_segment() {
        let segments = build_word_diff("Same words here.", "Same words here.");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Equal);
        assert!(!segments[0].is_highlighted());
    }
}
