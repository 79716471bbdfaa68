// WHY: comparison-only normalization, never applied to stored or rendered text
// The engine normalizes whole documents through one scratch buffer via normalize_into

use crate::config::{IgnoreOption, IgnoreSet};

/// CJK and typographic marks stripped in addition to ASCII punctuation
pub const EXTRA_PUNCTUATION: &str = "\u{201C}\u{201D}\u{2018}\u{2019}\u{201A}\u{201B}\u{201E}\u{201F}\u{2039}\u{203A}\u{AB}\u{BB}\
\u{3001}\u{FF0C}\u{FF1B}\u{FF1A}\u{B7}\u{2026}\u{2027}\u{3008}\u{3009}\u{300A}\u{300B}\u{300C}\u{300D}\u{300E}\u{300F}\
\u{3010}\u{3011}\u{3014}\u{3015}\u{FF08}\u{FF09}\u{FF3B}\u{FF3D}\u{FF5B}\u{FF5D}()[]{}<>\
\u{FF1F}\u{FF01}\u{3002}\u{FF0E}\u{FE52}\u{FE54}\u{FE56}\u{FE57}";

/// True for characters removed by the `punct` ignore option
pub fn is_ignorable_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(ch)
}

/// Normalize text for equality and similarity checks
pub fn normalize_for_comparison(text: &str, ignore: &IgnoreSet) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_into(text, ignore, &mut result);
    result
}

/// Normalize into supplied buffer.
/// Whitespace removal is applied before punctuation removal.
pub fn normalize_into(text: &str, ignore: &IgnoreSet, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let strip_space = ignore.contains(IgnoreOption::Space);
    let strip_punct = ignore.contains(IgnoreOption::Punct);

    for ch in text.chars() {
        if strip_space && ch.is_whitespace() {
            continue;
        }
        if strip_punct && is_ignorable_punctuation(ch) {
            continue;
        }
        buffer.push(ch);
    }
}
