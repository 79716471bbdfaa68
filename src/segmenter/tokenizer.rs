// WHY: word-diff tokenizer producing runs that concatenate back to the input exactly

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunClass {
    Whitespace,
    Word,
    Other,
}

/// Word characters: letters, digits, `_` and `-`, plus the extended Latin,
/// Cyrillic and Hangul syllable blocks
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
        || ch == '_'
        || ch == '-'
        || ('\u{00C0}'..='\u{02AF}').contains(&ch)
        || ('\u{0400}'..='\u{04FF}').contains(&ch)
        || ('\u{AC00}'..='\u{D7AF}').contains(&ch)
}

fn classify(ch: char) -> RunClass {
    if ch.is_whitespace() {
        RunClass::Whitespace
    } else if is_word_char(ch) {
        RunClass::Word
    } else {
        RunClass::Other
    }
}

/// Split text into whitespace runs, word runs and single-character "other" runs.
///
/// Empty input yields a single empty token so callers always have something to align.
pub fn tokenize(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![text];
    }

    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        let class = classify(ch);
        let mut end = start + ch.len_utf8();

        // Other runs are always one character long
        if class != RunClass::Other {
            while let Some(&(next_pos, next_ch)) = chars.peek() {
                if classify(next_ch) != class {
                    break;
                }
                end = next_pos + next_ch.len_utf8();
                chars.next();
            }
        }

        tokens.push(&text[start..end]);
    }

    tokens
}
