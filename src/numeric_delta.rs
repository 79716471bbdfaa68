// WHY: exact-decimal delta summary for numbers that changed between a sentence pair

use bigdecimal::BigDecimal;
use regex_automata::meta::Regex;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Optional minus, digits with `,` grouping, optional fractional part
const NUMBER_PATTERN: &str = r"-?[0-9][0-9,]*(?:\.[0-9]+)?";

/// Smallest adjusted exponent still written in positional notation
const MIN_PLAIN_EXPONENT: i64 = -6;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("static number pattern compiles"))
}

/// Numeric literals in order of appearance, as written
pub fn numeric_literals(text: &str) -> Vec<&str> {
    number_pattern()
        .find_iter(text)
        .map(|found| &text[found.start()..found.end()])
        .collect()
}

/// Exact value of a literal with grouping separators removed.
/// Precision is unbounded, so every literal the pattern accepts keeps all its digits.
pub fn parse_literal(literal: &str) -> Option<BigDecimal> {
    let cleaned = literal.replace(',', "");
    match BigDecimal::from_str(&cleaned) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Skipping numeric literal {:?}: {}", literal, e);
            None
        }
    }
}

/// Signed delta text: `+250`, `-0.5`, `0`, `+1E-30`.
///
/// Trailing zeros are trimmed. Whole numbers are written as plain integers;
/// fractions switch to scientific notation once the leading digit sits more
/// than six places after the point.
pub fn format_delta(delta: &BigDecimal) -> String {
    let (coefficient, scale) = delta.as_bigint_and_exponent();
    let coefficient = coefficient.to_string();
    let (negative, digits) = match coefficient.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, coefficient.as_str()),
    };

    let mut digits = digits.to_string();
    let mut scale = scale;
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
        scale -= 1;
    }
    if digits == "0" {
        return "0".to_string();
    }

    let magnitude = if scale <= 0 {
        let zeros = usize::try_from(-scale).unwrap_or(0);
        format!("{}{}", digits, "0".repeat(zeros))
    } else {
        fractional_text(&digits, scale)
    };

    if negative {
        format!("-{}", magnitude)
    } else {
        format!("+{}", magnitude)
    }
}

/// `digits * 10^-scale` for a positive scale and a coefficient without trailing zeros
fn fractional_text(digits: &str, scale: i64) -> String {
    let len = digits.len() as i64;
    let adjusted = len - 1 - scale;

    if adjusted < MIN_PLAIN_EXPONENT {
        let (lead, rest) = digits.split_at(1);
        return if rest.is_empty() {
            format!("{}E{}", lead, adjusted)
        } else {
            format!("{}.{}E{}", lead, rest, adjusted)
        };
    }

    if len > scale {
        let (whole, fraction) = digits.split_at((len - scale) as usize);
        format!("{}.{}", whole, fraction)
    } else {
        format!("0.{}{}", "0".repeat((scale - len) as usize), digits)
    }
}

/// Delta entries for a sentence pair, or `None` when no number changed.
///
/// Literals pair up positionally. Excess literals on the longer side are
/// reported as `+<value> (new)` or `-<value> (removed)`. Pairs where either
/// side fails to parse are left out.
pub fn numeric_deltas(original: &str, revised: &str) -> Option<Vec<String>> {
    let numbers_original = numeric_literals(original);
    let numbers_revised = numeric_literals(revised);

    if numbers_original.is_empty() && numbers_revised.is_empty() {
        return None;
    }

    let mut deltas = Vec::new();
    let mut changed = false;

    for (before, after) in numbers_original.iter().zip(&numbers_revised) {
        let (Some(before_value), Some(after_value)) = (parse_literal(before), parse_literal(after)) else {
            continue;
        };
        if before_value != after_value {
            changed = true;
        }
        deltas.push(format_delta(&(after_value - before_value)));
    }

    let paired = numbers_original.len().min(numbers_revised.len());
    if numbers_original.len() > paired {
        changed = true;
        deltas.extend(numbers_original[paired..].iter().map(|n| format!("-{} (removed)", n)));
    } else if numbers_revised.len() > paired {
        changed = true;
        deltas.extend(numbers_revised[paired..].iter().map(|n| format!("+{} (new)", n)));
    }

    if changed && !deltas.is_empty() {
        Some(deltas)
    } else {
        None
    }
}

/// Revised text with ` (Δ ...)` appended when any number changed
pub fn annotate_numeric_delta(original: &str, revised: &str) -> String {
    match numeric_deltas(original, revised) {
        Some(deltas) => format!("{} (Δ {})", revised, deltas.join(", ")),
        None => revised.to_string(),
    }
}
