//! Numeric-string normalization.
//!
//! Converts digit strings, decimal strings, slash fractions, and
//! spelled-out English numbers into a canonical numeric string. Parsing is
//! best-effort by contract: unrecognized word tokens contribute zero and
//! no input ever produces an error.

/// Canonical numeric-string form of free-text numbers.
///
/// Handled inputs, in order:
/// 1. Slash fractions: each side is normalized recursively and the sides
///    are divided left to right. A multi-slash input like `"1/2/2"`
///    therefore reduces as `(1/2)/2` with no operator-precedence
///    awareness. This is a known quirk of the source behavior and is
///    preserved deliberately.
/// 2. Digit strings (after stripping comma grouping separators) parse
///    directly as integers, decimal strings as floats.
/// 3. Anything else is treated as English number words split on spaces
///    and hyphens, summed via a fixed token table.
///
/// # Examples
///
/// ```
/// use dosage_extract::number::normalize;
///
/// assert_eq!(normalize("25"), "25");
/// assert_eq!(normalize("twenty five"), "25");
/// assert_eq!(normalize("3/4"), "0.75");
/// assert_eq!(normalize("one hundred"), "100");
/// ```
pub fn normalize(text: &str) -> String {
    // Slash fractions reduce left to right.
    if text.contains('/') {
        let mut sides = text.split('/');
        let mut value: f64 = sides
            .next()
            .map(|s| parse_normalized(s))
            .unwrap_or_default();
        for side in sides {
            value /= parse_normalized(side);
        }
        return format_decimal(value);
    }

    // Strip grouping separators.
    let cleaned = text.replace(',', "");

    // Direct digit / decimal parse.
    if !cleaned.is_empty() && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = cleaned.parse::<i64>() {
            return n.to_string();
        }
    }
    if is_decimal_literal(&cleaned) {
        if let Ok(f) = cleaned.parse::<f64>() {
            return format_decimal(f);
        }
    }

    sum_number_words(&cleaned).to_string()
}

/// Formats an `f64` without a trailing `.0` for whole values.
pub(crate) fn format_decimal(value: f64) -> String {
    value.to_string()
}

fn parse_normalized(text: &str) -> f64 {
    // normalize() always yields a parseable numeric string.
    normalize(text).parse().unwrap_or_default()
}

fn is_decimal_literal(text: &str) -> bool {
    let mut seen_dot = false;
    if text.is_empty() || !text.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    for c in text.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

/// Sums English number words into an integer.
///
/// Tokens resolve through a 3-letter prefix table ("thr" covers both
/// "three" and "thirteen"/"thirty"); `-teen` adds ten, `-ty` multiplies
/// by ten, and "hundred"/"thousand"/"million" multiply the accumulated
/// sum (or seed it when nothing has accumulated). "twenty" is handled
/// before the prefix table since its "twe" prefix collides with "twelve".
/// Unknown tokens contribute zero.
fn sum_number_words(text: &str) -> i64 {
    let lowered = text.to_lowercase();
    let mut sum: i64 = 0;
    for token in lowered.split([' ', '-']) {
        if token == "and" || token.is_empty() {
            continue;
        }
        if token == "twenty" {
            sum += 20;
            continue;
        }
        let mut value: i64 = match token.get(0..3) {
            Some("zer") => 0,
            Some("one") | Some("onc") => 1,
            Some("two") | Some("twi") => 2,
            Some("thr") | Some("thi") => 3,
            Some("fou") => 4,
            Some("fiv") | Some("fif") => 5,
            Some("six") => 6,
            Some("sev") => 7,
            Some("eig") => 8,
            Some("nin") => 9,
            Some("ten") => 10,
            Some("ele") => 11,
            Some("twe") => 12,
            _ => 0,
        };
        if token.ends_with("teen") {
            value += 10;
        }
        if token.ends_with("ty") {
            value *= 10;
        }
        sum += value;
        match token {
            "hundred" => {
                if sum == 0 {
                    sum = 100;
                } else {
                    sum *= 100;
                }
            }
            "thousand" => {
                if sum == 0 {
                    sum = 1000;
                } else {
                    sum *= 1000;
                }
            }
            "million" => {
                if sum == 0 {
                    sum = 1_000_000;
                } else {
                    sum *= 1_000_000;
                }
            }
            _ => {}
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_strings() {
        assert_eq!(normalize("6"), "6");
        assert_eq!(normalize("25"), "25");
        assert_eq!(normalize("007"), "7");
        assert_eq!(normalize("1,500"), "1500");
    }

    #[test]
    fn test_decimal_strings() {
        assert_eq!(normalize("1.5"), "1.5");
        assert_eq!(normalize("0.25"), "0.25");
    }

    #[test]
    fn test_number_words() {
        assert_eq!(normalize("one"), "1");
        assert_eq!(normalize("twice"), "2");
        assert_eq!(normalize("thrice"), "3");
        assert_eq!(normalize("twelve"), "12");
        assert_eq!(normalize("thirteen"), "13");
        assert_eq!(normalize("twenty five"), "25");
        assert_eq!(normalize("twenty-five"), "25");
        assert_eq!(normalize("one hundred"), "100");
        assert_eq!(normalize("two hundred and fifty"), "250");
        assert_eq!(normalize("three thousand"), "3000");
    }

    #[test]
    fn test_word_and_digit_agree() {
        assert_eq!(normalize("twenty five"), normalize("25"));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(normalize("3/4"), "0.75");
        assert_eq!(normalize("1/2"), "0.5");
        assert_eq!(normalize("one/two"), "0.5");
    }

    #[test]
    fn test_multi_slash_reduces_left_to_right() {
        // Known quirk: (1/2)/2, not 1/(2/2).
        assert_eq!(normalize("1/2/2"), "0.25");
    }

    #[test]
    fn test_unknown_tokens_contribute_zero() {
        assert_eq!(normalize("several"), "7"); // "sev" prefix collision, best effort
        assert_eq!(normalize("qx"), "0");
        assert_eq!(normalize(""), "0");
    }

    #[test]
    fn test_idempotent_on_numeric_input() {
        for input in ["25", "1.5", "0.75"] {
            assert_eq!(normalize(&normalize(input)), normalize(input));
        }
    }
}
