//! Lexical helpers shared by the format parsers.
//!
//! Hand history text is noisy: amounts carry currency glyphs on either side,
//! some sites print decimal commas, and buy-ins are written as `4,50 + 0,50`.
//! The numeric helpers here never fail. Input without a numeric prefix maps to
//! `0.0`, and every such fallback is counted and logged at debug level so the
//! leniency stays observable.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

static LENIENT_AMOUNTS: AtomicU64 = AtomicU64::new(0);

/// Number of amount tokens that fell back to `0.0` since process start.
pub fn lenient_amount_count() -> u64 {
    LENIENT_AMOUNTS.load(Ordering::Relaxed)
}

fn record_lenient(input: &str) {
    LENIENT_AMOUNTS.fetch_add(1, Ordering::Relaxed);
    debug!(token = input, "unparsable amount defaulted to 0");
}

/// Longest `digits[.digits]` prefix of `s`, if it has at least one digit.
fn numeric_prefix(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

/// Parses a leading amount, accepting `,` as decimal separator and ignoring
/// anything after the number. `"42€"` is `42.0`, `"x42"` is `0.0`.
pub fn to_amount(s: &str) -> f64 {
    let normalized = trim(s).replace(',', ".");
    match numeric_prefix(&normalized) {
        Some(v) => v,
        None => {
            if !normalized.is_empty() {
                record_lenient(s);
            }
            0.0
        }
    }
}

/// Sums the `+`-separated parts of a buy-in such as `"4,50 + 0,50"`.
/// Characters other than digits, `.` and `,` are skipped within a part, so
/// `"Free"` is `0.0`.
pub fn to_buy_in(s: &str) -> f64 {
    s.split('+')
        .map(|part| {
            let token: String = part
                .chars()
                .filter_map(|c| match c {
                    '0'..='9' | '.' => Some(c),
                    ',' => Some('.'),
                    _ => None,
                })
                .collect();
            match numeric_prefix(&token) {
                Some(v) => v,
                None => {
                    if !trim(part).is_empty() {
                        record_lenient(part);
                    }
                    0.0
                }
            }
        })
        .sum()
}

/// Parses one whitespace-delimited amount token, skipping leading currency
/// glyphs and punctuation such as `$`, `(` or `€`.
pub fn amount_token(token: &str) -> Option<f64> {
    let start = token.find(|c: char| c.is_ascii_digit())?;
    let body = token[start..].replace(',', ".");
    numeric_prefix(&body)
}

/// The last numeric token on a line, or `0.0` when the line carries none.
pub fn last_amount(line: &str) -> f64 {
    match line.split_whitespace().rev().find_map(amount_token) {
        Some(v) => v,
        None => {
            record_lenient(line);
            0.0
        }
    }
}

/// Strips ASCII whitespace (space, tab, CR, LF, FF, VT) from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0c' | '\x0b'))
}

/// Text strictly between the first `open` and the next `close` after it.
pub fn between<'a>(line: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = line.find(open)? + open.len();
    let len = line[start..].find(close)?;
    Some(&line[start..start + len])
}

/// Contents of the last `[...]` group on a line.
pub fn last_bracket_group(line: &str) -> Option<&str> {
    let open = line.rfind('[')?;
    let close = line[open..].find(']')? + open;
    Some(&line[open + 1..close])
}

/// Matches `text` against a pattern where `*` stands for any run of
/// characters. Only the `*` class is supported.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let segments: Vec<&str> = pattern.split('*').collect();
    if segments.len() == 1 {
        return pattern == text;
    }

    let first = segments[0];
    let last = segments[segments.len() - 1];
    if !text.starts_with(first) || text.len() < first.len() + last.len() {
        return false;
    }
    if !text[first.len()..].ends_with(last) {
        return false;
    }

    let mut rest = &text[first.len()..text.len() - last.len()];
    for segment in &segments[1..segments.len() - 1] {
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }
    true
}

/// Converts a roman numeral such as `XIV` to its value, `0` when invalid.
pub fn roman_to_int(s: &str) -> u32 {
    let value = |c: char| match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    };

    let digits: Option<Vec<u32>> = s.chars().map(value).collect();
    let Some(digits) = digits else {
        return 0;
    };
    let mut total = 0;
    for (i, &d) in digits.iter().enumerate() {
        match digits.get(i + 1) {
            Some(&next) if next > d => total -= d as i64,
            _ => total += d as i64,
        }
    }
    total.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_prefix_stops_at_second_dot() {
        assert_eq!(numeric_prefix("1.234.56"), Some(1.234));
        assert_eq!(numeric_prefix("12."), Some(12.0));
        assert_eq!(numeric_prefix("."), None);
    }

    #[test]
    fn amount_token_skips_currency_prefix() {
        assert_eq!(amount_token("$0.06"), Some(0.06));
        assert_eq!(amount_token("(0,04€)"), Some(0.04));
        assert_eq!(amount_token("to"), None);
    }

    #[test]
    fn last_amount_takes_final_number() {
        assert_eq!(last_amount("Hero raises 0.04€ to 0.06€"), 0.06);
        assert_eq!(last_amount("alice: calls $2 and is all-in"), 2.0);
    }

    #[test]
    fn between_and_brackets() {
        assert_eq!(between("Table: 'Nice 04' 5-max", "'", "'"), Some("Nice 04"));
        assert_eq!(last_bracket_group("*** TURN *** [7s 8d 2c][Jh]"), Some("Jh"));
        assert_eq!(last_bracket_group("no cards"), None);
    }

    #[test]
    fn roman_levels() {
        assert_eq!(roman_to_int("IV"), 4);
        assert_eq!(roman_to_int("XIX"), 19);
        assert_eq!(roman_to_int("4"), 0);
    }

    #[test]
    fn wildcard_segments() {
        assert!(wildcard_match("*.txt", "a_real_holdem_no-limit.txt"));
        assert!(wildcard_match("2014*_real_*.txt", "20141116_x_real_holdem.txt"));
        assert!(!wildcard_match("*_summary.txt", "20141116_x.txt"));
        assert!(wildcard_match("exact", "exact"));
        assert!(!wildcard_match("ab*ba", "aba"));
    }
}
