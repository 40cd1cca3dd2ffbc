//! Phonetic and similarity matching for `soundslike` and `strsim`.

use bigdecimal::{BigDecimal, RoundingMode};

/// Fractional digits of a similarity score.
const SIMILARITY_SCALE: i64 = 4;

/// American Soundex code: first letter plus three digits.
///
/// Non-letters are ignored; text without letters has an empty code.
pub fn soundex(text: &str) -> String {
    let mut letters = text
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase());
    let Some(first) = letters.next() else {
        return String::new();
    };

    let mut code = String::with_capacity(4);
    code.push(first);
    let mut last = soundex_digit(first);
    for c in letters {
        if code.len() == 4 {
            break;
        }
        // H and W do not separate letters with the same code.
        if matches!(c, 'H' | 'W') {
            continue;
        }
        let digit = soundex_digit(c);
        if digit != '0' && digit != last {
            code.push(digit);
        }
        last = digit;
    }
    while code.len() < 4 {
        code.push('0');
    }
    code
}

fn soundex_digit(c: char) -> char {
    match c {
        'B' | 'F' | 'P' | 'V' => '1',
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => '2',
        'D' | 'T' => '3',
        'L' => '4',
        'M' | 'N' => '5',
        'R' => '6',
        _ => '0',
    }
}

/// Similarity of two strings in `[0, 1]`.
///
/// Counts the characters of the shorter string found, in order, in the
/// longer one, relative to the longer string's length.
pub fn similarity(a: &str, b: &str) -> BigDecimal {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if longer.is_empty() {
        return BigDecimal::from(1);
    }

    let mut matched = 0u32;
    let mut from = 0;
    for c in shorter {
        if let Some(offset) = longer[from..].iter().position(|&l| l == c) {
            matched += 1;
            from += offset + 1;
        }
    }

    let total = u32::try_from(longer.len()).unwrap_or(u32::MAX);
    (BigDecimal::from(matched) / BigDecimal::from(total))
        .with_scale_round(SIMILARITY_SCALE, RoundingMode::HalfUp)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
