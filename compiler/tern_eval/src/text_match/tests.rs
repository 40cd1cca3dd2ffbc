use std::str::FromStr;

use super::*;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

#[test]
fn test_soundex_codes() {
    assert_eq!(soundex("Robert"), "R163");
    assert_eq!(soundex("Rupert"), "R163");
    assert_eq!(soundex("Tymczak"), "T522");
    assert_eq!(soundex("Pfister"), "P236");
    assert_eq!(soundex("Ashcraft"), "A261");
    assert_eq!(soundex("Lee"), "L000");
}

#[test]
fn test_soundex_ignores_case_and_symbols() {
    assert_eq!(soundex("o'brien"), soundex("OBRIEN"));
    assert_eq!(soundex("42"), "");
    assert_eq!(soundex(""), "");
}

#[test]
fn test_similarity() {
    assert_eq!(similarity("abc", "abc"), dec("1"));
    assert_eq!(similarity("ab", "abcd"), dec("0.5"));
    assert_eq!(similarity("abcd", "ab"), dec("0.5"));
    assert_eq!(similarity("xyz", "abc"), dec("0"));
    assert_eq!(similarity("", ""), dec("1"));
    assert_eq!(similarity("ace", "abcdef"), dec("0.5"));
}

#[test]
fn test_similarity_order_matters() {
    assert_eq!(similarity("ca", "abc"), dec("0.3333"));
}
