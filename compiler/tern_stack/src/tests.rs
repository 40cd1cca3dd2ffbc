use super::*;

/// Mimics a nested pass: strips one pair of parentheses per level.
fn unwrap_groups(text: &str) -> usize {
    nested_pass(|| match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => 1 + unwrap_groups(inner),
        None => 0,
    })
}

#[test]
fn test_shallow_nesting() {
    assert_eq!(unwrap_groups("((1))"), 2);
    assert_eq!(unwrap_groups("1"), 0);
}

#[test]
fn test_deep_nesting() {
    let depth = 50_000;
    let text = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(unwrap_groups(&text), depth);
}

#[test]
fn test_passes_result_through() {
    let result: Result<u8, String> = nested_pass(|| Err("boom".to_owned()));
    assert_eq!(result, Err("boom".to_owned()));
}
