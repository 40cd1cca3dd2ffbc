use super::*;

#[test]
fn test_span_from_range() {
    let span = Span::try_from_range(3..9);
    assert_eq!(span, Ok(Span::new(3, 9)));
}

#[test]
fn test_span_len_and_end() {
    let span = Span::new(4, 10);
    assert_eq!(span.len(), 6);
    assert_eq!(span.start_offset(), 4);
    assert_eq!(span.end_offset(), 10);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn test_span_too_large() {
    let big = usize::try_from(u64::from(u32::MAX) + 1).unwrap_or(usize::MAX);
    assert!(Span::try_from_range(0..big).is_err());
}

#[test]
fn test_span_display() {
    assert_eq!(Span::new(1, 5).to_string(), "1..5");
}
