use super::*;

#[test]
fn test_find_close_nested() {
    assert_eq!(find_close("a + (b * c)) + 1", b')'), Some(11));
    assert_eq!(find_close("1, [2, 3]] x", b']'), Some(9));
}

#[test]
fn test_find_close_skips_quotes() {
    assert_eq!(find_close("')' + \"(\")", b')'), Some(9));
    assert_eq!(find_close("'a\\')'b)", b')'), Some(7));
}

#[test]
fn test_find_close_mismatch() {
    assert_eq!(find_close("a + b", b')'), None);
    assert_eq!(find_close("a ] b)", b')'), None);
    assert_eq!(find_close("'never closed)", b')'), None);
}

#[test]
fn test_split_elements() {
    assert_eq!(split_elements("1, 'a,b', (2, 3)"), vec!["1", "'a,b'", "(2, 3)"]);
    assert_eq!(split_elements("  "), Vec::<&str>::new());
    assert_eq!(split_elements("x,"), vec!["x"]);
}

#[test]
fn test_unescape() {
    assert_eq!(unescape("'it\\'s'"), "it's");
    assert_eq!(unescape("\"a\\tb\\n\""), "a\tb\n");
    assert_eq!(unescape("''"), "");
}
