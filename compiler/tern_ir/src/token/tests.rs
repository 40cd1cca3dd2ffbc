use super::*;

#[test]
fn test_operator_queries() {
    let token = Token::new(TokenKind::Operator(Operator::And), Span::new(2, 4));
    assert!(token.is_operator());
    assert!(token.is_operator_of(Operator::And));
    assert!(!token.is_operator_of(Operator::Or));
    assert_eq!(token.operator(), Some(Operator::And));
    assert!(!token.is_subeval());
}

#[test]
fn test_value_tokens() {
    let sub = Token::new(TokenKind::SubEval(Arc::from("a + 1")), Span::DUMMY);
    assert!(sub.is_subeval());
    assert!(!sub.is_operator());
    assert_eq!(sub.operator(), None);

    let list = Token::new(
        TokenKind::List(Arc::from(vec![Arc::from("1"), Arc::from("b")])),
        Span::DUMMY,
    );
    assert!(list.is_subeval());
    assert_eq!(list.to_string(), "[1, b]");
}

#[test]
fn test_display() {
    let ident = Token::new(TokenKind::Identifier(Arc::from("a.b")), Span::DUMMY).negate();
    assert_eq!(ident.to_string(), "!a.b");
    let lit = Token::new(TokenKind::Literal(Value::from("x")), Span::DUMMY);
    assert_eq!(lit.to_string(), "'x'");
    let assign = Token::new(TokenKind::Assign(Arc::from("n")), Span::DUMMY);
    assert_eq!(assign.to_string(), "n =");
}
