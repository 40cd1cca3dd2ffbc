use pretty_assertions::assert_eq;

use super::*;
use crate::errors::{ErrorCategory, EvalErrorKind};
use crate::resolver::MapResolver;

fn eval_full(expr: &str, config: &EvalConfig, ctx: &Value, vars: &mut MapResolver) -> EvalResult {
    let mut env = EvalEnv::new(ctx, vars);
    evaluate(&mut TokenStream::new(expr), config, &mut env)
}

fn eval_vars(expr: &str, vars: &mut MapResolver) -> EvalResult {
    eval_full(expr, &EvalConfig::default(), &Value::Null, vars)
}

fn eval(expr: &str) -> EvalResult {
    eval_vars(expr, &mut MapResolver::new())
}

fn kind(expr: &str) -> EvalErrorKind {
    eval(expr).unwrap_err().kind
}

#[test]
fn test_left_to_right_reduction() {
    assert_eq!(eval("10 + 5 * 2"), Ok(Value::Int(30)));
    assert_eq!(eval("2 + 3 == 5"), Ok(Value::Bool(true)));
    assert_eq!(eval("(1 + 2) * 3"), Ok(Value::Int(9)));
    assert_eq!(eval("2 * (1 + 2)"), Ok(Value::Int(6)));
}

#[test]
fn test_division_result() {
    assert_eq!(
        eval("1 / 3").unwrap().to_text(),
        "0.33333333333333333333"
    );
    assert_eq!(eval("6 / 3"), Ok(Value::Int(2)));
    assert_eq!(
        kind("1 / 0"),
        EvalErrorKind::Evaluation("division by zero".to_owned())
    );
}

#[test]
fn test_division_keeps_fraction_of_long_dividends() {
    let third = eval(&format!("1{} / 3", "0".repeat(98))).unwrap();
    assert_eq!(
        third.to_text(),
        format!("{}.{}", "3".repeat(98), "3".repeat(20))
    );

    let two_thirds = eval(&format!("2{} / 3", "0".repeat(98))).unwrap();
    assert_eq!(
        two_thirds.to_text(),
        format!("{}.{}7", "6".repeat(98), "6".repeat(19))
    );

    let seventh = eval(&format!("1{} / 7", "0".repeat(90))).unwrap();
    assert_eq!(
        seventh.to_text(),
        format!("{}.14285714285714285714", "142857".repeat(15))
    );
}

#[test]
fn test_return_decimal_keeps_decimals() {
    let config = EvalConfig::new().return_decimal(true);
    let value = eval_full("1 + 1", &config, &Value::Null, &mut MapResolver::new()).unwrap();
    assert!(matches!(value, Value::Decimal(_)));
    assert_eq!(value, Value::Int(2));
}

#[test]
fn test_logical_operators() {
    assert_eq!(eval("1 > 2 || 3 > 2"), Ok(Value::Bool(true)));
    assert_eq!(eval("1 < 2 && 'a' == 'b'"), Ok(Value::Bool(false)));
    assert_eq!(eval("1 < 2 && 2 < 3"), Ok(Value::Bool(true)));
}

#[test]
fn test_short_circuit_never_reduces_the_rest() {
    // `missing` would fail to resolve if it were reduced.
    assert_eq!(eval("false && missing.thing"), Ok(Value::Bool(false)));
    assert_eq!(eval("true || missing"), Ok(Value::Bool(true)));
    assert_eq!(eval("false && missing; 7"), Ok(Value::Int(7)));
}

#[test]
fn test_ternary() {
    assert_eq!(eval("5 > 3 ? 'big' : 'small'"), Ok(Value::from("big")));
    assert_eq!(eval("5 < 3 ? 'big' : 'small'"), Ok(Value::from("small")));
    assert_eq!(eval("true ? 1 : nope"), Ok(Value::Int(1)));
    assert_eq!(eval("false ? nope : 2"), Ok(Value::Int(2)));
}

#[test]
fn test_nested_ternary() {
    assert_eq!(eval("false ? 1 : true ? 2 : 3"), Ok(Value::Int(2)));
    assert_eq!(eval("false ? true ? 1 : 2 : 3"), Ok(Value::Int(3)));
}

#[test]
fn test_ternary_condition_must_be_boolean() {
    let err = eval("1 ? 2 : 3").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_statements() {
    assert_eq!(eval("1 + 1; 2 * 3"), Ok(Value::Int(6)));
    assert_eq!(eval("1 + 1;"), Ok(Value::Int(2)));
    assert_eq!(eval("; 4"), Ok(Value::Int(4)));
    assert_eq!(kind(";"), EvalErrorKind::NothingToDo);
    assert_eq!(kind(" ; ; "), EvalErrorKind::NothingToDo);
    assert_eq!(eval("5 > 3 ? 1 : 2; 9"), Ok(Value::Int(9)));
}

#[test]
fn test_assignment() {
    let mut vars = MapResolver::new();
    assert_eq!(eval_vars("x = 5; x + 1", &mut vars), Ok(Value::Int(6)));
    assert_eq!(vars.get("x"), Some(&Value::Int(5)));

    assert_eq!(eval_vars("y = 2 * 3", &mut vars), Ok(Value::Int(6)));
    assert_eq!(vars.get("y"), Some(&Value::Int(6)));

    assert_eq!(eval_vars("a = b = 4; a + b", &mut vars), Ok(Value::Int(8)));
    assert_eq!(vars.get("b"), Some(&Value::Int(4)));
}

#[test]
fn test_assignment_takes_ternary_value() {
    let mut vars = MapResolver::new();
    assert_eq!(
        eval_vars("n = 2 > 1 ? 'yes' : 'no'; n", &mut vars),
        Ok(Value::from("yes"))
    );
}

#[test]
fn test_assignment_without_value() {
    assert!(matches!(kind("x ="), EvalErrorKind::Syntax(_)));
}

#[test]
fn test_lookahead_regroups_once() {
    assert_eq!(eval("10 - '' + 5"), Ok(Value::Int(5)));
    assert_eq!(
        kind("'a' - 'b' - 'c'"),
        EvalErrorKind::IncompatibleTypes {
            op: Operator::Sub,
            left: "string",
            right: "string",
        }
    );
}

#[test]
fn test_unfinished_junction_is_not_a_result() {
    let incomplete = EvalErrorKind::Syntax("incomplete expression".to_owned());
    assert_eq!(kind("'b' < 1 || 2"), incomplete);
    assert_eq!(kind("'b' < 1 || 2 + 3"), incomplete);
    assert_eq!(kind("'b' < 1 || 2; 3"), incomplete);

    let mut vars = MapResolver::new();
    let err = eval_vars("x = 'b' < 1 || 2", &mut vars).unwrap_err();
    assert_eq!(err.kind, incomplete);
    assert_eq!(vars.get("x"), None);
}

#[test]
fn test_errors_in_groups_point_into_the_whole_expression() {
    let err = eval("1 + (2 - 'x')").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::IncompatibleTypes { .. }));
    assert_eq!(err.expr.as_deref(), Some("1 + (2 - 'x')"));
    assert_eq!(err.cursor, Some(12));

    let err = eval("((1 - 'x'))").unwrap_err();
    assert_eq!(err.expr.as_deref(), Some("((1 - 'x'))"));
    assert_eq!(err.cursor, Some(9));

    let err = eval("[1, 2 - 'x']").unwrap_err();
    assert_eq!(err.expr.as_deref(), Some("[1, 2 - 'x']"));
    assert_eq!(err.cursor, Some(11));
}

#[test]
fn test_compiled_group_errors_point_into_the_whole_expression() {
    let expr = "1 + (2 - 'x')";
    let compiled = crate::compiler::compile(expr).unwrap();
    let config = EvalConfig::default();
    let ctx = Value::Null;
    let mut vars = MapResolver::new();
    let mut env = EvalEnv::new(&ctx, &mut vars);
    let err = evaluate(&mut compiled.iter(), &config, &mut env).unwrap_err();
    assert_eq!(err.expr.as_deref(), Some(expr));
    assert_eq!(err.cursor, Some(12));

    // A lexical error inside a group is found when the group is compiled.
    let err = crate::compiler::compile("1 + (2 , 3)").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Syntax(_)));
    assert_eq!(err.expr.as_deref(), Some("1 + (2 , 3)"));
    assert_eq!(err.cursor, Some(7));

    let err = eval("1 + (2 , 3)").unwrap_err();
    assert_eq!(err.expr.as_deref(), Some("1 + (2 , 3)"));
    assert_eq!(err.cursor, Some(7));
}

#[test]
fn test_incompatible_types_carry_location() {
    let err = eval("'a' - 1").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::IncompatibleTypes {
            op: Operator::Sub,
            left: "string",
            right: "decimal",
        }
    );
    assert_eq!(err.expr.as_deref(), Some("'a' - 1"));
    assert_eq!(err.cursor, Some(7));
    assert_eq!(err.category(), ErrorCategory::Compile);
}

#[test]
fn test_negation() {
    assert_eq!(eval("!true"), Ok(Value::Bool(false)));
    assert_eq!(eval("!(1 > 2)"), Ok(Value::Bool(true)));
    assert!(matches!(kind("!1"), EvalErrorKind::Type(_)));
}

#[test]
fn test_lists() {
    assert_eq!(
        eval("[1, 'a', 1 + 1]"),
        Ok(Value::list(vec![Value::Int(1), Value::from("a"), Value::Int(2)]))
    );
    assert_eq!(eval("[]"), Ok(Value::list(vec![])));
}

#[test]
fn test_empty_group() {
    assert_eq!(kind("()"), EvalErrorKind::NothingToDo);
}

#[test]
fn test_context_and_this() {
    let ctx = Value::map([(
        "a",
        Value::map([("roles", Value::list(vec![Value::from("admin")]))]),
    )]);
    let config = EvalConfig::default();
    let mut vars = MapResolver::new();
    assert_eq!(
        eval_full("a.roles contains 'admin'", &config, &ctx, &mut vars),
        Ok(Value::Bool(true))
    );

    let this = Value::Int(4);
    let mut env = EvalEnv::new(&ctx, &mut vars).with_this(&this);
    assert_eq!(
        evaluate(&mut TokenStream::new("this * 2"), &config, &mut env),
        Ok(Value::Int(8))
    );
}

#[test]
fn test_word_operators() {
    let mut vars = MapResolver::new();
    vars.insert(
        "people",
        Value::list(vec![
            Value::map([("name", Value::from("ann"))]),
            Value::map([("name", Value::from("bo"))]),
        ]),
    );
    assert_eq!(
        eval_vars("name in people", &mut vars),
        Ok(Value::list(vec![Value::from("ann"), Value::from("bo")]))
    );
    assert_eq!(eval("null or 'b'"), Ok(Value::from("b")));
    assert_eq!(eval("'x' instanceof String"), Ok(Value::Bool(true)));
    assert_eq!(eval("1 is Integer"), Ok(Value::Bool(true)));
    assert_eq!(eval("'abc' ~= 'a.c'"), Ok(Value::Bool(true)));
}

#[test]
fn test_boolean_mode() {
    let config = EvalConfig::new().boolean_mode(true);
    let check = |expr: &str| eval_full(expr, &config, &Value::Null, &mut MapResolver::new());
    assert_eq!(check("0"), Ok(Value::Bool(false)));
    assert_eq!(check("1"), Ok(Value::Bool(true)));
    assert_eq!(check("''"), Ok(Value::Bool(false)));
    assert_eq!(check("'x'"), Ok(Value::Bool(true)));
    assert_eq!(check("[]"), Ok(Value::Bool(false)));
    assert_eq!(check("[1]"), Ok(Value::Bool(true)));
    assert_eq!(check("null"), Ok(Value::Bool(false)));
}

#[test]
fn test_syntax_errors() {
    assert!(matches!(kind("1 2"), EvalErrorKind::Syntax(_)));
    assert!(matches!(kind("+ 1"), EvalErrorKind::Syntax(_)));
    assert!(matches!(kind("1 +"), EvalErrorKind::Syntax(_)));
    assert!(matches!(kind("1 + ;"), EvalErrorKind::Syntax(_)));
}

#[test]
fn test_unresolved_identifier() {
    let err = eval("1 + nope").unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UnresolvedIdentifier("nope".to_owned()));
    assert_eq!(err.category(), ErrorCategory::Evaluation);
    assert_eq!(err.cursor, Some(8));
}
