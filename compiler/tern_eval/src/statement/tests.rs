use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;
use crate::resolver::MapResolver;

fn run_loop(header: &str, body: &str, vars: &mut MapResolver) -> EvalResult {
    let engine = Engine::default();
    let ctx = Value::Null;
    let mut env = EvalEnv::new(&ctx, vars);
    ForLoop::compile(header, body)?.execute(&engine, &mut env)
}

#[test]
fn test_loop_accumulates_into_caller_variables() {
    let mut vars = MapResolver::new();
    vars.insert("total", 0i64);
    assert_eq!(
        run_loop("i = 0; i < 3; i = i + 1", "total = total + i", &mut vars),
        Ok(Value::Null)
    );
    assert_eq!(vars.get("total"), Some(&Value::Int(3)));
}

#[test]
fn test_loop_variables_stay_local() {
    let mut vars = MapResolver::new();
    vars.insert("n", 0i64);
    run_loop("i = 0; i < 4; i = i + 1", "n = n + 2", &mut vars).unwrap();
    assert_eq!(vars.get("n"), Some(&Value::Int(8)));
    assert_eq!(vars.get("i"), None);
}

#[test]
fn test_empty_parts() {
    let mut vars = MapResolver::new();
    vars.insert("k", 5i64);
    run_loop("; k > 0;", "k = k - 1", &mut vars).unwrap();
    assert_eq!(vars.get("k"), Some(&Value::Int(0)));

    let mut vars = MapResolver::new();
    assert_eq!(run_loop("; false;", "", &mut vars), Ok(Value::Null));
}

#[test]
fn test_header_shape() {
    assert!(matches!(
        ForLoop::compile("i < 3", "x").unwrap_err().kind,
        EvalErrorKind::Syntax(_)
    ));
    assert!(matches!(
        ForLoop::compile("i = 0; ; i = i + 1", "x").unwrap_err().kind,
        EvalErrorKind::Syntax(_)
    ));
}

#[test]
fn test_semicolons_inside_groups_do_not_split() {
    let parts = split_header("a = (1; 2); a < 3; a = a + 1").unwrap();
    assert_eq!(parts, vec!["a = (1; 2)", " a < 3", " a = a + 1"]);
}

#[test]
fn test_condition_must_be_boolean() {
    let mut vars = MapResolver::new();
    let err = run_loop("; 1;", "", &mut vars).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Type(_)));
}
