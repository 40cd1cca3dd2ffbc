use pretty_assertions::assert_eq;
use tern_ir::RoundingMode;

use super::*;
use crate::errors::EvalErrorKind;
use crate::resolver::MapResolver;

#[test]
fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
}

#[test]
fn test_eval_uses_context_as_this() {
    let engine = Engine::default();
    let ctx = Value::map([("total", Value::Int(40))]);
    let mut vars = MapResolver::new();
    assert_eq!(
        engine.eval("this.total + 2", &ctx, &mut vars),
        Ok(Value::Int(42))
    );
}

#[test]
fn test_whitespace_is_nothing_to_do() {
    let engine = Engine::default();
    let mut vars = MapResolver::new();
    for expr in ["", "   ", "\n\t "] {
        let err = engine.eval(expr, &Value::Null, &mut vars).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::NothingToDo);
    }
}

#[test]
fn test_repeated_eval_hits_cache() {
    let engine = Engine::new(EvalConfig::new().cache_mode(CacheMode::Local(8)));
    let mut vars = MapResolver::new();
    for _ in 0..3 {
        assert_eq!(engine.eval("1 + 1  ", &Value::Null, &mut vars), Ok(Value::Int(2)));
    }
    let stats = engine.cache_stats();
    assert_eq!((stats.hits, stats.misses, stats.len), (2, 1, 1));
}

#[test]
fn test_compile_shares_cached_buffer() {
    let engine = Engine::default();
    let first = engine.compile("a == 1 ").unwrap();
    let second = engine.compile("a == 1 ").unwrap();
    assert_eq!(first.source(), "a == 1");
    assert!(std::ptr::eq(first.source(), second.source()));
    assert_eq!(engine.cache_stats().misses, 1);
}

#[test]
fn test_execute() {
    let engine = Engine::new(EvalConfig::new().boolean_mode(true));
    let compiled = engine.compile("count").unwrap();
    let mut vars = MapResolver::new();
    for (count, expected) in [(0i64, false), (3, true)] {
        vars.insert("count", count);
        assert_eq!(
            engine.execute(&compiled, &Value::Null, &mut vars),
            Ok(Value::Bool(expected))
        );
    }
}

#[test]
fn test_rounding_mode_applies_to_division() {
    let engine = Engine::new(EvalConfig::new().rounding(RoundingMode::Up));
    let mut vars = MapResolver::new();
    let value = engine.eval("1 / 3", &Value::Null, &mut vars).unwrap();
    assert_eq!(value.to_text(), "0.33333333333333333334");
}

#[test]
fn test_shared_cache_mode() {
    let a = Engine::new(EvalConfig::new().cache_mode(CacheMode::Shared));
    let b = Engine::new(EvalConfig::new().cache_mode(CacheMode::Shared));
    let expr = "'shared cache mode test' + 1";
    let first = a.compile(expr).unwrap();
    let second = b.compile(expr).unwrap();
    assert!(std::ptr::eq(first.source(), second.source()));
}
