//! Property access.
//!
//! Dotted paths are walked over map keys. Lists, maps and strings also
//! answer the `size`, `length` and `empty` pseudo-properties.

use thiserror::Error;
use tern_ir::Value;

use crate::errors::{unresolved_identifier, EvalError, EvalResult};
use crate::resolver::VariableResolver;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("no property `{property}` on {type_name}")]
    NoProperty {
        property: String,
        type_name: &'static str,
    },

    #[error("cannot read property `{property}` of null")]
    NullTarget { property: String },

    #[error("empty segment in property path `{path}`")]
    EmptySegment { path: String },
}

/// Read a dotted property path from `target`.
pub fn get_property(path: &str, target: &Value) -> Result<Value, PropertyError> {
    let mut current = target.clone();
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(PropertyError::EmptySegment {
                path: path.to_owned(),
            });
        }
        current = read_segment(segment, &current)?;
    }
    Ok(current)
}

fn read_segment(name: &str, target: &Value) -> Result<Value, PropertyError> {
    if let Value::Map(entries) = target {
        if let Some(value) = entries.get(name) {
            return Ok(value.clone());
        }
    }
    let size = match target {
        Value::List(items) => Some(items.len()),
        Value::Map(entries) => Some(entries.len()),
        Value::Str(s) => Some(s.chars().count()),
        _ => None,
    };
    match (name, size) {
        ("size" | "length", Some(n)) => Ok(Value::Int(i64::try_from(n).unwrap_or(i64::MAX))),
        ("empty", Some(n)) => Ok(Value::Bool(n == 0)),
        (_, _) if matches!(target, Value::Null) => Err(PropertyError::NullTarget {
            property: name.to_owned(),
        }),
        _ => Err(PropertyError::NoProperty {
            property: name.to_owned(),
            type_name: target.type_name(),
        }),
    }
}

/// Resolve an identifier token.
///
/// The first path segment is looked up in the resolver; the rest of the path
/// is read from the resolved value. Names the resolver does not know are
/// read from the context object instead.
pub(crate) fn resolve_identifier(
    path: &str,
    ctx: &Value,
    resolver: &dyn VariableResolver,
) -> EvalResult {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    if let Some(value) = resolver.resolve(head) {
        return match rest {
            Some(rest) => get_property(rest, &value).map_err(EvalError::from),
            None => Ok(value),
        };
    }
    get_property(path, ctx).map_err(|_| unresolved_identifier(path))
}
