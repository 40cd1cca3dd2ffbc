//! Operator semantics for trinary reduction.
//!
//! `apply` takes the left operand (`v2`, pushed first) and the right operand
//! (`v1`, pushed last) and reports what the reducer should do with the
//! result. Arithmetic, equality and ordering operators normalize their
//! operands to decimals first; every other operator sees them as produced.
//!
//! A `Cast` failure means the operands have the wrong shape for the
//! operator. The reducer answers it with one lookahead regrouping before
//! giving up, so it is kept apart from hard failures.

use std::cmp::Ordering;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use regex::Regex;
use tern_ir::{Operator, Value, ValueType};

use crate::config::DIVISION_SCALE;
use crate::errors::{division_by_zero, evaluation, syntax, type_error, EvalError};
use crate::property::get_property;
use crate::text_match::{similarity, soundex};

/// What the reducer does with an applied operator.
#[derive(Debug, PartialEq)]
pub(crate) enum Applied {
    /// Push the result and keep reducing.
    Push(Value),
    /// Clear the stack, push the result, stop reducing.
    Replace(Value),
    /// Operands not reducible yet: push `left op right` back and stop reducing.
    Defer { left: Value, right: Value },
}

#[derive(Debug, PartialEq)]
pub(crate) enum OpFailure {
    /// Operand shapes do not fit the operator. Carries the operands back.
    Cast { left: Value, right: Value },
    Fail(EvalError),
}

type OpResult = Result<Applied, OpFailure>;

/// Apply `op` to `v2 op v1`.
pub(crate) fn apply(op: Operator, v2: Value, v1: Value, rounding: RoundingMode) -> OpResult {
    match op {
        Operator::Add => add(v2.normalize(), v1.normalize()),
        Operator::Sub | Operator::Mul | Operator::Div | Operator::Mod => {
            arithmetic(op, v2.normalize(), v1.normalize(), rounding)
        }
        Operator::Eq | Operator::NotEq => {
            let equal = values_equal(&v2.normalize(), &v1.normalize());
            Ok(Applied::Push(Value::Bool(equal == (op == Operator::Eq))))
        }
        Operator::Gt | Operator::Lt | Operator::GtEq | Operator::LtEq => {
            compare(op, v2.normalize(), v1.normalize())
        }
        Operator::And => match (&v2, &v1) {
            (Value::Bool(a), Value::Bool(b)) => push(Value::Bool(*a && *b)),
            (Value::Bool(true), _) => Ok(Applied::Defer {
                left: v2,
                right: v1,
            }),
            (Value::Bool(false), _) => push(Value::Bool(false)),
            _ => cast(v2, v1),
        },
        Operator::Or => match (&v2, &v1) {
            (Value::Bool(a), Value::Bool(b)) => push(Value::Bool(*a || *b)),
            _ => Ok(Applied::Defer {
                left: v2,
                right: v1,
            }),
        },
        Operator::Chor => Ok(coalesce(v2, v1)),
        Operator::Regex => regex_match(&v2, &v1),
        Operator::InstanceOf => {
            let ty = type_operand(&v1)?;
            push(Value::Bool(ty.is_instance(&v2)))
        }
        Operator::ConvertibleTo => {
            let ty = type_operand(&v1)?;
            push(Value::Bool(ty.can_convert(&v2)))
        }
        Operator::Contains => push(Value::Bool(contains(&v2, &v1))),
        Operator::BitAnd
        | Operator::BitOr
        | Operator::BitXor
        | Operator::Shl
        | Operator::UShl
        | Operator::Shr
        | Operator::UShr => bitwise(op, v2, v1),
        Operator::StrAppend => {
            let mut text = v2.to_text();
            text.push_str(&v1.to_text());
            push(Value::from(text))
        }
        Operator::Projection => project(&v2, &v1),
        Operator::Soundex => push(Value::Bool(
            soundex(&v1.to_text()) == soundex(&v2.to_text()),
        )),
        Operator::Similarity => push(Value::Decimal(similarity(&v1.to_text(), &v2.to_text()))),
        Operator::Ternary | Operator::TernaryElse | Operator::EndOfStatement => Err(
            OpFailure::Fail(syntax(format!("unexpected `{op}` between operands"))),
        ),
    }
}

#[inline]
#[allow(
    clippy::unnecessary_wraps,
    reason = "keeps every operator arm in the same OpResult shape"
)]
fn push(value: Value) -> OpResult {
    Ok(Applied::Push(value))
}

#[inline]
fn cast(left: Value, right: Value) -> OpResult {
    Err(OpFailure::Cast { left, right })
}

#[inline]
fn fail(err: EvalError) -> OpFailure {
    OpFailure::Fail(err)
}

fn add(v2: Value, v1: Value) -> OpResult {
    if let (Value::Decimal(a), Value::Decimal(b)) = (&v2, &v1) {
        return push(Value::Decimal(a + b));
    }
    // Left-hand text first.
    let mut text = v2.to_text();
    text.push_str(&v1.to_text());
    push(Value::from(text))
}

fn arithmetic(op: Operator, v2: Value, v1: Value, rounding: RoundingMode) -> OpResult {
    let (Value::Decimal(a), Value::Decimal(b)) = (&v2, &v1) else {
        return cast(v2, v1);
    };
    let result = match op {
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div if b.is_zero() => return Err(fail(division_by_zero())),
        Operator::Div => divide(a, b, rounding).map_err(fail)?,
        Operator::Mod if b.is_zero() => return Err(fail(division_by_zero())),
        Operator::Mod => a % b,
        _ => return cast(v2, v1),
    };
    push(Value::Decimal(result))
}

/// `a / b` rounded to `DIVISION_SCALE` fractional digits.
///
/// The quotient is computed exactly on the unscaled integers, with one guard
/// digit and a sticky digit for any remainder, so rounding never sees digits
/// that a limited-precision division has already dropped.
fn divide(
    a: &BigDecimal,
    b: &BigDecimal,
    rounding: RoundingMode,
) -> Result<BigDecimal, EvalError> {
    let (num, a_scale) = a.as_bigint_and_exponent();
    let (den, b_scale) = b.as_bigint_and_exponent();
    // a / b == num / den * 10^(b_scale - a_scale)
    let shift = DIVISION_SCALE + 1 + b_scale - a_scale;
    let (num, den) = if shift >= 0 {
        (num * pow10(shift)?, den)
    } else {
        (num, den * pow10(-shift)?)
    };
    let quotient = &num / &den;
    let digits = if (&num % &den).is_zero() {
        quotient * 10u32
    } else if num.sign() == den.sign() {
        quotient * 10u32 + 1u32
    } else {
        quotient * 10u32 - 1u32
    };
    Ok(BigDecimal::new(digits, DIVISION_SCALE + 2).with_scale_round(DIVISION_SCALE, rounding))
}

fn pow10(exp: i64) -> Result<BigInt, EvalError> {
    let exp = u32::try_from(exp).map_err(|_| evaluation("decimal exponent out of range"))?;
    Ok(BigInt::from(10u32).pow(exp))
}

fn values_equal(v2: &Value, v1: &Value) -> bool {
    match (v2, v1) {
        (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b) == Ordering::Equal,
        _ => v1 == v2,
    }
}

fn compare(op: Operator, v2: Value, v1: Value) -> OpResult {
    let (Value::Decimal(a), Value::Decimal(b)) = (&v2, &v1) else {
        return cast(v2, v1);
    };
    let ord = a.cmp(b);
    let result = match op {
        Operator::Gt => ord == Ordering::Greater,
        Operator::Lt => ord == Ordering::Less,
        Operator::GtEq => ord != Ordering::Less,
        _ => ord != Ordering::Greater,
    };
    push(Value::Bool(result))
}

/// First non-empty operand, preferring the left one.
fn coalesce(v2: Value, v1: Value) -> Applied {
    if !v2.is_empty_value() {
        Applied::Replace(v2)
    } else if !v1.is_empty_value() {
        Applied::Replace(v1)
    } else {
        Applied::Push(Value::Null)
    }
}

fn regex_match(v2: &Value, v1: &Value) -> OpResult {
    let pattern = format!("^(?:{})$", v1.to_text());
    let re = Regex::new(&pattern)
        .map_err(|e| fail(evaluation(format!("invalid pattern `{}`: {e}", v1.to_text()))))?;
    push(Value::Bool(re.is_match(&v2.to_text())))
}

/// Type operand of `instanceof` / `convertable_to`: a type reference or a type name.
fn type_operand(v1: &Value) -> Result<ValueType, OpFailure> {
    match v1 {
        Value::Type(ty) => Ok(*ty),
        Value::Str(name) => ValueType::from_name(name)
            .ok_or_else(|| fail(evaluation(format!("unknown type `{name}`")))),
        other => Err(fail(type_error(format!(
            "expected a type, found {}",
            other.type_name()
        )))),
    }
}

fn contains(container: &Value, candidate: &Value) -> bool {
    match container {
        Value::Str(s) => s.contains(candidate.to_text().as_str()),
        Value::List(items) => items.iter().any(|item| item == candidate),
        Value::Map(entries) => entries.contains_key(candidate.to_text().as_str()),
        _ => false,
    }
}

fn bitwise(op: Operator, v2: Value, v1: Value) -> OpResult {
    let (Some(a), Some(b)) = (v2.as_int32(), v1.as_int32()) else {
        return cast(v2, v1);
    };
    let shift = (b & 31).unsigned_abs();
    let result = match op {
        Operator::BitAnd => a & b,
        Operator::BitOr => a | b,
        Operator::BitXor => a ^ b,
        Operator::Shl => a.wrapping_shl(shift),
        // Negative left operands are made positive before shifting.
        Operator::UShl => a.wrapping_abs().wrapping_shl(shift),
        Operator::Shr => a.wrapping_shr(shift),
        Operator::UShr => logical_shr(a, shift),
        _ => return cast(v2, v1),
    };
    push(Value::Int(i64::from(result)))
}

#[allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = "logical shift reinterprets the 32-bit pattern"
)]
fn logical_shr(a: i32, shift: u32) -> i32 {
    ((a as u32) >> shift) as i32
}

fn project(v2: &Value, v1: &Value) -> OpResult {
    let Value::List(items) = v1 else {
        return Err(fail(type_error(
            "projections can only be performed on collections",
        )));
    };
    let property = v2.to_text();
    let projected = items
        .iter()
        .map(|item| get_property(&property, item))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| fail(e.into()))?;
    push(Value::list(projected))
}
