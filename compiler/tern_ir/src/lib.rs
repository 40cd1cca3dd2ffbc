//! Tern IR - shared data types for the Tern expression engine.
//!
//! This crate contains the data the tokenizer produces and the evaluator
//! consumes:
//! - `Span` for source locations inside an expression buffer
//! - `Operator` codes for every binary, ternary and statement operator
//! - `Token` / `TokenKind` for the lexer output
//! - `Value` / `ValueType`, the closed runtime value type, with its coercions
//!
//! # Design Philosophy
//!
//! - **Closed value set**: `Value` is an enum; coercion is explicit (`normalize`,
//!   `truthiness`, `as_int32`), never an open dispatch mechanism.
//! - **Cheap clones**: heap variants are `Arc`-backed so tokens holding literal
//!   values can be replayed by many evaluations, on many threads.

mod operator;
mod span;
mod token;
mod value;

pub use operator::Operator;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind};
pub use value::{is_number_text, Value, ValueType};

// Re-exported so downstream crates name decimal types through one path.
pub use bigdecimal::{BigDecimal, RoundingMode};
