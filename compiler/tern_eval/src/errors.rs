//! Evaluation errors and their constructors.
//!
//! Every failure carries the expression text and the cursor offset at which
//! it happened, so callers can point at the failing location. Locations are
//! attached by the innermost evaluation pass that saw the error; a failure
//! inside a group or list element is then lifted into the enclosing
//! expression, pass by pass, until it points into the caller's text.

use std::fmt;
use std::sync::Arc;

use tern_ir::Operator;
use tern_lexer::LexError;
use thiserror::Error;

use crate::property::PropertyError;

pub type EvalResult<T = tern_ir::Value> = Result<T, EvalError>;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    /// The expression produced no tokens.
    #[error("nothing to do")]
    NothingToDo,

    #[error("syntax error: {0}")]
    Syntax(String),

    /// An operator could not be applied, even after lookahead regrouping.
    #[error("syntax error or incompatible types: cannot apply `{op}` to {left} and {right}")]
    IncompatibleTypes {
        op: Operator,
        left: &'static str,
        right: &'static str,
    },

    #[error("type error: {0}")]
    Type(String),

    #[error("unresolvable identifier `{0}`")]
    UnresolvedIdentifier(String),

    #[error("failed to evaluate expression: {0}")]
    Evaluation(String),
}

/// Error taxonomy used by callers to decide how to report a failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Degenerate input or a malformed expression.
    Compile,
    /// An operator applied to an operand of the wrong shape.
    Type,
    /// Anything else raised while producing a value.
    Evaluation,
}

/// An evaluation failure with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Expression text the cursor points into.
    pub expr: Option<Arc<str>>,
    /// Byte offset into `expr`.
    pub cursor: Option<usize>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            expr: None,
            cursor: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            EvalErrorKind::NothingToDo
            | EvalErrorKind::Syntax(_)
            | EvalErrorKind::IncompatibleTypes { .. } => ErrorCategory::Compile,
            EvalErrorKind::Type(_) => ErrorCategory::Type,
            EvalErrorKind::UnresolvedIdentifier(_) | EvalErrorKind::Evaluation(_) => {
                ErrorCategory::Evaluation
            }
        }
    }

    /// Attach a location unless one is already present.
    #[must_use]
    pub fn located(mut self, expr: &str, cursor: usize) -> Self {
        if self.expr.is_none() {
            self.expr = Some(Arc::from(expr));
        }
        if self.cursor.is_none() {
            self.cursor = Some(cursor);
        }
        self
    }

    /// Move a nested pass's location into its enclosing expression.
    ///
    /// `offset` is where the nested text starts in the enclosing text. The
    /// expression is dropped so the enclosing pass attaches its own.
    #[must_use]
    pub(crate) fn lifted(mut self, offset: usize) -> Self {
        self.cursor = Some(self.cursor.unwrap_or(0) + offset);
        self.expr = None;
        self
    }
}

/// Byte offset of nested `inner` text inside `outer`, searching from `from`.
pub(crate) fn nested_offset(outer: &str, from: usize, inner: &str) -> usize {
    outer
        .get(from..)
        .and_then(|rest| rest.find(inner))
        .map_or(from, |pos| from + pos)
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match (&self.expr, self.cursor) {
            (Some(expr), Some(cursor)) => write!(f, " [expr: `{expr}`, offset {cursor}]"),
            (None, Some(cursor)) => write!(f, " [offset {cursor}]"),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<LexError> for EvalError {
    fn from(err: LexError) -> Self {
        let cursor = err.pos();
        let mut error = syntax(err.to_string());
        error.cursor = Some(cursor);
        error
    }
}

impl From<PropertyError> for EvalError {
    fn from(err: PropertyError) -> Self {
        evaluation(err.to_string())
    }
}

// Constructors

pub fn nothing_to_do() -> EvalError {
    EvalError::new(EvalErrorKind::NothingToDo)
}

pub fn syntax(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Syntax(message.into()))
}

pub fn incompatible_types(op: Operator, left: &'static str, right: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::IncompatibleTypes { op, left, right })
}

pub fn type_error(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Type(message.into()))
}

pub fn unresolved_identifier(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UnresolvedIdentifier(name.to_owned()))
}

pub fn evaluation(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Evaluation(message.into()))
}

pub fn incomplete_expression() -> EvalError {
    syntax("incomplete expression")
}

pub fn division_by_zero() -> EvalError {
    evaluation("division by zero")
}
