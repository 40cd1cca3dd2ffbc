//! Tokens produced by the tokenizer and replayed by compiled token maps.

use std::fmt;
use std::sync::Arc;

use crate::{Operator, Span, Value};

/// What a token is.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Operator(Operator),
    /// Literal value, already typed by the tokenizer.
    Literal(Value),
    /// Dotted property path, resolved against the variables and the context.
    Identifier(Arc<str>),
    /// The `this` value.
    This,
    /// Parenthesised sub-expression, without the parentheses.
    SubEval(Arc<str>),
    /// Bracketed list literal; each element is an expression.
    List(Arc<[Arc<str>]>),
    /// `name =` assignment target. The assigned value is the rest of the statement.
    Assign(Arc<str>),
}

/// A token and its location in the expression buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Prefix `!`: the reduced value is logically negated.
    pub negated: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            span,
            negated: false,
        }
    }

    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    #[inline]
    pub fn is_operator(&self) -> bool {
        matches!(self.kind, TokenKind::Operator(_))
    }

    #[inline]
    pub fn is_operator_of(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator(op)
    }

    /// Operator code, if this is an operator token.
    #[inline]
    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Check if this token holds text that is evaluated as its own expression.
    pub fn is_subeval(&self) -> bool {
        matches!(self.kind, TokenKind::SubEval(_) | TokenKind::List(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        match &self.kind {
            TokenKind::Operator(op) => write!(f, "{op}"),
            TokenKind::Literal(Value::Str(s)) => write!(f, "'{s}'"),
            TokenKind::Literal(v) => write!(f, "{v}"),
            TokenKind::Identifier(path) => f.write_str(path),
            TokenKind::This => f.write_str("this"),
            TokenKind::SubEval(text) => write!(f, "({text})"),
            TokenKind::List(items) => write!(f, "[{}]", items.join(", ")),
            TokenKind::Assign(name) => write!(f, "{name} ="),
        }
    }
}

#[cfg(test)]
mod tests;
