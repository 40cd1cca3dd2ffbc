//! Lexer error types.

use thiserror::Error;

/// A tokenization failure, located by byte offset into the expression.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character `{text}` at {pos}")]
    UnexpectedChar { pos: usize, text: String },

    #[error("unterminated string literal starting at {pos}")]
    UnterminatedString { pos: usize },

    #[error("unclosed `{open}` opened at {pos}")]
    Unclosed { open: char, pos: usize },

    #[error("unexpected `{text}` at {pos}")]
    Unexpected { pos: usize, text: String },

    #[error("expression too large: offset {pos} exceeds the span range")]
    TooLarge { pos: usize },
}

impl LexError {
    /// Byte offset of the failure.
    pub fn pos(&self) -> usize {
        match self {
            LexError::UnexpectedChar { pos, .. }
            | LexError::UnterminatedString { pos }
            | LexError::Unclosed { pos, .. }
            | LexError::Unexpected { pos, .. }
            | LexError::TooLarge { pos } => *pos,
        }
    }
}
