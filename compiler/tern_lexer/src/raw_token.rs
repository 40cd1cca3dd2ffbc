//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived output before the context rules
//! of `TokenStream` (negative literals, assignments, groups) are applied.

use logos::Logos;
use tern_ir::Operator;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("this")]
    This,

    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+")]
    Decimal,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleString,
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleString,

    /// Identifier or dotted property path. Word operators are split out later.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*(\.[a-zA-Z_$][a-zA-Z0-9_$]*)*")]
    Path,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,

    // Logical / matching
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("~=")]
    Tilde,

    // Bitwise
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token("<<<")]
    UShl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,

    #[token("#")]
    Hash,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,

    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
}

impl RawToken {
    /// Operator code for symbolic operators. Word operators arrive as `Path`.
    pub(crate) fn operator(self) -> Option<Operator> {
        let op = match self {
            RawToken::Plus => Operator::Add,
            RawToken::Minus => Operator::Sub,
            RawToken::Star => Operator::Mul,
            RawToken::Slash => Operator::Div,
            RawToken::Percent => Operator::Mod,
            RawToken::EqEq => Operator::Eq,
            RawToken::NotEq => Operator::NotEq,
            RawToken::Gt => Operator::Gt,
            RawToken::Lt => Operator::Lt,
            RawToken::GtEq => Operator::GtEq,
            RawToken::LtEq => Operator::LtEq,
            RawToken::AndAnd => Operator::And,
            RawToken::OrOr => Operator::Or,
            RawToken::Tilde => Operator::Regex,
            RawToken::Amp => Operator::BitAnd,
            RawToken::Pipe => Operator::BitOr,
            RawToken::Caret => Operator::BitXor,
            RawToken::Shl => Operator::Shl,
            RawToken::UShl => Operator::UShl,
            RawToken::Shr => Operator::Shr,
            RawToken::UShr => Operator::UShr,
            RawToken::Hash => Operator::StrAppend,
            RawToken::Question => Operator::Ternary,
            RawToken::Colon => Operator::TernaryElse,
            RawToken::Semi => Operator::EndOfStatement,
            _ => return None,
        };
        Some(op)
    }
}
