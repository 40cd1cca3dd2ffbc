//! Operator codes.
//!
//! Every operator the reducers understand, including the statement-level
//! markers (`?`, `:`, `;`) the binary reducer uses to decide where a
//! statement or branch ends.

use std::fmt;

/// Operator code carried by operator tokens and stored on the execution stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,

    // Logical
    And,
    Or,
    /// Coalesce: first non-empty operand.
    Chor,

    // Matching
    Regex,
    InstanceOf,
    ConvertibleTo,
    Contains,
    Soundex,
    Similarity,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    /// Unsigned shift left: the left operand is made non-negative first.
    UShl,
    Shr,
    UShr,

    // Strings and collections
    StrAppend,
    Projection,

    // Statement structure
    Ternary,
    TernaryElse,
    EndOfStatement,
}

impl Operator {
    /// Source symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::GtEq => ">=",
            Operator::LtEq => "<=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Chor => "or",
            Operator::Regex => "~=",
            Operator::InstanceOf => "instanceof",
            Operator::ConvertibleTo => "convertable_to",
            Operator::Contains => "contains",
            Operator::Soundex => "soundslike",
            Operator::Similarity => "strsim",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::BitXor => "^",
            Operator::Shl => "<<",
            Operator::UShl => "<<<",
            Operator::Shr => ">>",
            Operator::UShr => ">>>",
            Operator::StrAppend => "#",
            Operator::Projection => "in",
            Operator::Ternary => "?",
            Operator::TernaryElse => ":",
            Operator::EndOfStatement => ";",
        }
    }

    /// Look up an operator by its source symbol or keyword.
    ///
    /// `is` is accepted as an alias of `instanceof`.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        let op = match symbol {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" => Operator::Div,
            "%" => Operator::Mod,
            "==" => Operator::Eq,
            "!=" => Operator::NotEq,
            ">" => Operator::Gt,
            "<" => Operator::Lt,
            ">=" => Operator::GtEq,
            "<=" => Operator::LtEq,
            "&&" => Operator::And,
            "||" => Operator::Or,
            "or" => Operator::Chor,
            "~=" => Operator::Regex,
            "instanceof" | "is" => Operator::InstanceOf,
            "convertable_to" => Operator::ConvertibleTo,
            "contains" => Operator::Contains,
            "soundslike" => Operator::Soundex,
            "strsim" => Operator::Similarity,
            "&" => Operator::BitAnd,
            "|" => Operator::BitOr,
            "^" => Operator::BitXor,
            "<<" => Operator::Shl,
            "<<<" => Operator::UShl,
            ">>" => Operator::Shr,
            ">>>" => Operator::UShr,
            "#" => Operator::StrAppend,
            "in" => Operator::Projection,
            "?" => Operator::Ternary,
            ":" => Operator::TernaryElse,
            ";" => Operator::EndOfStatement,
            _ => return None,
        };
        Some(op)
    }

    /// Check if this is a word operator (`contains`, `instanceof`, ...).
    ///
    /// Word operators are only recognised as whole identifiers by the tokenizer.
    pub fn is_keyword(self) -> bool {
        self.as_symbol().starts_with(|c: char| c.is_ascii_alphabetic())
    }

    /// Check if this operator only ever appears at statement structure
    /// boundaries and is handled entirely by the binary reducer.
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Operator::Ternary | Operator::TernaryElse | Operator::EndOfStatement
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
