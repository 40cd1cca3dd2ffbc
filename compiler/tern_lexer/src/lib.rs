//! Tokenizer for the Tern expression engine.
//!
//! Tokens are produced lazily: the evaluator pulls one token at a time
//! through `TokenStream::next_token` and may stop early (short-circuit,
//! ternary branches), so the rest of the expression is never tokenized.
//!
//! Two layers:
//! - `RawToken` (logos) recognises the lexical shapes.
//! - `TokenStream` applies the context rules: negative literals, `!`
//!   prefixes, `name =` assignments, projection property names, type names,
//!   and balanced `( )` / `[ ]` groups which become single tokens.

mod lex_error;
mod raw_token;
mod scan;

use std::str::FromStr;
use std::sync::Arc;

use logos::{Lexer, Logos};
use tern_ir::{BigDecimal, Operator, Span, Token, TokenKind, Value, ValueType};

pub use lex_error::LexError;
use raw_token::RawToken;

/// Lazy token source over one expression buffer.
pub struct TokenStream<'src> {
    lexer: Lexer<'src, RawToken>,
    /// Set at the start and after every operator: a `-` here begins a
    /// negative literal rather than a subtraction.
    expect_operand: bool,
    cursor: usize,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        TokenStream {
            lexer: RawToken::lexer(source),
            expect_operand: true,
            cursor: 0,
        }
    }

    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    /// Byte offset just past the last token produced.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if any non-whitespace input remains.
    pub fn has_more(&self) -> bool {
        !self.lexer.remainder().trim().is_empty()
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let mut negated = false;
        let mut first = None;
        loop {
            let Some(raw) = self.lexer.next() else {
                if negated {
                    return Err(LexError::Unexpected {
                        pos: self.source().len(),
                        text: "!".to_owned(),
                    });
                }
                return Ok(None);
            };
            let range = self.lexer.span();
            let raw = raw.map_err(|()| self.raw_error(range.start))?;
            let start = *first.get_or_insert(range.start);

            if raw == RawToken::Bang {
                negated = !negated;
                continue;
            }

            let kind = self.cook(raw, range.start)?;
            if negated && matches!(kind, TokenKind::Operator(_) | TokenKind::Assign(_)) {
                return Err(LexError::Unexpected {
                    pos: start,
                    text: "!".to_owned(),
                });
            }

            let end = self.lexer.span().end;
            let span = Span::try_from_range(start..end)
                .map_err(|_| LexError::TooLarge { pos: start })?;
            self.cursor = end;
            self.expect_operand = matches!(kind, TokenKind::Operator(_) | TokenKind::Assign(_));

            let mut token = Token::new(kind, span);
            token.negated = negated;
            return Ok(Some(token));
        }
    }

    /// Apply the context rules to one raw token.
    fn cook(&mut self, raw: RawToken, pos: usize) -> Result<TokenKind, LexError> {
        let slice = self.lexer.slice();
        let kind = match raw {
            RawToken::True => TokenKind::Literal(Value::Bool(true)),
            RawToken::False => TokenKind::Literal(Value::Bool(false)),
            RawToken::Null => TokenKind::Literal(Value::Null),
            RawToken::This => TokenKind::This,
            RawToken::Int | RawToken::Decimal => TokenKind::Literal(number(slice)),
            RawToken::DoubleString | RawToken::SingleString => {
                TokenKind::Literal(Value::string(scan::unescape(slice)))
            }
            RawToken::Path => self.cook_path(slice),
            RawToken::Minus if self.expect_operand => match self.peek() {
                Some(RawToken::Int | RawToken::Decimal) => {
                    self.lexer.next();
                    let literal = format!("-{}", self.lexer.slice());
                    TokenKind::Literal(number(&literal))
                }
                _ => TokenKind::Operator(Operator::Sub),
            },
            RawToken::LParen => {
                let inner = self.group(b')', '(', pos)?;
                TokenKind::SubEval(Arc::from(inner.trim()))
            }
            RawToken::LBracket => {
                let inner = self.group(b']', '[', pos)?;
                let elements: Vec<Arc<str>> = scan::split_elements(inner)
                    .into_iter()
                    .map(Arc::from)
                    .collect();
                TokenKind::List(Arc::from(elements))
            }
            RawToken::RParen
            | RawToken::RBracket
            | RawToken::Comma
            | RawToken::Eq
            | RawToken::Bang => {
                return Err(LexError::Unexpected {
                    pos,
                    text: slice.to_owned(),
                })
            }
            other => match other.operator() {
                Some(op) => TokenKind::Operator(op),
                None => {
                    return Err(LexError::Unexpected {
                        pos,
                        text: slice.to_owned(),
                    })
                }
            },
        };
        Ok(kind)
    }

    fn cook_path(&mut self, path: &'src str) -> TokenKind {
        let simple = !path.contains('.');
        if simple {
            if let Some(op) = Operator::from_symbol(path).filter(|op| op.is_keyword()) {
                return TokenKind::Operator(op);
            }
        }
        match self.peek() {
            Some(RawToken::Eq) => {
                self.lexer.next();
                return TokenKind::Assign(Arc::from(path));
            }
            Some(RawToken::Path) if self.peek_slice() == Some("in") => {
                return TokenKind::Literal(Value::string(path));
            }
            _ => {}
        }
        if simple {
            if let Some(ty) = ValueType::from_name(path) {
                return TokenKind::Literal(Value::Type(ty));
            }
        }
        TokenKind::Identifier(Arc::from(path))
    }

    /// Consume a balanced group whose opener was just read; returns its contents.
    fn group(&mut self, close: u8, open: char, pos: usize) -> Result<&'src str, LexError> {
        let rest = self.lexer.remainder();
        let idx = scan::find_close(rest, close).ok_or(LexError::Unclosed { open, pos })?;
        self.lexer.bump(idx + 1);
        Ok(&rest[..idx])
    }

    fn peek(&self) -> Option<RawToken> {
        self.lexer.clone().next().and_then(Result::ok)
    }

    fn peek_slice(&self) -> Option<&'src str> {
        let mut probe = self.lexer.clone();
        probe.next().map(|_| probe.slice())
    }

    fn raw_error(&self, pos: usize) -> LexError {
        let text = self.lexer.slice();
        if text.starts_with(|c| c == '\'' || c == '"') {
            LexError::UnterminatedString { pos }
        } else {
            LexError::UnexpectedChar {
                pos,
                text: text.to_owned(),
            }
        }
    }
}

/// Integer literals that fit `i64` stay integers; everything else is decimal.
fn number(text: &str) -> Value {
    if let Ok(i) = text.parse::<i64>() {
        return Value::Int(i);
    }
    match BigDecimal::from_str(text) {
        Ok(d) => Value::Decimal(d),
        Err(_) => Value::string(text),
    }
}

/// Tokenize a whole expression.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut stream = TokenStream::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = stream.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
