//! Token compiler.
//!
//! Compiling walks the whole token stream once and records it as a token
//! map that can be replayed without re-tokenizing. Parenthesised groups and
//! list elements are compiled too, recursively, and attached to their token
//! as an accessor, so replaying never touches expression text.
//!
//! A `CompiledExpression` is immutable and `Send + Sync`: any number of
//! evaluations, on any number of threads, may replay it at once, each with
//! its own stack and resolver.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tern_ir::{Token, TokenKind};
use tern_lexer::TokenStream;

use crate::errors::{nested_offset, nothing_to_do, EvalError, EvalResult};
use crate::reducer::TokenSource;

/// Precompiled form of a sub-evaluable token.
#[derive(Clone, Debug)]
pub enum Accessor {
    /// A parenthesised group.
    Expr(Arc<CompiledExpression>),
    /// The elements of a list literal, in order.
    List(Arc<[CompiledExpression]>),
}

/// One entry of a token map.
#[derive(Clone, Debug)]
pub struct TokenNode {
    pub token: Token,
    pub accessor: Option<Accessor>,
}

impl TokenNode {
    pub fn new(token: Token) -> Self {
        TokenNode {
            token,
            accessor: None,
        }
    }

    pub fn set_accessor(&mut self, accessor: Accessor) {
        self.accessor = Some(accessor);
    }
}

/// A compiled token map.
#[derive(Clone, Debug)]
pub struct CompiledExpression {
    source: Arc<str>,
    nodes: Vec<TokenNode>,
}

impl CompiledExpression {
    /// Expression text this map was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[TokenNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replay the token map from the start.
    pub fn iter(&self) -> TokenMapIter<'_> {
        TokenMapIter {
            nodes: &self.nodes,
            pos: 0,
            source: &self.source,
        }
    }
}

impl<'a> IntoIterator for &'a CompiledExpression {
    type Item = &'a TokenNode;
    type IntoIter = TokenMapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", node.token)?;
        }
        Ok(())
    }
}

/// Cursor over a compiled token map.
#[derive(Clone, Debug)]
pub struct TokenMapIter<'t> {
    nodes: &'t [TokenNode],
    pos: usize,
    source: &'t str,
}

impl<'t> Iterator for TokenMapIter<'t> {
    type Item = &'t TokenNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.pos)?;
        self.pos += 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.nodes.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TokenMapIter<'_> {}

impl<'t> TokenSource<'t> for TokenMapIter<'t> {
    fn next_node(&mut self) -> EvalResult<Option<Cow<'t, TokenNode>>> {
        Ok(self.next().map(Cow::Borrowed))
    }

    fn has_more(&self) -> bool {
        self.pos < self.nodes.len()
    }

    fn cursor(&self) -> usize {
        match self.pos.checked_sub(1).and_then(|last| self.nodes.get(last)) {
            Some(node) => node.token.span.end_offset(),
            None => 0,
        }
    }

    fn expr(&self) -> &str {
        self.source
    }
}

/// Compile expression text into a token map.
pub fn compile(expr: &str) -> EvalResult<CompiledExpression> {
    compile_source(Arc::from(expr))
}

/// Compile shared expression text, keeping the `Arc` as the map's source.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub(crate) fn compile_source(source: Arc<str>) -> EvalResult<CompiledExpression> {
    let buffer = Arc::clone(&source);
    let mut stream = TokenStream::new(&buffer);
    let mut nodes = Vec::new();
    loop {
        let token = stream
            .next_token()
            .map_err(|err| EvalError::from(err).located(&source, stream.cursor()))?;
        let Some(token) = token else {
            break;
        };
        let open = token.span.start_offset() + 1;
        let accessor = match &token.kind {
            TokenKind::SubEval(text) => {
                let start = nested_offset(&source, open, text);
                let compiled = compile_nested(text, &source, start)?;
                Some(Accessor::Expr(Arc::new(compiled)))
            }
            TokenKind::List(elements) => {
                let mut compiled = Vec::with_capacity(elements.len());
                let mut from = open;
                for element in &**elements {
                    let start = nested_offset(&source, from, element);
                    from = start + element.len();
                    compiled.push(compile_nested(element, &source, start)?);
                }
                Some(Accessor::List(Arc::from(compiled)))
            }
            _ => None,
        };
        let mut node = TokenNode::new(token);
        if let Some(accessor) = accessor {
            node.set_accessor(accessor);
        }
        nodes.push(node);
    }

    if nodes.is_empty() {
        return Err(nothing_to_do().located(&source, 0));
    }
    tracing::debug!(
        tokens = nodes.len(),
        subevals = nodes.iter().filter(|node| node.token.is_subeval()).count(),
        "compiled"
    );
    Ok(CompiledExpression { source, nodes })
}

/// Compile a group or list element found at `start` in `outer`.
fn compile_nested(text: &Arc<str>, outer: &str, start: usize) -> EvalResult<CompiledExpression> {
    tern_stack::nested_pass(|| compile_source(Arc::clone(text)))
        .map_err(|err| err.lifted(start).located(outer, start))
}
