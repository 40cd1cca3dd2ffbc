//! Stack-reduction evaluator.
//!
//! One `Reducer` drives one evaluation pass over a token source. It never
//! builds a tree: operands are pushed onto the execution stack, and every
//! operator read is first offered to the binary reducer (short-circuit,
//! ternary, statement boundaries) and otherwise combined with the next
//! operand by the trinary reducer.
//!
//! Tokens come either straight from the tokenizer or from a compiled token
//! map; both are a `TokenSource`. Nested passes (parenthesised groups, list
//! elements, assignment right-hand sides) each get their own reducer and
//! stack, and run under `tern_stack::nested_pass`.

mod binary;
mod trinary;

use std::borrow::Cow;
use std::mem;

use tern_ir::{Operator, TokenKind, Value};
use tern_lexer::TokenStream;

use crate::compiler::{Accessor, TokenNode};
use crate::config::EvalConfig;
use crate::env::EvalEnv;
use crate::errors::{
    incomplete_expression, nested_offset, nothing_to_do, syntax, type_error, EvalResult,
};
use crate::exec_stack::{ExecutionStack, StackEntry};
use crate::flags::ReduceFlags;
use crate::property::{get_property, resolve_identifier};

/// Ordered tokens consumed by one reduction pass.
pub(crate) trait TokenSource<'t> {
    /// Next token, or `None` at end of input.
    fn next_node(&mut self) -> EvalResult<Option<Cow<'t, TokenNode>>>;

    /// Check if any token remains.
    fn has_more(&self) -> bool;

    /// Byte offset just past the last token consumed.
    fn cursor(&self) -> usize;

    /// Expression text the cursor points into.
    fn expr(&self) -> &str;
}

impl<'t> TokenSource<'t> for TokenStream<'_> {
    fn next_node(&mut self) -> EvalResult<Option<Cow<'t, TokenNode>>> {
        let token = self.next_token()?;
        Ok(token.map(|token| Cow::Owned(TokenNode::new(token))))
    }

    fn has_more(&self) -> bool {
        TokenStream::has_more(self)
    }

    fn cursor(&self) -> usize {
        TokenStream::cursor(self)
    }

    fn expr(&self) -> &str {
        self.source()
    }
}

/// Outcome of offering an operator to the binary reducer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Signal {
    /// Stop this pass; the stack top is its value.
    Abort,
    /// The operator was handled; read the next token.
    Continue,
    /// Not handled here; combine with the next operand.
    Fallthrough,
}

pub(crate) struct Reducer<'c> {
    stack: ExecutionStack,
    flags: ReduceFlags,
    config: &'c EvalConfig,
    /// Lookahead regroupings spent by this pass and the assignment passes it spawned.
    retries: u8,
    /// An assignment pass below this one stopped at `;`.
    closed_statement: bool,
    /// At least one operand was reduced.
    seen_operand: bool,
}

/// Evaluate a whole expression, applying the configured result coercions.
pub(crate) fn evaluate<'t>(
    src: &mut dyn TokenSource<'t>,
    config: &EvalConfig,
    env: &mut EvalEnv<'_>,
) -> EvalResult {
    let mut flags = ReduceFlags::empty();
    flags.set(ReduceFlags::BOOLEAN_MODE, config.is_boolean_mode());
    Reducer::new(config, flags).run(src, env)
}

/// Evaluate a nested expression: a group, list element or compiled sub-expression.
pub(crate) fn evaluate_nested<'t>(
    src: &mut dyn TokenSource<'t>,
    config: &EvalConfig,
    env: &mut EvalEnv<'_>,
) -> EvalResult {
    tern_stack::nested_pass(|| Reducer::new(config, ReduceFlags::empty()).run(src, env))
}

/// Tokenize and evaluate nested expression text.
fn interpret(text: &str, config: &EvalConfig, env: &mut EvalEnv<'_>) -> EvalResult {
    if text.trim().is_empty() {
        return Err(nothing_to_do());
    }
    evaluate_nested(&mut TokenStream::new(text), config, env)
}

impl<'c> Reducer<'c> {
    pub(crate) fn new(config: &'c EvalConfig, flags: ReduceFlags) -> Self {
        Reducer {
            stack: ExecutionStack::new(),
            flags,
            config,
            retries: 0,
            closed_statement: false,
            seen_operand: false,
        }
    }

    /// Reduce the source and return the pass's value.
    pub(crate) fn run<'t>(
        &mut self,
        src: &mut dyn TokenSource<'t>,
        env: &mut EvalEnv<'_>,
    ) -> EvalResult {
        self.reduce(src, env)
            .and_then(|()| self.egress())
            .map_err(|err| err.located(src.expr(), src.cursor()))
    }

    /// Main loop: consume tokens until the source is exhausted or a pass boundary aborts.
    fn reduce<'t>(&mut self, src: &mut dyn TokenSource<'t>, env: &mut EvalEnv<'_>) -> EvalResult<()> {
        while let Some(node) = src.next_node()? {
            let Some(op) = node.token.operator() else {
                if self.stack.peek_value().is_some() {
                    return Err(syntax(format!(
                        "unexpected `{}` after a complete operand",
                        node.token
                    )));
                }
                let value = self.reduce_operand(&node, src, env)?;
                self.stack.push(value);
                self.seen_operand = true;
                if self.settle(src)? == Signal::Abort {
                    return Ok(());
                }
                continue;
            };

            if self.stack.peek_value().is_none() {
                if op == Operator::EndOfStatement && !self.flags.contains(ReduceFlags::ASSIGN) {
                    continue;
                }
                return Err(syntax(format!("missing operand before `{op}`")));
            }

            match self.reduce_binary(op, src)? {
                Signal::Abort => return Ok(()),
                Signal::Continue => {}
                Signal::Fallthrough => {
                    let value = self.next_operand(op, src, env)?;
                    self.stack.push2(value, op);
                    self.reduce_trinary(src, env)?;
                    if self.settle(src)? == Signal::Abort {
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    /// Close the statement an assignment pass stopped at, if any.
    fn settle<'t>(&mut self, src: &dyn TokenSource<'t>) -> EvalResult<Signal> {
        if mem::take(&mut self.closed_statement) {
            self.end_statement(src)
        } else {
            Ok(Signal::Continue)
        }
    }

    /// Read the operand to the right of `op`.
    fn next_operand<'t>(
        &mut self,
        op: Operator,
        src: &mut dyn TokenSource<'t>,
        env: &mut EvalEnv<'_>,
    ) -> EvalResult {
        let Some(node) = src.next_node()? else {
            return Err(syntax(format!("missing operand after `{op}`")));
        };
        if node.token.is_operator() {
            return Err(syntax(format!("unexpected `{}` after `{op}`", node.token)));
        }
        self.reduce_operand(&node, src, env)
    }

    /// Reduce one operand token to its value.
    fn reduce_operand<'t>(
        &mut self,
        node: &TokenNode,
        src: &mut dyn TokenSource<'t>,
        env: &mut EvalEnv<'_>,
    ) -> EvalResult {
        let token = &node.token;
        let value = match &token.kind {
            TokenKind::Literal(value) => value.clone(),
            TokenKind::Identifier(path) => match path.strip_prefix("this.") {
                Some(rest) => get_property(rest, env.this)?,
                None => resolve_identifier(path, env.ctx, &*env.resolver)?,
            },
            TokenKind::This => env.this.clone(),
            TokenKind::SubEval(text) => {
                let result = match &node.accessor {
                    Some(Accessor::Expr(compiled)) => {
                        evaluate_nested(&mut compiled.iter(), self.config, env)
                    }
                    _ => interpret(text, self.config, env),
                };
                let open = token.span.start_offset() + 1;
                result.map_err(|err| err.lifted(nested_offset(src.expr(), open, text)))?
            }
            TokenKind::List(elements) => {
                let compiled = match &node.accessor {
                    Some(Accessor::List(compiled)) => Some(compiled),
                    _ => None,
                };
                let mut items = Vec::with_capacity(elements.len());
                let mut from = token.span.start_offset() + 1;
                for (i, element) in elements.iter().enumerate() {
                    let start = nested_offset(src.expr(), from, element);
                    from = start + element.len();
                    let result = match compiled.and_then(|compiled| compiled.get(i)) {
                        Some(map) => evaluate_nested(&mut map.iter(), self.config, env),
                        None => interpret(element, self.config, env),
                    };
                    items.push(result.map_err(|err| err.lifted(start))?);
                }
                Value::list(items)
            }
            TokenKind::Assign(name) => self.assign(name, src, env)?,
            TokenKind::Operator(op) => {
                return Err(syntax(format!("expected an operand, found `{op}`")));
            }
        };

        if !token.negated {
            return Ok(value);
        }
        match value {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(type_error(format!(
                "`!` applies to booleans, found {}",
                other.type_name()
            ))),
        }
    }

    /// Reduce the rest of the statement as the value of `name` and assign it.
    fn assign<'t>(
        &mut self,
        name: &str,
        src: &mut dyn TokenSource<'t>,
        env: &mut EvalEnv<'_>,
    ) -> EvalResult {
        let mut nested = Reducer {
            stack: ExecutionStack::new(),
            flags: ReduceFlags::ASSIGN,
            config: self.config,
            retries: self.retries,
            closed_statement: false,
            seen_operand: false,
        };
        tern_stack::nested_pass(|| nested.reduce(src, env))?;
        self.retries = nested.retries;
        self.closed_statement = nested.closed_statement;

        if nested.stack.len() > 1 {
            return Err(incomplete_expression());
        }
        let Some(value) = nested.stack.peek_value().cloned() else {
            return Err(syntax(format!("missing value for assignment to `{name}`")));
        };
        tracing::debug!(name, %value, "assign");
        env.resolver.assign(name, value.clone());
        Ok(value)
    }

    /// Final value of the pass.
    ///
    /// The stack must hold at most the one reduced value; anything more is a
    /// junction that never found its right-hand side.
    fn egress(&self) -> EvalResult {
        if !self.seen_operand {
            return Err(nothing_to_do());
        }
        if self.stack.len() > 1 {
            return Err(incomplete_expression());
        }
        let value = match self.stack.peek() {
            Some(StackEntry::Value(value)) => value.clone(),
            _ => Value::Null,
        };
        Ok(if self.flags.contains(ReduceFlags::BOOLEAN_MODE) {
            Value::Bool(value.truthiness())
        } else if self.config.is_return_decimal() {
            value
        } else {
            value.narrow()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
