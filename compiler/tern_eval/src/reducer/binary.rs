//! Binary reduction: the decisions taken before an operator is combined.
//!
//! `&&` and `||` short-circuit by unwinding the rest of the statement
//! without reducing it. `?` pops its condition and either keeps reading the
//! then-branch or skips to the matching `:`. `:` and `;` mark statement
//! boundaries. Every other operator falls through to trinary reduction.

use tern_ir::{Operator, Value};

use super::{Reducer, Signal, TokenSource};
use crate::errors::{incomplete_expression, syntax, type_error, EvalResult};
use crate::exec_stack::StackEntry;
use crate::flags::ReduceFlags;

impl Reducer<'_> {
    pub(super) fn reduce_binary<'t>(
        &mut self,
        op: Operator,
        src: &mut dyn TokenSource<'t>,
    ) -> EvalResult<Signal> {
        tracing::trace!(%op, depth = self.stack.len(), "binary");
        match op {
            Operator::And | Operator::Or => {
                // `false &&` and `true ||` decide the statement.
                let decided = matches!(
                    self.stack.peek_value(),
                    Some(Value::Bool(b)) if *b == (op == Operator::Or)
                );
                if decided {
                    return self.skip_statement(src);
                }
                self.stack.discard();
                Ok(Signal::Continue)
            }
            Operator::Ternary => match self.stack.pop() {
                Some(StackEntry::Value(Value::Bool(true))) => Ok(Signal::Continue),
                Some(StackEntry::Value(Value::Bool(false))) => {
                    self.stack.clear();
                    self.skip_else(src)
                }
                Some(StackEntry::Value(other)) => Err(type_error(format!(
                    "ternary condition must be a boolean, found {}",
                    other.type_name()
                ))),
                _ => Err(syntax("missing ternary condition")),
            },
            // Reached after a then-branch: the else-branch is never reduced.
            Operator::TernaryElse => self.skip_statement(src),
            Operator::EndOfStatement => self.end_statement(src),
            _ => Ok(Signal::Fallthrough),
        }
    }

    /// Statement boundary.
    ///
    /// An assignment pass stops here and leaves the value to its caller.
    /// Otherwise the statement's value is dropped when another statement
    /// follows, and kept as the result when this was the last one. A
    /// statement that did not reduce to one value is an error either way.
    pub(super) fn end_statement<'t>(&mut self, src: &dyn TokenSource<'t>) -> EvalResult<Signal> {
        if self.stack.len() > 1 {
            return Err(incomplete_expression());
        }
        if self.flags.contains(ReduceFlags::ASSIGN) {
            self.closed_statement = true;
            return Ok(Signal::Abort);
        }
        if src.has_more() {
            self.stack.clear();
        }
        Ok(Signal::Continue)
    }

    /// Unwind to the end of the statement without reducing anything.
    fn skip_statement<'t>(&mut self, src: &mut dyn TokenSource<'t>) -> EvalResult<Signal> {
        while let Some(node) = src.next_node()? {
            if node.token.is_operator_of(Operator::EndOfStatement) {
                return self.end_statement(src);
            }
        }
        Ok(Signal::Abort)
    }

    /// Skip a then-branch up to its `:`, stepping over nested ternaries.
    fn skip_else<'t>(&mut self, src: &mut dyn TokenSource<'t>) -> EvalResult<Signal> {
        let mut depth = 0usize;
        while let Some(node) = src.next_node()? {
            match node.token.operator() {
                Some(Operator::Ternary) => depth += 1,
                Some(Operator::TernaryElse) if depth == 0 => return Ok(Signal::Continue),
                Some(Operator::TernaryElse) => depth -= 1,
                Some(Operator::EndOfStatement) => return self.end_statement(src),
                _ => {}
            }
        }
        Ok(Signal::Abort)
    }
}
