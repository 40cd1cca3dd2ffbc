//! Trinary reduction: apply operators to the operands on the stack.
//!
//! The stack is reduced while it holds more than one entry. With an
//! operator code on top the layout is `v2 v1 op`; with a value on top it is a
//! junction `v2 op v1`, left behind by a deferred logical operator or a
//! lookahead regrouping.

use tern_ir::{Operator, Value};

use super::{Reducer, TokenSource};
use crate::config::MAX_LOOKAHEAD_RETRIES;
use crate::env::EvalEnv;
use crate::errors::{incompatible_types, syntax, EvalError, EvalResult};
use crate::exec_stack::StackEntry;
use crate::flags::ReduceFlags;
use crate::operators::{apply, Applied, OpFailure};

fn malformed() -> EvalError {
    syntax("malformed expression")
}

impl Reducer<'_> {
    pub(super) fn reduce_trinary<'t>(
        &mut self,
        src: &mut dyn TokenSource<'t>,
        env: &mut EvalEnv<'_>,
    ) -> EvalResult<()> {
        while self.stack.len() > 1 {
            let (op, v1, v2) = self.pop_triple()?;
            tracing::trace!(%op, left = %v2, right = %v1, "trinary");
            match apply(op, v2, v1, self.config.rounding_mode()) {
                Ok(Applied::Push(value)) => self.stack.push(value),
                Ok(Applied::Replace(value)) => {
                    self.stack.clear();
                    self.stack.push(value);
                    return Ok(());
                }
                Ok(Applied::Defer { left, right }) => {
                    self.stack.push3(left, op, right);
                    return Ok(());
                }
                Err(OpFailure::Cast { left, right }) => {
                    return self.lookahead(op, left, right, src, env);
                }
                Err(OpFailure::Fail(err)) => return Err(err),
            }
        }
        Ok(())
    }

    /// Pop `(op, v1, v2)` from either stack layout.
    fn pop_triple(&mut self) -> EvalResult<(Operator, Value, Value)> {
        match self.stack.pop() {
            Some(StackEntry::Op(op)) => {
                let v1 = self.pop_value().ok_or_else(malformed)?;
                let v2 = self.pop_value().ok_or_else(malformed)?;
                Ok((op, v1, v2))
            }
            Some(StackEntry::Value(v1)) => {
                let Some(StackEntry::Op(op)) = self.stack.pop() else {
                    return Err(malformed());
                };
                let v2 = self.pop_value().ok_or_else(malformed)?;
                Ok((op, v1, v2))
            }
            None => Err(malformed()),
        }
    }

    fn pop_value(&mut self) -> Option<Value> {
        match self.stack.pop() {
            Some(StackEntry::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Regroup `left op right` as `left op (right op2 n)` and reduce again.
    ///
    /// Allowed once per pass, and never while a regrouping is being reduced.
    fn lookahead<'t>(
        &mut self,
        op: Operator,
        left: Value,
        right: Value,
        src: &mut dyn TokenSource<'t>,
        env: &mut EvalEnv<'_>,
    ) -> EvalResult<()> {
        let incompatible = incompatible_types(op, left.type_name(), right.type_name());
        if self.flags.contains(ReduceFlags::LOOKAHEAD) || self.retries >= MAX_LOOKAHEAD_RETRIES {
            return Err(incompatible);
        }
        let Some(next) = src.next_node()? else {
            return Err(incompatible);
        };
        let op2 = match next.token.operator() {
            Some(op2) if !op2.is_structural() => op2,
            _ => return Err(incompatible),
        };
        let n = self.next_operand(op2, src, env)?;

        tracing::debug!(%op, %op2, left = %left, right = %right, "regrouping with lookahead");
        self.retries += 1;
        self.stack.push3(left, op, right);
        self.stack.push2(n, op2);
        self.flags.insert(ReduceFlags::LOOKAHEAD);
        let result = self.reduce_trinary(src, env);
        self.flags.remove(ReduceFlags::LOOKAHEAD);
        result
    }
}
