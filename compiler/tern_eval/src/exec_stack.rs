//! Execution stack.
//!
//! LIFO working area of one reduction pass. Entries are either resolved
//! values or operator codes held between two operands. A reduction cycle
//! touches at most three slots, so the inline capacity covers every
//! well-formed statement without allocating.

use smallvec::SmallVec;
use tern_ir::{Operator, Value};

/// One slot on the execution stack.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum StackEntry {
    Value(Value),
    Op(Operator),
}

impl From<Value> for StackEntry {
    fn from(value: Value) -> Self {
        StackEntry::Value(value)
    }
}

impl From<Operator> for StackEntry {
    fn from(op: Operator) -> Self {
        StackEntry::Op(op)
    }
}

#[derive(Default, Debug)]
pub(crate) struct ExecutionStack {
    entries: SmallVec<[StackEntry; 8]>,
}

impl ExecutionStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, entry: impl Into<StackEntry>) {
        self.entries.push(entry.into());
    }

    /// Push two entries; `b` ends up on top.
    #[inline]
    pub(crate) fn push2(&mut self, a: impl Into<StackEntry>, b: impl Into<StackEntry>) {
        self.entries.push(a.into());
        self.entries.push(b.into());
    }

    /// Push three entries; `c` ends up on top.
    #[inline]
    pub(crate) fn push3(
        &mut self,
        a: impl Into<StackEntry>,
        b: impl Into<StackEntry>,
        c: impl Into<StackEntry>,
    ) {
        self.entries.push(a.into());
        self.entries.push(b.into());
        self.entries.push(c.into());
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// Top entry if it is a value.
    #[inline]
    pub(crate) fn peek_value(&self) -> Option<&Value> {
        match self.entries.last() {
            Some(StackEntry::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Drop the top entry.
    #[inline]
    pub(crate) fn discard(&mut self) {
        self.entries.pop();
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
