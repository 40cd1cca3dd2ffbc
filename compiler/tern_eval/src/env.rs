//! Evaluation environment.

use tern_ir::Value;

use crate::resolver::VariableResolver;

/// What one evaluation reads from and writes to.
///
/// `ctx` answers identifiers the resolver does not know; `this` is the value
/// of the `this` keyword. The resolver is borrowed mutably because
/// assignments write through it.
pub struct EvalEnv<'a> {
    pub ctx: &'a Value,
    pub this: &'a Value,
    pub resolver: &'a mut dyn VariableResolver,
}

impl<'a> EvalEnv<'a> {
    /// Environment whose `this` is the context object.
    pub fn new(ctx: &'a Value, resolver: &'a mut dyn VariableResolver) -> Self {
        EvalEnv {
            ctx,
            this: ctx,
            resolver,
        }
    }

    #[must_use]
    pub fn with_this(mut self, this: &'a Value) -> Self {
        self.this = this;
        self
    }
}
