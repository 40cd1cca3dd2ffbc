//! Compiled statements built from expressions.

use tern_ir::{Operator, Value};
use tern_lexer::tokenize;

use crate::compiler::{compile, CompiledExpression};
use crate::engine::Engine;
use crate::env::EvalEnv;
use crate::errors::{syntax, type_error, EvalError, EvalResult};
use crate::resolver::ChainedResolver;

/// `for (init; condition; after) { body }`.
///
/// Each part is compiled once. The loop runs in its own variable scope:
/// names first assigned by the loop stay local to it, while assignments to
/// names the caller's resolver already knows write through.
#[derive(Clone, Debug)]
pub struct ForLoop {
    init: Option<CompiledExpression>,
    condition: CompiledExpression,
    after: Option<CompiledExpression>,
    body: Option<CompiledExpression>,
}

impl ForLoop {
    /// Compile a loop from its header (`init; condition; after`) and body.
    ///
    /// `init`, `after` and the body may be empty; the condition may not.
    pub fn compile(header: &str, body: &str) -> EvalResult<ForLoop> {
        let parts = split_header(header)?;
        let [init, condition, after] = parts.as_slice() else {
            return Err(syntax(format!(
                "`for` header needs `init; condition; after`, found {} part(s)",
                parts.len()
            )));
        };
        if condition.trim().is_empty() {
            return Err(syntax("`for` header is missing its condition"));
        }
        Ok(ForLoop {
            init: compile_part(init)?,
            condition: compile(condition)?,
            after: compile_part(after)?,
            body: compile_part(body)?,
        })
    }

    /// Run the loop. Its value is always `null`.
    pub fn execute(&self, engine: &Engine, env: &mut EvalEnv<'_>) -> EvalResult {
        let mut scope = ChainedResolver::new(&mut *env.resolver);
        let mut local = EvalEnv {
            ctx: env.ctx,
            this: env.this,
            resolver: &mut scope,
        };

        if let Some(init) = &self.init {
            engine.execute_in(init, &mut local)?;
        }
        let mut iterations = 0u64;
        loop {
            match engine.execute_in(&self.condition, &mut local)? {
                Value::Bool(true) => {}
                Value::Bool(false) => break,
                other => {
                    return Err(type_error(format!(
                        "loop condition must be a boolean, found {}",
                        other.type_name()
                    )))
                }
            }
            if let Some(body) = &self.body {
                engine.execute_in(body, &mut local)?;
            }
            if let Some(after) = &self.after {
                engine.execute_in(after, &mut local)?;
            }
            iterations += 1;
        }
        tracing::debug!(iterations, "for loop finished");
        Ok(Value::Null)
    }
}

fn compile_part(text: &str) -> EvalResult<Option<CompiledExpression>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    compile(text).map(Some)
}

/// Split at top-level `;`. Groups and strings are single tokens, so their
/// semicolons never split.
fn split_header(header: &str) -> EvalResult<Vec<&str>> {
    let tokens = tokenize(header).map_err(|err| EvalError::from(err).located(header, 0))?;
    let mut parts = Vec::with_capacity(3);
    let mut start = 0;
    for token in tokens
        .iter()
        .filter(|token| token.is_operator_of(Operator::EndOfStatement))
    {
        parts.push(&header[start..token.span.start_offset()]);
        start = token.span.end_offset();
    }
    parts.push(&header[start..]);
    Ok(parts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
