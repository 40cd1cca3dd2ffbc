//! Evaluation entry points.

use tern_ir::Value;
use tern_lexer::TokenStream;

use crate::cache::{self, CacheStats, ExpressionCache};
use crate::compiler::{compile_source, CompiledExpression};
use crate::config::{CacheMode, EvalConfig};
use crate::env::EvalEnv;
use crate::errors::{nothing_to_do, EvalResult};
use crate::reducer::evaluate;
use crate::resolver::VariableResolver;

enum CacheHandle {
    Local(ExpressionCache),
    Shared,
}

impl CacheHandle {
    fn get(&self) -> &ExpressionCache {
        match self {
            CacheHandle::Local(cache) => cache,
            CacheHandle::Shared => cache::shared(),
        }
    }
}

/// Expression engine: configuration plus an expression cache.
///
/// An engine is `Send + Sync` and holds no per-evaluation state; every
/// call gets its own execution stack.
pub struct Engine {
    config: EvalConfig,
    cache: CacheHandle,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EvalConfig::default())
    }
}

impl Engine {
    pub fn new(config: EvalConfig) -> Self {
        let cache = match config.cache() {
            CacheMode::Local(capacity) => CacheHandle::Local(ExpressionCache::new(capacity)),
            CacheMode::Shared => CacheHandle::Shared,
        };
        Engine { config, cache }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate `expr` with `ctx` as both the context object and `this`.
    pub fn eval(
        &self,
        expr: &str,
        ctx: &Value,
        resolver: &mut dyn VariableResolver,
    ) -> EvalResult {
        self.eval_in(expr, &mut EvalEnv::new(ctx, resolver))
    }

    #[tracing::instrument(level = "debug", skip(self, env))]
    pub fn eval_in(&self, expr: &str, env: &mut EvalEnv<'_>) -> EvalResult {
        let buffer = self.cache.get().buffer(expr);
        if buffer.trim_start().is_empty() {
            return Err(nothing_to_do().located(expr, 0));
        }
        evaluate(&mut TokenStream::new(&buffer), &self.config, env)
    }

    /// Compile `expr` into a reusable token map.
    pub fn compile(&self, expr: &str) -> EvalResult<CompiledExpression> {
        compile_source(self.cache.get().buffer(expr))
    }

    /// Evaluate a compiled expression with `ctx` as both the context object and `this`.
    pub fn execute(
        &self,
        compiled: &CompiledExpression,
        ctx: &Value,
        resolver: &mut dyn VariableResolver,
    ) -> EvalResult {
        self.execute_in(compiled, &mut EvalEnv::new(ctx, resolver))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(expr = compiled.source()))]
    pub fn execute_in(&self, compiled: &CompiledExpression, env: &mut EvalEnv<'_>) -> EvalResult {
        evaluate(&mut compiled.iter(), &self.config, env)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.get().stats()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
