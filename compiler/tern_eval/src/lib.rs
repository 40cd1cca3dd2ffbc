//! Tern Eval - stack-reduction evaluator for the Tern expression engine.
//!
//! Expressions are evaluated in a single pass over their tokens, without a
//! parse tree. Operands go onto an execution stack; each operator is first
//! offered to the binary reducer, which implements short-circuit `&&`/`||`,
//! ternary branching and statement boundaries, and otherwise combined with
//! the next operand by the trinary reducer.
//!
//! # Architecture
//!
//! - `Engine`: entry points (`eval`, `compile`, `execute`) plus the expression cache
//! - `reducer`: the evaluator loop, binary and trinary reduction
//! - `operators`: operator semantics and numeric promotion
//! - `compiler`: token maps replayable without re-tokenizing
//! - `cache`: expression text to trimmed buffer, local or process-wide
//! - `resolver`: variable lookup and assignment
//! - `statement`: compiled `for` loops
//!
//! # Example
//!
//! ```text
//! let engine = Engine::default();
//! let mut vars = MapResolver::new();
//! vars.insert("a", 5i64);
//! let value = engine.eval("a * 2 > 8", &Value::Null, &mut vars)?;
//! assert_eq!(value, Value::Bool(true));
//! ```

pub mod cache;
mod compiler;
mod config;
mod engine;
mod env;
pub mod errors;
mod exec_stack;
mod flags;
mod operators;
pub mod property;
mod reducer;
mod resolver;
mod statement;
mod text_match;

pub use cache::{CacheStats, ExpressionCache};
pub use compiler::{compile, Accessor, CompiledExpression, TokenMapIter, TokenNode};
pub use config::{
    rounding_from_name, CacheMode, EvalConfig, DEFAULT_CACHE_CAPACITY, DIVISION_SCALE,
    MAX_LOOKAHEAD_RETRIES,
};
pub use engine::Engine;
pub use env::EvalEnv;
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use property::{get_property, PropertyError};
pub use resolver::{ChainedResolver, MapResolver, VariableResolver};
pub use statement::ForLoop;
pub use text_match::{similarity, soundex};

pub use tern_ir::{RoundingMode, Value, ValueType};
