//! Evaluation configuration.

use bigdecimal::RoundingMode;

/// Fractional digits kept by decimal division.
pub const DIVISION_SCALE: i64 = 20;

/// Lookahead regroupings allowed per evaluation pass.
pub const MAX_LOOKAHEAD_RETRIES: u8 = 1;

/// Default capacity of a per-engine expression cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Where an engine keeps its expression buffers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CacheMode {
    /// A cache owned by the engine, holding at most this many expressions.
    Local(usize),
    /// The process-wide cache, shared by every engine in `Shared` mode.
    Shared,
}

/// Engine configuration.
///
/// Built with chained setters:
///
/// ```text
/// let config = EvalConfig::new()
///     .boolean_mode(true)
///     .rounding(RoundingMode::HalfUp);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    boolean_mode: bool,
    rounding: RoundingMode,
    return_decimal: bool,
    cache_mode: CacheMode,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            boolean_mode: false,
            rounding: RoundingMode::HalfDown,
            return_decimal: false,
            cache_mode: CacheMode::Local(DEFAULT_CACHE_CAPACITY),
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce every final result to a boolean.
    #[must_use]
    pub fn boolean_mode(mut self, enabled: bool) -> Self {
        self.boolean_mode = enabled;
        self
    }

    /// Rounding mode for decimal division.
    #[must_use]
    pub fn rounding(mut self, mode: RoundingMode) -> Self {
        self.rounding = mode;
        self
    }

    /// Keep integral decimal results as decimals instead of narrowing them to integers.
    #[must_use]
    pub fn return_decimal(mut self, enabled: bool) -> Self {
        self.return_decimal = enabled;
        self
    }

    #[must_use]
    pub fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    pub fn is_boolean_mode(&self) -> bool {
        self.boolean_mode
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding
    }

    pub fn is_return_decimal(&self) -> bool {
        self.return_decimal
    }

    pub fn cache(&self) -> CacheMode {
        self.cache_mode
    }
}

/// Parse a rounding mode name such as `half-down` or `ceiling`.
pub fn rounding_from_name(name: &str) -> Option<RoundingMode> {
    let mode = match name.to_ascii_lowercase().replace('_', "-").as_str() {
        "up" => RoundingMode::Up,
        "down" => RoundingMode::Down,
        "ceiling" => RoundingMode::Ceiling,
        "floor" => RoundingMode::Floor,
        "half-up" => RoundingMode::HalfUp,
        "half-down" => RoundingMode::HalfDown,
        "half-even" => RoundingMode::HalfEven,
        _ => return None,
    };
    Some(mode)
}

#[cfg(test)]
mod tests;
