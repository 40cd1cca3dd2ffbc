//! Stack growth guard for nested evaluation passes.
//!
//! The evaluator is iterative within one statement, but parenthesised
//! groups, list elements and assignment right-hand sides each run a nested
//! pass over their own text. Input such as `((((...))))` therefore recurses
//! once per nesting level; every nested pass goes through
//! [`nested_pass`] so deep input grows the stack instead of overflowing it.
//!
//! On wasm32 the guard is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run one nested evaluation pass with enough stack for it.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn nested_pass<R>(pass: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, pass)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn nested_pass<R>(pass: impl FnOnce() -> R) -> R {
    pass()
}

#[cfg(test)]
mod tests;
