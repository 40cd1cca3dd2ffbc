//! Per-pass reducer mode flags.

use bitflags::bitflags;

bitflags! {
    /// Mode bits owned by one reduction pass.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub(crate) struct ReduceFlags: u8 {
        /// Coerce the final value to a boolean.
        const BOOLEAN_MODE = 1 << 0;
        /// The pass is producing the value of an assignment; `;` ends it.
        const ASSIGN = 1 << 1;
        /// A lookahead regrouping is being reduced.
        const LOOKAHEAD = 1 << 2;
    }
}
