//! Engine configuration.
//!
//! The CLI/file-I/O layer is explicitly out of scope (spec §1), so there is
//! no file-based configuration here — only the one knob a host process may
//! want to set before invoking the engine: the bit width `word`-sized C
//! integers resolve to.

use serde::{Deserialize, Serialize};

/// The bit width of the target's pointer-sized integer, i.e. what C's
/// `long` (and, per spec §9, the unhandled second `long` of `long long`)
/// resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordWidth {
    /// A 32-bit target (`isize`/`usize` are 4 bytes).
    ThirtyTwo,
    /// A 64-bit target (`isize`/`usize` are 8 bytes). The default.
    SixtyFour,
}

impl Default for WordWidth {
    fn default() -> Self {
        Self::SixtyFour
    }
}

/// Configuration threaded through a single translation run.
///
/// A fresh `TranslationConfig` and a fresh [`Environment`](crate::env::Environment)
/// together form a translation run's entire mutable/configurable state;
/// neither is shared across concurrent invocations (spec §5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// The width `word` resolves to. Does not affect the choice between
    /// `i32`/`u32` vs `isize`/`usize` — only which one is emitted for a
    /// `word`-width [`CType::Integer`](crate::types::CType::Integer).
    pub word_width: WordWidth,
}

impl TranslationConfig {
    /// The default configuration: a 64-bit target.
    pub fn new() -> Self {
        Self::default()
    }
}
