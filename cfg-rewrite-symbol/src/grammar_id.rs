//! Identity of a grammar. Symbols and productions are tagged with it.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_GRAMMAR_ID: AtomicU32 = AtomicU32::new(1);

/// Identifies one grammar for the lifetime of the process.
///
/// Every grammar, including every clone, gets a fresh ID.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct GrammarId(NonZeroU32);

impl GrammarId {
    /// Returns an ID that was never returned before.
    pub fn fresh() -> Self {
        let n = NEXT_GRAMMAR_ID.fetch_add(1, Ordering::Relaxed);
        GrammarId(NonZeroU32::new(n).expect("ran out of grammar IDs"))
    }

    /// Returns the numeric value of this ID.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for GrammarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}
