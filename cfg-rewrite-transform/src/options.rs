//! Settings shared by the rewrites.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for left-recursion elimination and left-factoring.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewriteOptions {
    /// Appended to a nonterminal's name to name its helper nonterminal.
    pub prime_suffix: String,
    /// Upper bound on the length of the production list during a rewrite.
    pub max_productions: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            prime_suffix: "'".to_string(),
            max_productions: 10_000,
        }
    }
}

impl RewriteOptions {
    /// Sets the suffix for helper nonterminal names.
    pub fn with_prime_suffix(mut self, prime_suffix: impl Into<String>) -> Self {
        self.prime_suffix = prime_suffix.into();
        self
    }

    /// Sets the bound on the length of the production list.
    pub fn with_max_productions(mut self, max_productions: usize) -> Self {
        self.max_productions = max_productions;
        self
    }
}
