//! Rewrites of context-free grammars: left-recursion elimination and left-factoring.
//!
//! Both rewrites build a new production list on the side and swap it into the
//! grammar in one step. When a rewrite fails, the grammar is left as it was.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod error;
pub mod fresh;
pub mod left_factor;
pub mod left_recursion;
pub mod options;
mod rewrite;

use cfg_rewrite_grammar::Grammar;
use cfg_rewrite_symbol::Symbol;

pub use crate::error::RewriteError;
pub use crate::fresh::fresh_name;
pub use crate::options::RewriteOptions;

/// Extension trait for rewriting a grammar in place.
pub trait GrammarRewriteExt {
    /// Eliminates left recursion with default options.
    fn eliminate_left_recursions(&mut self) -> Result<Vec<Symbol>, RewriteError> {
        self.eliminate_left_recursions_with(&RewriteOptions::default())
    }

    /// Eliminates left recursion. Returns the helper nonterminals.
    fn eliminate_left_recursions_with(&mut self, options: &RewriteOptions) -> Result<Vec<Symbol>, RewriteError>;

    /// Left-factors with default options.
    fn left_factor(&mut self) -> Result<Vec<Symbol>, RewriteError> {
        self.left_factor_with(&RewriteOptions::default())
    }

    /// Left-factors. Returns the helper nonterminals.
    fn left_factor_with(&mut self, options: &RewriteOptions) -> Result<Vec<Symbol>, RewriteError>;
}

impl GrammarRewriteExt for Grammar {
    fn eliminate_left_recursions_with(&mut self, options: &RewriteOptions) -> Result<Vec<Symbol>, RewriteError> {
        left_recursion::eliminate_left_recursions(self, options)
    }

    fn left_factor_with(&mut self, options: &RewriteOptions) -> Result<Vec<Symbol>, RewriteError> {
        left_factor::left_factor(self, options)
    }
}
