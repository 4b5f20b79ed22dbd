//! Classification of productions and grammars: cycles and left recursion.
//!
//! The analyses accept anything that implements [`RuleContainer`], so a list of
//! drafts can be checked before it is committed to a grammar.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod cyclical;
pub mod recursive;
pub mod symbol_bit_matrix;

use cfg_rewrite_grammar::{DraftView, Grammar, RuleContainer};

pub use crate::cyclical::Cycles;
pub use crate::recursive::{LeftRecursion, RecursionKind};
pub use crate::symbol_bit_matrix::SymbolBitMatrix;

/// Extension trait for running the analyses on a grammar.
pub trait GrammarClassifyExt: RuleContainer + Sized {
    /// Analyzes cycles among unit derivations.
    fn cycles(&self) -> Cycles<'_, Self> {
        Cycles::new(self)
    }

    /// Analyzes left recursion.
    fn left_recursion(&self) -> LeftRecursion<'_, Self> {
        LeftRecursion::new(self)
    }

    /// Whether no nonterminal derives itself alone.
    fn is_cycle_free(&self) -> bool {
        self.cycles().cycle_free()
    }

    /// Whether any nonterminal is left-recursive.
    fn has_left_recursion(&self) -> bool {
        self.left_recursion()
            .left_recursive_nonterminals()
            .next()
            .is_some()
    }
}

impl GrammarClassifyExt for Grammar {}

impl<'a> GrammarClassifyExt for DraftView<'a> {}
