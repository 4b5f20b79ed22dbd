//! Borrowed views of productions. Analyses are written against these, so they run on
//! a grammar as well as on a list of drafts that was not committed yet.

use crate::local_prelude::*;

/// Trait for anything that can be viewed as a production.
pub trait AsRuleRef {
    fn as_rule_ref(&self) -> RuleRef<'_>;
}

impl<'a, R> AsRuleRef for &'a R
where
    R: AsRuleRef,
{
    fn as_rule_ref(&self) -> RuleRef<'_> {
        (**self).as_rule_ref()
    }
}

/// References a production's components.
#[derive(Copy, Clone, Debug)]
pub struct RuleRef<'a> {
    /// Left-hand side.
    pub lhs: Symbol,
    /// Right-hand side.
    pub rhs: &'a [Symbol],
}

impl<'a> AsRuleRef for RuleRef<'a> {
    fn as_rule_ref(&self) -> RuleRef<'_> {
        *self
    }
}

impl<'a> RuleRef<'a> {
    /// Whether the first symbol on the right-hand side is the left-hand side.
    pub fn is_left_recursion(&self) -> bool {
        self.rhs.first() == Some(&self.lhs)
    }
}

/// A collection of productions over one symbol space.
pub trait RuleContainer {
    /// The ID of the grammar whose symbols the productions use.
    fn grammar_id(&self) -> GrammarId;

    /// The size of the symbol space, including removed symbols.
    fn num_syms(&self) -> usize;

    /// Iterates over the productions in order.
    fn rule_refs(&self) -> impl Iterator<Item = RuleRef<'_>>;
}
