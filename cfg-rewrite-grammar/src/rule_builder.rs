//! Grammar productions can be built with the builder pattern.

use std::convert::AsRef;

use crate::local_prelude::*;

/// The rule builder, created by [`Grammar::rule`].
///
/// Every call to `rhs` adds one alternative for the current left-hand side.
pub struct RuleBuilder<'a> {
    lhs: Symbol,
    name: Option<String>,
    grammar: &'a mut Grammar,
}

impl<'a> RuleBuilder<'a> {
    pub(crate) fn new(grammar: &'a mut Grammar, lhs: Symbol) -> Result<Self, GrammarError> {
        grammar.check_nonterminal(lhs)?;
        Ok(RuleBuilder {
            lhs,
            name: None,
            grammar,
        })
    }

    /// Switches to building alternatives for another left-hand side.
    pub fn rule(self, lhs: Symbol) -> Result<Self, GrammarError> {
        RuleBuilder::new(self.grammar, lhs)
    }

    /// Assigns the label used on the next call to `rhs`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds an alternative to the grammar. Without a label from `named`, the
    /// alternative is labeled `<lhs> #<k>`, counting the productions of `lhs`.
    pub fn rhs<S>(mut self, syms: S) -> Result<Self, GrammarError>
    where
        S: AsRef<[Symbol]>,
    {
        let name = match self.name.take() {
            Some(name) => name,
            None => {
                let ordinal = self.grammar.productions_of(self.lhs).count() + 1;
                format!("{} #{}", self.grammar.display_name(self.lhs), ordinal)
            }
        };
        self.grammar
            .create_production(name, self.lhs, syms.as_ref().to_vec())?;
        Ok(self)
    }
}
