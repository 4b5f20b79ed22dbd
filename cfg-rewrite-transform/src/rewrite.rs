//! A rewrite in progress: a draft production list and the helper nonterminals
//! created for it.

use std::mem;

use log::{debug, warn};

use cfg_rewrite_grammar::{Grammar, Production, ProductionDraft};
use cfg_rewrite_symbol::Symbol;

use crate::error::RewriteError;
use crate::fresh::fresh_name;
use crate::options::RewriteOptions;

/// Collects changes to a grammar's productions. Nothing is visible in the grammar
/// until [`Rewrite::commit`] succeeds, except for helper nonterminals, which are
/// removed again when the rewrite fails.
pub(crate) struct Rewrite<'a> {
    grammar: &'a mut Grammar,
    options: &'a RewriteOptions,
    drafts: Vec<ProductionDraft>,
    helpers: Vec<Symbol>,
    changed: bool,
}

impl<'a> Rewrite<'a> {
    pub(crate) fn new(grammar: &'a mut Grammar, options: &'a RewriteOptions) -> Self {
        let drafts = grammar
            .productions()
            .iter()
            .map(Production::to_draft)
            .collect();
        Rewrite {
            grammar,
            options,
            drafts,
            helpers: vec![],
            changed: false,
        }
    }

    pub(crate) fn drafts(&self) -> &[ProductionDraft] {
        &self.drafts[..]
    }

    /// Replaces the draft list and checks it against the size bound.
    pub(crate) fn set_drafts(
        &mut self,
        drafts: Vec<ProductionDraft>,
        nonterminal: Symbol,
    ) -> Result<(), RewriteError> {
        self.drafts = drafts;
        self.changed = true;
        if self.drafts.len() > self.options.max_productions {
            return Err(RewriteError::TooManyProductions {
                limit: self.options.max_productions,
                nonterminal: self.name(nonterminal),
            });
        }
        Ok(())
    }

    pub(crate) fn name(&self, sym: Symbol) -> String {
        self.grammar.display_name(sym).into_owned()
    }

    /// Creates a helper nonterminal named after `base`.
    pub(crate) fn fresh_helper(&mut self, base: Symbol) -> Symbol {
        let name = fresh_name(
            self.grammar.sym_source(),
            &self.grammar.display_name(base),
            &self.options.prime_suffix,
        );
        let helper = self.grammar.create_nonterminal(name);
        self.helpers.push(helper);
        helper
    }

    /// Verifies the drafts and swaps them into the grammar. Returns the helper
    /// nonterminals in creation order.
    pub(crate) fn commit<F>(mut self, verify: F) -> Result<Vec<Symbol>, RewriteError>
    where
        F: FnOnce(&Grammar, &[ProductionDraft]) -> Result<(), RewriteError>,
    {
        if !self.changed {
            return Ok(vec![]);
        }
        if let Err(error) = verify(self.grammar, &self.drafts[..]) {
            return Err(self.abort(error));
        }
        let drafts = mem::take(&mut self.drafts);
        if let Err(error) = self.grammar.replace_productions(drafts) {
            return Err(self.abort(error.into()));
        }
        debug!("rewrite committed with {} helper nonterminals", self.helpers.len());
        Ok(mem::take(&mut self.helpers))
    }

    /// Undoes the creation of helper nonterminals and passes the error on.
    pub(crate) fn abort(mut self, error: RewriteError) -> RewriteError {
        debug!("rewrite aborted: {}", error);
        for helper in self.helpers.drain(..) {
            if let Err(removal) = self.grammar.remove_symbol(helper) {
                warn!("helper nonterminal {} was not removed: {}", helper, removal);
            }
        }
        error
    }
}
