//! Definitions of the context-free grammar type.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use log::debug;

use crate::local_prelude::*;
use crate::rule_builder::RuleBuilder;
use crate::symbol_set::SymbolBitSet;

/// Context-free grammar type.
///
/// The grammar owns its symbols and productions. Everything else holds
/// [`Symbol`] and [`ProductionId`] handles, which are checked against the grammar
/// on every use.
#[derive(Debug)]
pub struct Grammar {
    /// The symbol source.
    sym_source: SymbolSource,
    /// The array of productions, in insertion order.
    productions: Vec<Production>,
    /// The start symbol.
    start: Option<Symbol>,
    next_production: u32,
}

/// Maps each nonterminal to the productions that have it on their left-hand side.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LeftProductionMap {
    map: BTreeMap<Symbol, Vec<ProductionId>>,
}

/// Translates handles of a grammar to handles of its clone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SymbolMapping {
    from: GrammarId,
    to: GrammarId,
}

/// Productions that were not committed to a grammar, viewed together with the
/// grammar's symbol space.
#[derive(Clone, Copy, Debug)]
pub struct DraftView<'a> {
    sym_source: &'a SymbolSource,
    drafts: &'a [ProductionDraft],
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    /// Creates an empty context-free grammar.
    pub fn new() -> Self {
        Grammar {
            sym_source: SymbolSource::new(),
            productions: vec![],
            start: None,
            next_production: 0,
        }
    }

    /// The identity of this grammar. Clones have a different identity.
    pub fn id(&self) -> GrammarId {
        self.sym_source.id()
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Creates a terminal symbol owned by this grammar.
    pub fn create_terminal(&mut self, name: impl Into<String>) -> Symbol {
        self.sym_source.terminal(name)
    }

    /// Creates a nonterminal symbol owned by this grammar.
    pub fn create_nonterminal(&mut self, name: impl Into<String>) -> Symbol {
        self.sym_source.nonterminal(name)
    }

    /// Creates terminal symbols with the given names.
    pub fn terminals_named<const N: usize>(&mut self, names: [&str; N]) -> [Symbol; N] {
        self.sym_source.with_names(SymbolKind::Terminal, names)
    }

    /// Creates nonterminal symbols with the given names.
    pub fn nonterminals_named<const N: usize>(&mut self, names: [&str; N]) -> [Symbol; N] {
        self.sym_source.with_names(SymbolKind::Nonterminal, names)
    }

    /// Creates a production and appends it to the production list.
    ///
    /// The left-hand side must be a nonterminal of this grammar, and every symbol
    /// on the right-hand side must belong to this grammar.
    pub fn create_production(
        &mut self,
        name: impl Into<String>,
        lhs: Symbol,
        rhs: impl Into<Vec<Symbol>>,
    ) -> Result<ProductionId, GrammarError> {
        let rhs = rhs.into();
        self.check_nonterminal(lhs)?;
        self.check_rhs(&rhs[..])?;
        let id = self.next_production_id();
        self.productions
            .push(Production::new(id, name.into(), lhs, rhs));
        Ok(id)
    }

    /// Starts building productions for the given left-hand side.
    pub fn rule(&mut self, lhs: Symbol) -> Result<RuleBuilder<'_>, GrammarError> {
        RuleBuilder::new(self, lhs)
    }

    /// Removes a symbol.
    ///
    /// Returns `Ok(false)` if the symbol is not a live symbol of this grammar. A symbol
    /// that is still referenced by a production or designated as the start symbol is
    /// not removed, and an error names the reference.
    pub fn remove_symbol(&mut self, sym: Symbol) -> Result<bool, GrammarError> {
        if !self.sym_source.contains(sym) {
            return Ok(false);
        }
        let name = self.display_name(sym).into_owned();
        if let Some(production) = self
            .productions
            .iter()
            .find(|production| production.lhs() == sym || production.rhs().contains(&sym))
        {
            return Err(GrammarError::SymbolInUse {
                name,
                production: production.name().to_string(),
            });
        }
        if self.start == Some(sym) {
            return Err(GrammarError::StartSymbolInUse { name });
        }
        Ok(self.sym_source.remove(sym))
    }

    /// Removes a production. Returns `false` if it is not a production of this grammar.
    pub fn remove_production(&mut self, id: ProductionId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.productions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Designates the start symbol, which must be a nonterminal of this grammar.
    pub fn set_start_symbol(&mut self, start: Symbol) -> Result<(), GrammarError> {
        self.check_nonterminal(start)?;
        self.start = Some(start);
        Ok(())
    }

    /// Removes the start symbol designation.
    pub fn clear_start_symbol(&mut self) {
        self.start = None;
    }

    /// Returns the start symbol, if one is designated.
    pub fn start_symbol(&self) -> Option<Symbol> {
        self.start
    }

    /// Iterates over all live symbols in creation order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.sym_source.iter()
    }

    /// Iterates over live terminals in creation order.
    pub fn terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.sym_source.terminals()
    }

    /// Iterates over live nonterminals in creation order.
    pub fn nonterminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.sym_source.nonterminals()
    }

    /// Returns the number of symbol indices in use, including removed symbols.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Whether the symbol is a live symbol of this grammar.
    pub fn owns(&self, sym: Symbol) -> bool {
        self.sym_source.contains(sym)
    }

    /// Returns the name of a live symbol.
    pub fn symbol_name(&self, sym: Symbol) -> Option<&str> {
        self.sym_source.name_of(sym)
    }

    /// Renames a symbol.
    pub fn set_symbol_name(&mut self, sym: Symbol, name: impl Into<String>) -> Result<(), GrammarError> {
        self.check_live(sym)?;
        self.sym_source.set_name(sym, name);
        Ok(())
    }

    /// Returns the kind of a live symbol.
    pub fn symbol_kind(&self, sym: Symbol) -> Option<SymbolKind> {
        self.sym_source.kind(sym)
    }

    /// Whether the symbol is a live terminal of this grammar.
    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.symbol_kind(sym) == Some(SymbolKind::Terminal)
    }

    /// Whether the symbol is a live nonterminal of this grammar.
    pub fn is_nonterminal(&self, sym: Symbol) -> bool {
        self.symbol_kind(sym) == Some(SymbolKind::Nonterminal)
    }

    /// Finds the first live symbol with the given name, in creation order.
    pub fn find_symbol(&self, name: &str) -> Option<Symbol> {
        self.sym_source.find(name)
    }

    /// Returns the production list in order.
    pub fn productions(&self) -> &[Production] {
        &self.productions[..]
    }

    /// Returns a production of this grammar.
    pub fn production(&self, id: ProductionId) -> Option<&Production> {
        self.position(id).map(|index| &self.productions[index])
    }

    /// Iterates over productions with the given left-hand side, in order.
    pub fn productions_of(&self, lhs: Symbol) -> impl Iterator<Item = &Production> + '_ {
        self.productions
            .iter()
            .filter(move |production| production.lhs() == lhs)
    }

    /// Replaces a production's left-hand side.
    pub fn set_production_lhs(&mut self, id: ProductionId, lhs: Symbol) -> Result<(), GrammarError> {
        self.check_nonterminal(lhs)?;
        let index = self.position(id).ok_or(GrammarError::UnknownProduction { id })?;
        self.productions[index].set_lhs(lhs);
        Ok(())
    }

    /// Replaces a production's right-hand side.
    pub fn set_production_rhs(
        &mut self,
        id: ProductionId,
        rhs: impl Into<Vec<Symbol>>,
    ) -> Result<(), GrammarError> {
        let rhs = rhs.into();
        self.check_rhs(&rhs[..])?;
        let index = self.position(id).ok_or(GrammarError::UnknownProduction { id })?;
        self.productions[index].set_rhs(rhs);
        Ok(())
    }

    /// Relabels a production.
    pub fn set_production_name(&mut self, id: ProductionId, name: impl Into<String>) -> Result<(), GrammarError> {
        let index = self.position(id).ok_or(GrammarError::UnknownProduction { id })?;
        self.productions[index].set_name(name.into());
        Ok(())
    }

    /// Computes the map from each left-hand side to its productions, in production
    /// order. The map is built from a full scan of the current production list.
    pub fn left_production_map(&self) -> LeftProductionMap {
        let mut map: BTreeMap<Symbol, Vec<ProductionId>> = BTreeMap::new();
        for production in &self.productions {
            map.entry(production.lhs()).or_default().push(production.id());
        }
        LeftProductionMap { map }
    }

    /// Validates a complete new production list and swaps it in.
    ///
    /// Drafts with an `origin` keep that production's ID. Nothing is changed if any
    /// draft is invalid.
    pub fn replace_productions(&mut self, drafts: Vec<ProductionDraft>) -> Result<(), GrammarError> {
        let mut kept = BTreeSet::new();
        for draft in &drafts {
            self.check_nonterminal(draft.lhs)?;
            self.check_rhs(&draft.rhs[..])?;
            if let Some(id) = draft.origin {
                if self.position(id).is_none() {
                    return Err(GrammarError::UnknownProduction { id });
                }
                if !kept.insert(id) {
                    return Err(GrammarError::DuplicateProduction { id });
                }
            }
        }
        let old_len = self.productions.len();
        let mut productions = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = match draft.origin {
                Some(id) => id,
                None => self.next_production_id(),
            };
            productions.push(Production::new(id, draft.name, draft.lhs, draft.rhs));
        }
        self.productions = productions;
        debug!(
            "replaced {} productions with {} ({} kept)",
            old_len,
            self.productions.len(),
            kept.len()
        );
        Ok(())
    }

    /// Views a list of drafts together with this grammar's symbol space.
    pub fn draft_view<'a>(&'a self, drafts: &'a [ProductionDraft]) -> DraftView<'a> {
        DraftView {
            sym_source: &self.sym_source,
            drafts,
        }
    }

    /// Computes the set of nullable symbols.
    pub fn nullable_symbols(&self) -> SymbolBitSet {
        SymbolBitSet::nullable(self)
    }

    /// Makes a deep copy with a fresh identity, and returns the translation of
    /// handles from this grammar to the copy.
    pub fn clone_with_mapping(&self) -> (Grammar, SymbolMapping) {
        let sym_source = self.sym_source.fork();
        let to = sym_source.id();
        let grammar = Grammar {
            productions: self
                .productions
                .iter()
                .map(|production| production.rebind(to))
                .collect(),
            start: self.start.map(|start| start.rebind(to)),
            next_production: self.next_production,
            sym_source,
        };
        let mapping = SymbolMapping {
            from: self.id(),
            to,
        };
        (grammar, mapping)
    }

    /// Returns the name of a symbol for display. Symbols without a name in
    /// this grammar are shown by their handle.
    pub fn display_name(&self, sym: Symbol) -> Cow<'_, str> {
        match self.sym_source.name_of(sym) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(sym.to_string()),
        }
    }

    /// Formats one production as `lhs -> rhs0 rhs1 ...`, or `lhs -> ε`.
    pub fn production_to_string(&self, rule: impl AsRuleRef) -> String {
        let rule = rule.as_rule_ref();
        let mut result = String::new();
        result.push_str(&self.display_name(rule.lhs));
        result.push_str(" ->");
        if rule.rhs.is_empty() {
            result.push_str(" ε");
        }
        for &sym in rule.rhs {
            result.push(' ');
            result.push_str(&self.display_name(sym));
        }
        result
    }

    /// Formats the production list to a `String`. The output looks like this:
    ///
    /// ```ignore
    /// S -> a S'
    /// S' -> a S'
    /// S' -> ε
    /// ```
    pub fn productions_to_string(&self) -> String {
        let mut result = String::new();
        for production in &self.productions {
            writeln!(&mut result, "{}", self.production_to_string(production))
                .expect("writing to String failed");
        }
        result
    }

    fn next_production_id(&mut self) -> ProductionId {
        let id = ProductionId::new(self.id(), self.next_production);
        self.next_production += 1;
        id
    }

    fn position(&self, id: ProductionId) -> Option<usize> {
        if id.grammar() != self.id() {
            return None;
        }
        self.productions
            .iter()
            .position(|production| production.id() == id)
    }

    fn check_live(&self, sym: Symbol) -> Result<SymbolKind, GrammarError> {
        match self.sym_source.kind(sym) {
            Some(kind) => Ok(kind),
            None if self.sym_source.generated(sym) => Err(GrammarError::RemovedSymbol { symbol: sym }),
            None => Err(GrammarError::ForeignSymbol { symbol: sym }),
        }
    }

    pub(crate) fn check_nonterminal(&self, sym: Symbol) -> Result<(), GrammarError> {
        match self.check_live(sym)? {
            SymbolKind::Nonterminal => Ok(()),
            SymbolKind::Terminal => Err(GrammarError::NotANonterminal {
                name: self.display_name(sym).into_owned(),
            }),
        }
    }

    fn check_rhs(&self, rhs: &[Symbol]) -> Result<(), GrammarError> {
        for &sym in rhs {
            self.check_live(sym)?;
        }
        Ok(())
    }
}

impl Clone for Grammar {
    fn clone(&self) -> Self {
        self.clone_with_mapping().0
    }
}

impl RuleContainer for Grammar {
    fn grammar_id(&self) -> GrammarId {
        self.id()
    }

    fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    fn rule_refs(&self) -> impl Iterator<Item = RuleRef<'_>> {
        self.productions.iter().map(|production| production.as_rule_ref())
    }
}

impl<'a> RuleContainer for DraftView<'a> {
    fn grammar_id(&self) -> GrammarId {
        self.sym_source.id()
    }

    fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    fn rule_refs(&self) -> impl Iterator<Item = RuleRef<'_>> {
        self.drafts.iter().map(|draft| draft.as_rule_ref())
    }
}

impl<'a> DraftView<'a> {
    /// The symbol space of the drafts.
    pub fn sym_source(&self) -> &'a SymbolSource {
        self.sym_source
    }

    /// The drafts in order.
    pub fn drafts(&self) -> &'a [ProductionDraft] {
        self.drafts
    }
}

impl LeftProductionMap {
    /// Returns the productions with the given left-hand side, in production order.
    pub fn get(&self, lhs: Symbol) -> &[ProductionId] {
        self.map.get(&lhs).map(|ids| &ids[..]).unwrap_or(&[])
    }

    /// Iterates over left-hand sides in symbol creation order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[ProductionId])> + '_ {
        self.map.iter().map(|(&lhs, ids)| (lhs, &ids[..]))
    }

    /// The number of distinct left-hand sides.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no productions at all.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl SymbolMapping {
    /// Translates a symbol of the original grammar to the clone.
    ///
    /// Returns `None` for symbols of any other grammar.
    pub fn get(&self, sym: Symbol) -> Option<Symbol> {
        if sym.grammar() == self.from {
            Some(sym.rebind(self.to))
        } else {
            None
        }
    }

    /// Translates a production of the original grammar to the clone.
    pub fn production(&self, id: ProductionId) -> Option<ProductionId> {
        if id.grammar() == self.from {
            Some(id.rebind(self.to))
        } else {
            None
        }
    }

    /// The original grammar's identity.
    pub fn source(&self) -> GrammarId {
        self.from
    }

    /// The clone's identity.
    pub fn target(&self) -> GrammarId {
        self.to
    }
}
