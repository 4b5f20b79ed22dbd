//! Grammars described with plain values: names instead of handles.
//!
//! A description is what an embedding tool stores or exchanges. Names must be unique
//! within a description, since they stand in for symbol identity.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::local_prelude::*;

/// A grammar, described by symbol names.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GrammarDescription {
    /// Terminal names, in creation order.
    pub terminals: Vec<String>,
    /// Nonterminal names, in creation order.
    pub nonterminals: Vec<String>,
    /// The start symbol's name.
    pub start: Option<String>,
    /// Productions, in order.
    pub productions: Vec<ProductionDescription>,
}

/// A production, described by symbol names.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProductionDescription {
    /// The production's label.
    pub name: String,
    /// The left-hand side's name.
    pub lhs: String,
    /// The right-hand side's names. Empty for an epsilon production.
    pub rhs: Vec<String>,
}

impl Grammar {
    /// Describes this grammar with plain values.
    ///
    /// Terminals are created before nonterminals when the description is loaded,
    /// so the interleaving of the two kinds is not preserved.
    pub fn describe(&self) -> GrammarDescription {
        let name = |sym: Symbol| self.display_name(sym).into_owned();
        GrammarDescription {
            terminals: self.terminals().map(name).collect(),
            nonterminals: self.nonterminals().map(name).collect(),
            start: self.start_symbol().map(name),
            productions: self
                .productions()
                .iter()
                .map(|production| ProductionDescription {
                    name: production.name().to_string(),
                    lhs: name(production.lhs()),
                    rhs: production.rhs().iter().map(|&sym| name(sym)).collect(),
                })
                .collect(),
        }
    }

    /// Builds a grammar from a description.
    pub fn from_description(description: &GrammarDescription) -> Result<Self, GrammarError> {
        let mut grammar = Grammar::new();
        let mut by_name = BTreeMap::new();
        let declared = description
            .terminals
            .iter()
            .map(|name| (name, SymbolKind::Terminal))
            .chain(
                description
                    .nonterminals
                    .iter()
                    .map(|name| (name, SymbolKind::Nonterminal)),
            );
        for (name, kind) in declared {
            let sym = match kind {
                SymbolKind::Terminal => grammar.create_terminal(name.clone()),
                SymbolKind::Nonterminal => grammar.create_nonterminal(name.clone()),
            };
            if by_name.insert(&name[..], sym).is_some() {
                return Err(GrammarError::DuplicateName { name: name.clone() });
            }
        }
        let lookup = |name: &String| {
            by_name
                .get(&name[..])
                .copied()
                .ok_or_else(|| GrammarError::UndefinedName { name: name.clone() })
        };
        for production in &description.productions {
            let lhs = lookup(&production.lhs)?;
            let rhs = production
                .rhs
                .iter()
                .map(lookup)
                .collect::<Result<Vec<_>, _>>()?;
            grammar.create_production(production.name.clone(), lhs, rhs)?;
        }
        if let Some(start) = &description.start {
            grammar.set_start_symbol(lookup(start)?)?;
        }
        Ok(grammar)
    }
}
