//! Cycle detection.

use cfg_rewrite_grammar::{RuleContainer, RuleRef, SymbolBitSet};
use cfg_rewrite_symbol::Symbol;

use crate::symbol_bit_matrix::SymbolBitMatrix;

/// Provides information about cycles among unit derivations in the grammar.
///
/// A grammar has a cycle when a nonterminal `A` derives `A` alone in one or more steps.
/// Nullable symbols around a right-hand side symbol are taken into account, so
/// `A -> B A` with a nullable `B` makes `A` cyclic.
pub struct Cycles<'a, G> {
    grammar: &'a G,
    nullable: SymbolBitSet,
    unit_derivation: SymbolBitMatrix,
}

impl<'a, G> Cycles<'a, G>
where
    G: RuleContainer,
{
    /// Analyzes the grammar's cycles.
    pub fn new(grammar: &'a G) -> Self {
        let nullable = SymbolBitSet::nullable(grammar);
        let unit_derivation = SymbolBitMatrix::unit_derivation(grammar, &nullable);
        Cycles {
            grammar,
            nullable,
            unit_derivation,
        }
    }

    /// Checks whether the grammar is cycle-free.
    pub fn cycle_free(&self) -> bool {
        self.cyclic_symbols().next().is_none()
    }

    /// Iterates over nonterminals that derive themselves, in creation order.
    pub fn cyclic_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.unit_derivation.diagonal()
    }

    /// Whether the symbol derives itself.
    pub fn is_cyclic(&self, sym: Symbol) -> bool {
        self.unit_derivation[(sym, sym)]
    }

    /// Iterates over productions that participate in a cycle, in order.
    pub fn cycle_participants(&self) -> impl Iterator<Item = RuleRef<'a>> + '_ {
        let grammar: &'a G = self.grammar;
        grammar
            .rule_refs()
            .filter(move |rule| self.participates(*rule))
    }

    /// Whether the production `A -> α B γ` is a unit derivation that closes a cycle,
    /// that is `α` and `γ` are nullable and `B` derives `A`.
    pub fn participates(&self, rule: RuleRef<'_>) -> bool {
        rule.rhs.iter().enumerate().any(|(pos, &sym)| {
            (sym == rule.lhs || self.unit_derivation[(sym, rule.lhs)])
                && self.nullable.all(&rule.rhs[..pos])
                && self.nullable.all(&rule.rhs[pos + 1..])
        })
    }
}
