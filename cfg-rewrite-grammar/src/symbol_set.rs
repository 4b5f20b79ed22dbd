//! Sets of symbols in the form of bit vectors.

use std::{iter, ops};

use bit_vec::BitVec;

use crate::local_prelude::*;
use crate::rhs_closure::{RhsClosure, RhsPropertyMode};

/// A set of symbols in the form of a bit vector.
///
/// Indexed by the symbols' arena indices. All members belong to one grammar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SymbolBitSet {
    grammar: GrammarId,
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    grammar: GrammarId,
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs a set over the symbol space of the given rules, with every
    /// bit set to `elem`.
    pub fn from_elem<G: RuleContainer>(grammar: &G, elem: bool) -> Self {
        SymbolBitSet {
            grammar: grammar.grammar_id(),
            bit_vec: BitVec::from_elem(grammar.num_syms(), elem),
        }
    }

    /// Constructs the set of nullable symbols: those that derive the empty string.
    pub fn nullable<G: RuleContainer>(grammar: &G) -> Self {
        let mut nullable = Self::from_elem(grammar, false);
        for rule in grammar.rule_refs() {
            if rule.rhs.is_empty() {
                nullable.set(rule.lhs, true);
            }
        }
        RhsClosure::new(grammar).rhs_closure(&mut nullable, RhsPropertyMode::All);
        nullable
    }

    /// Constructs the set of symbols that appear in any production.
    pub fn used<G: RuleContainer>(grammar: &G) -> Self {
        let mut used = Self::from_elem(grammar, false);
        for rule in grammar.rule_refs() {
            used.set(rule.lhs, true);
            for &sym in rule.rhs {
                used.set(sym, true);
            }
        }
        used
    }

    /// Includes or excludes a symbol.
    pub fn set(&mut self, sym: Symbol, elem: bool) {
        debug_assert_eq!(sym.grammar(), self.grammar);
        self.bit_vec.set(sym.usize(), elem);
    }

    /// Whether all symbols of a sequence are in the set. True for an empty sequence.
    pub fn all(&self, syms: &[Symbol]) -> bool {
        syms.iter().all(|&sym| self[sym])
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            grammar: self.grammar,
            iter: self.bit_vec.iter().enumerate(),
        }
    }

    /// Returns the underlying bit vector.
    pub fn bit_vec(&self) -> &BitVec {
        &self.bit_vec
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from_parts(self.grammar, id));
            }
        }
        None
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if index.grammar() == self.grammar && self.bit_vec.get(index.usize()) == Some(true) {
            &TRUE
        } else {
            &FALSE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_and_out_of_range_symbols() {
        let mut grammar = Grammar::new();
        let a = grammar.create_terminal("a");
        let set = SymbolBitSet::from_elem(&grammar, true);
        let b = grammar.create_terminal("b");
        let foreign = Grammar::new().create_terminal("a");

        assert!(set[a]);
        assert!(!set[b]);
        assert!(!set[foreign]);
        assert_eq!(set.iter().collect::<Vec<_>>(), [a]);
    }

    #[test]
    fn test_used_symbols() {
        let mut grammar = Grammar::new();
        let [s, unused] = grammar.nonterminals_named(["S", "Unused"]);
        let a = grammar.create_terminal("a");
        grammar.create_production("S #1", s, vec![a]).unwrap();

        let used = SymbolBitSet::used(&grammar);
        assert!(used[s]);
        assert!(used[a]);
        assert!(!used[unused]);
        assert!(used.all(&[s, a]));
        assert!(used.all(&[]));
    }
}
