use std::ops::{self, Deref, DerefMut};

use bit_matrix::BitMatrix;
use log::trace;

use cfg_rewrite_grammar::{RuleContainer, SymbolBitSet};
use cfg_rewrite_symbol::{GrammarId, Symbol};

/// A matrix that represents a relation `R(A, B)` between two symbols of one grammar.
#[derive(Clone, Debug)]
pub struct SymbolBitMatrix {
    grammar: GrammarId,
    bit_matrix: BitMatrix,
}

impl SymbolBitMatrix {
    /// Creates the empty matrix of size `|S|x|S|` where `S`: symbol space of the rules.
    pub fn new<G: RuleContainer>(grammar: &G) -> Self {
        let num_syms = grammar.num_syms();
        SymbolBitMatrix {
            grammar: grammar.grammar_id(),
            bit_matrix: BitMatrix::new(num_syms, num_syms),
        }
    }

    /// Includes or excludes a pair.
    pub fn set(&mut self, row: Symbol, col: Symbol, included: bool) {
        debug_assert_eq!(row.grammar(), self.grammar);
        debug_assert_eq!(col.grammar(), self.grammar);
        self.bit_matrix.set(row.usize(), col.usize(), included);
    }

    /// Computes the unit derivation matrix, closed under transitivity.
    ///
    /// A unit derivation is defined with a production such as `A -> α B γ` where
    /// both `α` and `γ` derive the empty string. `A -> A` is a unit derivation too,
    /// so `A` derives itself exactly when `A` is on a cycle.
    pub fn unit_derivation<G: RuleContainer>(grammar: &G, nullable: &SymbolBitSet) -> Self {
        let mut unit_derivation = Self::new(grammar);

        for rule in grammar.rule_refs() {
            for (pos, &sym) in rule.rhs.iter().enumerate() {
                if nullable.all(&rule.rhs[..pos]) && nullable.all(&rule.rhs[pos + 1..]) {
                    unit_derivation.set(rule.lhs, sym, true);
                }
            }
        }

        unit_derivation.transitive_closure();
        unit_derivation
    }

    /// Computes the left corner matrix, closed under transitivity. `R(A, B)` holds
    /// when a sentential form derived from `A` starts with `B`.
    pub fn left_corners<G: RuleContainer>(grammar: &G) -> Self {
        let mut left_corners = Self::new(grammar);

        for rule in grammar.rule_refs() {
            if let Some(&first) = rule.rhs.first() {
                left_corners.set(rule.lhs, first, true);
            }
        }

        left_corners.transitive_closure();
        left_corners
    }

    /// Computes the left corner matrix where nullable prefixes are skipped, closed
    /// under transitivity. `R(A, B)` holds for `A -> α B β` with nullable `α`.
    pub fn nullable_left_corners<G: RuleContainer>(grammar: &G, nullable: &SymbolBitSet) -> Self {
        let mut left_corners = Self::new(grammar);

        for rule in grammar.rule_refs() {
            for &sym in rule.rhs {
                left_corners.set(rule.lhs, sym, true);
                if !nullable[sym] {
                    break;
                }
            }
        }

        left_corners.transitive_closure();
        trace!(
            "left corner relation over {} symbols closed",
            left_corners.bit_matrix.size().0
        );
        left_corners
    }

    /// Creates an iterator over symbols which appear in the given row.
    pub fn iter_row_syms(&self, row: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        let grammar = self.grammar;
        let row = if self.contains(row) { Some(row.usize()) } else { None };
        row.into_iter().flat_map(move |row| {
            self.bit_matrix
                .iter_row(row)
                .enumerate()
                .filter_map(move |(i, present)| {
                    if present {
                        Some(Symbol::from_parts(grammar, i))
                    } else {
                        None
                    }
                })
        })
    }

    /// Iterates over symbols related to themselves.
    pub fn diagonal(&self) -> impl Iterator<Item = Symbol> + '_ {
        let grammar = self.grammar;
        (0..self.bit_matrix.size().0)
            .filter(move |&i| self.bit_matrix[(i, i)])
            .map(move |i| Symbol::from_parts(grammar, i))
    }

    fn contains(&self, sym: Symbol) -> bool {
        sym.grammar() == self.grammar && sym.usize() < self.bit_matrix.size().0
    }
}

impl Deref for SymbolBitMatrix {
    type Target = BitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.bit_matrix
    }
}

impl DerefMut for SymbolBitMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bit_matrix
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<(Symbol, Symbol)> for SymbolBitMatrix {
    type Output = bool;
    fn index(&self, index: (Symbol, Symbol)) -> &Self::Output {
        if self.contains(index.0)
            && self.contains(index.1)
            && self.bit_matrix[(index.0.usize(), index.1.usize())]
        {
            &TRUE
        } else {
            &FALSE
        }
    }
}
