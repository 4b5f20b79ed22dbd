//! Calculation of parts of grammar that participate in left recursion.

use cfg_rewrite_grammar::{RuleContainer, RuleRef, SymbolBitSet};
use cfg_rewrite_symbol::Symbol;

use crate::symbol_bit_matrix::SymbolBitMatrix;

/// The way a production takes part in left recursion.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RecursionKind {
    /// `A -> A α`.
    Direct,
    /// `A -> B α` where `B` derives a sentential form that starts with `A`.
    Indirect,
    /// `A -> α B β` where `α` is non-empty and nullable, and `B` is `A` or derives a
    /// sentential form that starts with `A`.
    Hidden,
}

/// Left corner analysis of a grammar.
///
/// Nullable prefixes are skipped when following left corners, so recursion hidden
/// behind them counts as left recursion too.
pub struct LeftRecursion<'a, G> {
    grammar: &'a G,
    nullable: SymbolBitSet,
    left_corners: SymbolBitMatrix,
}

impl<'a, G> LeftRecursion<'a, G>
where
    G: RuleContainer,
{
    /// Analyzes the grammar's left corners.
    pub fn new(grammar: &'a G) -> Self {
        let nullable = SymbolBitSet::nullable(grammar);
        let left_corners = SymbolBitMatrix::nullable_left_corners(grammar, &nullable);
        LeftRecursion {
            grammar,
            nullable,
            left_corners,
        }
    }

    /// Iterates over left-recursive nonterminals in creation order.
    pub fn left_recursive_nonterminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.left_corners.diagonal()
    }

    /// Whether the nonterminal derives a sentential form that starts with itself,
    /// possibly after nullable symbols.
    pub fn is_left_recursive(&self, sym: Symbol) -> bool {
        self.left_corners[(sym, sym)]
    }

    /// Whether `to` is `from`, or a sentential form derived from `from` starts with `to`.
    pub fn reaches(&self, from: Symbol, to: Symbol) -> bool {
        from == to || self.left_corners[(from, to)]
    }

    /// Iterates over left-recursive productions in order.
    pub fn classify(&self) -> impl Iterator<Item = (RuleRef<'a>, RecursionKind)> + '_ {
        let grammar: &'a G = self.grammar;
        grammar
            .rule_refs()
            .filter_map(move |rule| self.rule_recursion(rule).map(|kind| (rule, kind)))
    }

    /// Iterates over nonterminals that have a production of the form `A -> A α`,
    /// in creation order.
    pub fn directly_left_recursive(&self) -> impl Iterator<Item = Symbol> {
        let mut direct = SymbolBitSet::from_elem(self.grammar, false);
        for rule in self.grammar.rule_refs() {
            if rule.is_left_recursion() {
                direct.set(rule.lhs, true);
            }
        }
        direct.iter().collect::<Vec<_>>().into_iter()
    }

    /// Classifies a single production. Direct recursion takes precedence over
    /// indirect recursion, which takes precedence over hidden recursion.
    pub fn rule_recursion(&self, rule: RuleRef<'_>) -> Option<RecursionKind> {
        match rule.rhs.first() {
            Some(&first) if first == rule.lhs => Some(RecursionKind::Direct),
            Some(&first) if self.left_corners[(first, rule.lhs)] => Some(RecursionKind::Indirect),
            _ => self
                .hidden_left_corner(rule)
                .map(|_| RecursionKind::Hidden),
        }
    }

    /// Finds the first position `k > 0` in `A -> α B β` such that `α = rhs[..k]` is nullable
    /// and `B = rhs[k]` reaches `A`.
    pub fn hidden_left_corner(&self, rule: RuleRef<'_>) -> Option<usize> {
        for (pos, &sym) in rule.rhs.iter().enumerate().skip(1) {
            if !self.nullable[rule.rhs[pos - 1]] {
                return None;
            }
            if self.reaches(sym, rule.lhs) {
                return Some(pos);
            }
        }
        None
    }
}
