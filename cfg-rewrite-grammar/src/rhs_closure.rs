//! Rhs closure. In some sense, it is a reverse of breadth first search (reverse BFS).

use crate::local_prelude::*;
use crate::symbol_set::SymbolBitSet;

/// Records which productions each symbol appears in, to propagate properties from
/// right-hand sides to left-hand sides.
pub struct RhsClosure<'a> {
    inverse_derivation: Vec<Derivation<'a>>,
    work_stack: Vec<Symbol>,
}

/// Whether a property of the right-hand side must hold for all its symbols
/// or for any of them.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum RhsPropertyMode {
    /// If **all** symbols on the RHS have the property, the LHS has it too.
    All,
    /// If **any** symbol on the RHS has the property, the LHS has it too.
    Any,
}

#[derive(Clone, Copy)]
struct Derivation<'a> {
    sym: Symbol,
    rule_ref: RuleRef<'a>,
}

impl<'a> RhsClosure<'a> {
    /// Records information which is needed to calculate the RHS transitive closure.
    pub fn new<G>(grammar: &'a G) -> Self
    where
        G: RuleContainer,
    {
        let mut inverse_derivation = vec![];
        for rule_ref in grammar.rule_refs() {
            inverse_derivation.extend(rule_ref.rhs.iter().map(|&sym| Derivation { sym, rule_ref }));
        }

        inverse_derivation.sort_by_key(|derivation| derivation.sym);

        RhsClosure {
            inverse_derivation,
            work_stack: vec![],
        }
    }

    /// Calculates the RHS transitive closure of the given property.
    pub fn rhs_closure(&mut self, property: &mut SymbolBitSet, mode: RhsPropertyMode) {
        self.work_stack.extend(property.iter());

        let inverse_derivation = &self.inverse_derivation[..];
        while let Some(work_sym) = self.work_stack.pop() {
            for derivation in find(inverse_derivation, work_sym) {
                let lhs = derivation.rule_ref.lhs;
                let mut rhs_iter = derivation.rule_ref.rhs.iter();
                let has_property = |sym: &Symbol| property[*sym];
                let rhs_satisfies_property = match mode {
                    RhsPropertyMode::All => rhs_iter.all(has_property),
                    RhsPropertyMode::Any => rhs_iter.any(has_property),
                };
                if !property[lhs] && rhs_satisfies_property {
                    property.set(lhs, true);
                    self.work_stack.push(lhs);
                }
            }
        }
    }
}

fn find<'a, 'b>(derivations: &'b [Derivation<'a>], sym: Symbol) -> &'b [Derivation<'a>] {
    let start = derivations.partition_point(|derivation| derivation.sym < sym);
    let len = derivations[start..].partition_point(|derivation| derivation.sym == sym);
    &derivations[start..start + len]
}
