//! Productions of a grammar. Each production consists of a single nonterminal on its
//! left-hand side and a sequence of symbols on its right-hand side. An empty right-hand
//! side denotes an epsilon production.

use std::fmt;

use crate::local_prelude::*;

/// A production handle. IDs are never reused within a grammar.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct ProductionId {
    grammar: GrammarId,
    n: u32,
}

/// A production owned by a grammar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Production {
    id: ProductionId,
    name: String,
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

/// A production that is not part of a grammar yet.
///
/// Transformations build lists of drafts and hand them to
/// [`Grammar::replace_productions`] in one step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductionDraft {
    /// The production this draft keeps, if it is unchanged.
    pub origin: Option<ProductionId>,
    /// Label for diagnostics.
    pub name: String,
    /// The left-hand side.
    pub lhs: Symbol,
    /// The right-hand side.
    pub rhs: Vec<Symbol>,
}

impl ProductionId {
    pub(crate) fn new(grammar: GrammarId, n: u32) -> Self {
        ProductionId { grammar, n }
    }

    /// The ID of the grammar this production belongs to.
    pub fn grammar(self) -> GrammarId {
        self.grammar
    }

    pub(crate) fn rebind(self, grammar: GrammarId) -> Self {
        ProductionId { grammar, n: self.n }
    }
}

impl fmt::Display for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/P{}", self.grammar, self.n)
    }
}

impl Production {
    pub(crate) fn new(id: ProductionId, name: String, lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Production { id, name, lhs, rhs }
    }

    /// The production's handle.
    pub fn id(&self) -> ProductionId {
        self.id
    }

    /// The ID of the grammar that owns this production.
    pub fn grammar(&self) -> GrammarId {
        self.id.grammar()
    }

    /// The production's label.
    pub fn name(&self) -> &str {
        &self.name[..]
    }

    /// The left-hand side.
    pub fn lhs(&self) -> Symbol {
        self.lhs
    }

    /// The right-hand side.
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs[..]
    }

    /// Whether the right-hand side is empty.
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }

    /// Whether this production is directly left-recursive, like `A -> A α`.
    ///
    /// Indirect left recursion is found by `cfg-rewrite-classify`.
    pub fn is_left_recursion(&self) -> bool {
        self.as_rule_ref().is_left_recursion()
    }

    /// Copies this production into a draft that keeps its ID.
    pub fn to_draft(&self) -> ProductionDraft {
        ProductionDraft {
            origin: Some(self.id),
            name: self.name.clone(),
            lhs: self.lhs,
            rhs: self.rhs.clone(),
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_lhs(&mut self, lhs: Symbol) {
        self.lhs = lhs;
    }

    pub(crate) fn set_rhs(&mut self, rhs: Vec<Symbol>) {
        self.rhs = rhs;
    }

    pub(crate) fn rebind(&self, grammar: GrammarId) -> Self {
        Production {
            id: self.id.rebind(grammar),
            name: self.name.clone(),
            lhs: self.lhs.rebind(grammar),
            rhs: self.rhs.iter().map(|sym| sym.rebind(grammar)).collect(),
        }
    }
}

impl ProductionDraft {
    /// Creates a draft of a new production.
    pub fn new(name: impl Into<String>, lhs: Symbol, rhs: impl Into<Vec<Symbol>>) -> Self {
        ProductionDraft {
            origin: None,
            name: name.into(),
            lhs,
            rhs: rhs.into(),
        }
    }

    /// Whether this draft is directly left-recursive, like `A -> A α`.
    pub fn is_left_recursion(&self) -> bool {
        self.as_rule_ref().is_left_recursion()
    }
}

impl AsRuleRef for Production {
    fn as_rule_ref(&self) -> RuleRef<'_> {
        RuleRef {
            lhs: self.lhs,
            rhs: &self.rhs[..],
        }
    }
}

impl AsRuleRef for ProductionDraft {
    fn as_rule_ref(&self) -> RuleRef<'_> {
        RuleRef {
            lhs: self.lhs,
            rhs: &self.rhs[..],
        }
    }
}
