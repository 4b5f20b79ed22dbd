//! Library for building context-free grammars whose symbols and productions are owned
//! by the grammar. Transformations live in separate crates and work through this API.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, allow(missing_docs))]

pub mod description;
pub mod error;
pub mod grammar;
pub mod production;
pub mod rhs_closure;
pub mod rule_builder;
pub mod rule_ref;
pub mod symbol_set;

pub use crate::description::{GrammarDescription, ProductionDescription};
pub use crate::error::GrammarError;
pub use crate::grammar::{DraftView, Grammar, LeftProductionMap, SymbolMapping};
pub use crate::production::{Production, ProductionDraft, ProductionId};
pub use crate::rule_builder::RuleBuilder;
pub use crate::rule_ref::{AsRuleRef, RuleContainer, RuleRef};
pub use crate::symbol_set::SymbolBitSet;
pub use cfg_rewrite_symbol::{GrammarId, Symbol, SymbolKind, SymbolSource};

pub(crate) mod local_prelude {
    pub use crate::error::GrammarError;
    pub use crate::grammar::Grammar;
    pub use crate::production::{Production, ProductionDraft, ProductionId};
    pub use crate::rule_ref::{AsRuleRef, RuleContainer, RuleRef};
    pub use cfg_rewrite_symbol::{GrammarId, Symbol, SymbolKind, SymbolSource};
}
