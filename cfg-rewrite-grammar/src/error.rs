//! Errors reported when a grammar is used against its invariants.

use thiserror::Error;

use crate::local_prelude::*;

/// A usage error. The grammar is left unchanged when one is returned.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GrammarError {
    /// The symbol was generated by another grammar.
    #[error("symbol {symbol} belongs to another grammar")]
    ForeignSymbol { symbol: Symbol },
    /// The symbol was removed from this grammar.
    #[error("symbol {symbol} was removed from this grammar")]
    RemovedSymbol { symbol: Symbol },
    /// A terminal was given where a nonterminal is required.
    #[error("`{name}` is a terminal, expected a nonterminal")]
    NotANonterminal { name: String },
    /// The symbol cannot be removed while a production refers to it.
    #[error("symbol `{name}` is still used by production `{production}`")]
    SymbolInUse { name: String, production: String },
    /// The symbol cannot be removed while it is the start symbol.
    #[error("symbol `{name}` is the start symbol")]
    StartSymbolInUse { name: String },
    /// The production ID does not name a production of this grammar.
    #[error("production {id} does not belong to this grammar")]
    UnknownProduction { id: ProductionId },
    /// A production ID was given twice in a replacement list.
    #[error("production {id} appears twice in the new production list")]
    DuplicateProduction { id: ProductionId },
    /// A name was declared twice in a grammar description.
    #[error("name `{name}` is declared more than once")]
    DuplicateName { name: String },
    /// A name used in a grammar description was never declared.
    #[error("name `{name}` is not declared")]
    UndefinedName { name: String },
}
