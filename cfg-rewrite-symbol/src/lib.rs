//! Symbols of a context-free grammar. Symbols are distinguished by their IDs, and every
//! symbol carries the ID of the grammar that owns it.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

mod grammar_id;
mod source;
mod symbol;

pub use self::grammar_id::GrammarId;
pub use self::source::{Iter, SymbolSource};
pub use self::symbol::{Symbol, SymbolKind};
