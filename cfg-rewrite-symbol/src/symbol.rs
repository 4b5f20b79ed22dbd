use std::fmt;
use std::num::NonZeroU32;

use crate::GrammarId;

/// A grammar symbol handle.
///
/// The handle is the identity of a symbol. It consists of the owning grammar's ID and
/// an index into that grammar's symbol arena. Two symbols with equal names are still
/// distinct symbols.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Symbol {
    grammar: GrammarId,
    n: NonZeroU32,
}

/// The two disjoint variants of grammar symbols.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub enum SymbolKind {
    /// A symbol that never appears on the left-hand side of a production.
    Terminal,
    /// A symbol that may appear on the left-hand side of a production.
    Nonterminal,
}

impl Symbol {
    /// Creates a handle from raw parts.
    ///
    /// The handle is only meaningful to the grammar identified by `grammar`.
    pub fn from_parts(grammar: GrammarId, index: usize) -> Self {
        let n = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new)
            .expect("ran out of Symbol space?");
        Symbol { grammar, n }
    }

    /// The ID of the grammar this symbol belongs to.
    pub fn grammar(self) -> GrammarId {
        self.grammar
    }

    /// Cast the symbol's arena index to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.n.get() as usize - 1
    }

    /// Returns the symbol with the same arena index in another grammar.
    ///
    /// Used when a grammar is cloned: the clone's arena has the same layout.
    pub fn rebind(self, grammar: GrammarId) -> Self {
        Symbol { grammar, n: self.n }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.grammar, self.usize())
    }
}

impl SymbolKind {
    /// Whether this is [`SymbolKind::Terminal`].
    pub fn is_terminal(self) -> bool {
        self == SymbolKind::Terminal
    }

    /// Whether this is [`SymbolKind::Nonterminal`].
    pub fn is_nonterminal(self) -> bool {
        self == SymbolKind::Nonterminal
    }
}
