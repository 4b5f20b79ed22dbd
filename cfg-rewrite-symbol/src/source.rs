//! The symbol arena.

use std::iter;
use std::slice;

use crate::{GrammarId, Symbol, SymbolKind};

/// A source of symbols, which also stores their names and kinds.
///
/// Removed symbols leave a hole behind. Their indices are never handed out again,
/// so a stale handle is recognized as removed.
#[allow(missing_copy_implementations)]
#[derive(Debug)]
pub struct SymbolSource {
    id: GrammarId,
    entries: Vec<Option<SymbolEntry>>,
}

#[derive(Clone, Debug)]
struct SymbolEntry {
    name: String,
    kind: SymbolKind,
}

/// Iterator over the live symbols of a source, in creation order.
pub struct Iter<'a> {
    source: &'a SymbolSource,
    iter: iter::Enumerate<slice::Iter<'a, Option<SymbolEntry>>>,
}

impl Default for SymbolSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolSource {
    /// Creates a source of symbols with an empty symbol space and a fresh grammar ID.
    pub fn new() -> Self {
        SymbolSource {
            id: GrammarId::fresh(),
            entries: vec![],
        }
    }

    /// The grammar ID that all symbols of this source carry.
    pub fn id(&self) -> GrammarId {
        self.id
    }

    /// Generates a new unique symbol.
    pub fn next_sym(&mut self, kind: SymbolKind, name: impl Into<String>) -> Symbol {
        let sym = Symbol::from_parts(self.id, self.entries.len());
        self.entries.push(Some(SymbolEntry {
            name: name.into(),
            kind,
        }));
        sym
    }

    /// Generates a new terminal symbol.
    pub fn terminal(&mut self, name: impl Into<String>) -> Symbol {
        self.next_sym(SymbolKind::Terminal, name)
    }

    /// Generates a new nonterminal symbol.
    pub fn nonterminal(&mut self, name: impl Into<String>) -> Symbol {
        self.next_sym(SymbolKind::Nonterminal, name)
    }

    /// Returns generated symbols of one kind, named in order.
    pub fn with_names<const N: usize>(&mut self, kind: SymbolKind, names: [&str; N]) -> [Symbol; N] {
        names.map(|name| self.next_sym(kind, name))
    }

    /// Returns the number of symbol indices in use, including removed ones.
    ///
    /// Bit sets and matrices indexed by symbols have this size.
    pub fn num_syms(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of live symbols.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    /// Whether there are no live symbols.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the symbol was generated by this source and not removed since.
    pub fn contains(&self, sym: Symbol) -> bool {
        self.entry(sym).is_some()
    }

    /// Whether the symbol was generated by this source, removed or not.
    pub fn generated(&self, sym: Symbol) -> bool {
        sym.grammar() == self.id && sym.usize() < self.entries.len()
    }

    /// Returns the kind of a live symbol.
    pub fn kind(&self, sym: Symbol) -> Option<SymbolKind> {
        self.entry(sym).map(|entry| entry.kind)
    }

    /// Returns the name of a live symbol.
    pub fn name_of(&self, sym: Symbol) -> Option<&str> {
        self.entry(sym).map(|entry| &entry.name[..])
    }

    /// Renames a live symbol. Returns `false` if there is no such symbol.
    pub fn set_name(&mut self, sym: Symbol, name: impl Into<String>) -> bool {
        match self.entry_mut(sym) {
            Some(entry) => {
                entry.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Removes a live symbol. Returns `false` if there is no such symbol.
    pub fn remove(&mut self, sym: Symbol) -> bool {
        if !self.generated(sym) {
            return false;
        }
        self.entries[sym.usize()].take().is_some()
    }

    /// Finds the first live symbol with the given name.
    pub fn find(&self, name: &str) -> Option<Symbol> {
        self.iter().find(|&sym| self.name_of(sym) == Some(name))
    }

    /// Whether any live symbol has the given name.
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.entries
            .iter()
            .flatten()
            .any(|entry| entry.name == name)
    }

    /// Iterates over live symbols in creation order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            source: self,
            iter: self.entries.iter().enumerate(),
        }
    }

    /// Iterates over live terminal symbols in creation order.
    pub fn terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.iter()
            .filter(move |&sym| self.kind(sym) == Some(SymbolKind::Terminal))
    }

    /// Iterates over live nonterminal symbols in creation order.
    pub fn nonterminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.iter()
            .filter(move |&sym| self.kind(sym) == Some(SymbolKind::Nonterminal))
    }

    /// Copies all symbols into a new source with a fresh grammar ID.
    ///
    /// The copy has the same layout, so [`Symbol::rebind`] translates symbols
    /// of this source to symbols of the copy.
    pub fn fork(&self) -> Self {
        SymbolSource {
            id: GrammarId::fresh(),
            entries: self.entries.clone(),
        }
    }

    fn entry(&self, sym: Symbol) -> Option<&SymbolEntry> {
        if sym.grammar() != self.id {
            return None;
        }
        self.entries.get(sym.usize()).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, sym: Symbol) -> Option<&mut SymbolEntry> {
        if sym.grammar() != self.id {
            return None;
        }
        self.entries.get_mut(sym.usize()).and_then(Option::as_mut)
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, entry) in &mut self.iter {
            if entry.is_some() {
                return Some(Symbol::from_parts(self.source.id, index));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_order() {
        let mut source = SymbolSource::new();
        let a = source.terminal("a");
        let s = source.nonterminal("S");
        let b = source.terminal("b");

        assert_eq!(source.iter().collect::<Vec<_>>(), vec![a, s, b]);
        assert_eq!(source.terminals().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(source.nonterminals().collect::<Vec<_>>(), vec![s]);
        assert_eq!(source.name_of(s), Some("S"));
    }

    #[test]
    fn test_removed_index_is_not_reused() {
        let mut source = SymbolSource::new();
        let [a, b] = source.with_names(SymbolKind::Terminal, ["a", "b"]);

        assert!(source.remove(a));
        assert!(!source.remove(a));
        let c = source.terminal("c");

        assert_ne!(a, c);
        assert!(!source.contains(a));
        assert!(source.generated(a));
        assert_eq!(source.num_syms(), 3);
        assert_eq!(source.len(), 2);
        assert_eq!(source.iter().collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    fn test_foreign_symbol() {
        let mut first = SymbolSource::new();
        let mut second = SymbolSource::new();
        let a = first.terminal("a");
        let _ = second.terminal("a");

        assert!(!second.contains(a));
        assert_eq!(second.name_of(a), None);
        assert!(!second.remove(a));
    }

    #[test]
    fn test_fork() {
        let mut source = SymbolSource::new();
        let s = source.nonterminal("S");
        let fork = source.fork();

        assert_ne!(source.id(), fork.id());
        assert!(!fork.contains(s));
        assert_eq!(fork.name_of(s.rebind(fork.id())), Some("S"));
        assert_eq!(fork.kind(s.rebind(fork.id())), Some(SymbolKind::Nonterminal));
    }

    #[test]
    fn test_names_can_repeat() {
        let mut source = SymbolSource::new();
        let first = source.nonterminal("A");
        let second = source.nonterminal("A");

        assert_ne!(first, second);
        assert_eq!(source.find("A"), Some(first));
        assert!(source.set_name(second, "B"));
        assert!(source.is_name_taken("B"));
        assert!(!source.is_name_taken("C"));
    }
}
