//! Names for helper nonterminals.

use cfg_rewrite_symbol::SymbolSource;

/// Returns `base` followed by `suffix`. When that name is taken by a live symbol,
/// a counter starting at 2 is appended until the name is free.
pub fn fresh_name(source: &SymbolSource, base: &str, suffix: &str) -> String {
    let primed = format!("{}{}", base, suffix);
    if !source.is_name_taken(&primed) {
        return primed;
    }
    (2..)
        .map(|n| format!("{}{}", primed, n))
        .find(|name| !source.is_name_taken(name))
        .unwrap_or(primed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_name() {
        let mut source = SymbolSource::new();
        source.nonterminal("S");
        assert_eq!(fresh_name(&source, "S", "'"), "S'");
    }

    #[test]
    fn test_probing() {
        let mut source = SymbolSource::new();
        source.nonterminal("S");
        source.nonterminal("S'");
        source.terminal("S'2");
        assert_eq!(fresh_name(&source, "S", "'"), "S'3");
    }

    #[test]
    fn test_removed_name_is_free() {
        let mut source = SymbolSource::new();
        let primed = source.nonterminal("E_tail");
        source.remove(primed);
        assert_eq!(fresh_name(&source, "E", "_tail"), "E_tail");
    }
}
