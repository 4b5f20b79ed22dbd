use cfg_rewrite::{
    Grammar, GrammarDescription, GrammarError, ProductionDescription, ProductionDraft, SymbolKind,
};

mod support;

#[test]
fn test_render() {
    let mut grammar = Grammar::new();
    let [s, a_nt] = grammar.nonterminals_named(["S", "A"]);
    let [a, b] = grammar.terminals_named(["a", "b"]);

    grammar
        .rule(s)
        .unwrap()
        .rhs([a_nt, b])
        .unwrap()
        .rhs([])
        .unwrap()
        .rule(a_nt)
        .unwrap()
        .rhs([a])
        .unwrap();

    assert_eq!(grammar.productions_to_string(), "S -> A b\nS -> ε\nA -> a\n");
    assert_eq!(grammar.production_to_string(&grammar.productions()[0]), "S -> A b");
}

#[test]
fn test_rule_builder_labels() {
    let mut grammar = Grammar::new();
    let s = grammar.create_nonterminal("S");
    let a = grammar.create_terminal("a");

    grammar
        .rule(s)
        .unwrap()
        .rhs([a])
        .unwrap()
        .named("pair")
        .rhs([a, a])
        .unwrap()
        .rhs([a, a, a])
        .unwrap();

    let names: Vec<_> = grammar.productions().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["S #1", "pair", "S #3"]);
}

#[test]
fn test_creation_order() {
    let mut grammar = Grammar::new();
    let a = grammar.create_terminal("a");
    let s = grammar.create_nonterminal("S");
    let b = grammar.create_terminal("b");
    let t = grammar.create_nonterminal("T");

    assert_eq!(grammar.symbols().collect::<Vec<_>>(), [a, s, b, t]);
    assert_eq!(grammar.terminals().collect::<Vec<_>>(), [a, b]);
    assert_eq!(grammar.nonterminals().collect::<Vec<_>>(), [s, t]);
    assert_eq!(grammar.symbol_kind(s), Some(SymbolKind::Nonterminal));
    assert!(grammar.is_terminal(a));
    assert!(grammar.is_nonterminal(t));
    assert_eq!(grammar.find_symbol("b"), Some(b));
    assert_eq!(grammar.find_symbol("c"), None);
}

#[test]
fn test_start_symbol() {
    let mut grammar = Grammar::new();
    let s = grammar.create_nonterminal("S");
    let a = grammar.create_terminal("a");

    assert_eq!(grammar.start_symbol(), None);
    assert_eq!(
        grammar.set_start_symbol(a),
        Err(GrammarError::NotANonterminal { name: "a".to_string() })
    );
    grammar.set_start_symbol(s).unwrap();
    assert_eq!(grammar.start_symbol(), Some(s));
    grammar.clear_start_symbol();
    assert_eq!(grammar.start_symbol(), None);
}

#[test]
fn test_terminal_lhs_is_rejected() {
    let mut grammar = Grammar::new();
    let a = grammar.create_terminal("a");

    assert_eq!(
        grammar.create_production("bad", a, vec![a]),
        Err(GrammarError::NotANonterminal { name: "a".to_string() })
    );
    assert!(grammar.rule(a).is_err());
    assert!(grammar.productions().is_empty());
}

#[test]
fn test_foreign_symbol() {
    let mut first = Grammar::new();
    let mut second = Grammar::new();
    let s = first.create_nonterminal("S");
    let a = first.create_terminal("a");
    let t = second.create_nonterminal("S");

    assert!(!second.owns(s));
    assert_eq!(
        second.create_production("p", t, vec![a]),
        Err(GrammarError::ForeignSymbol { symbol: a })
    );
    assert_eq!(
        second.set_start_symbol(s),
        Err(GrammarError::ForeignSymbol { symbol: s })
    );
    assert_eq!(second.remove_symbol(s), Ok(false));
    assert!(second.productions().is_empty());
}

#[test]
fn test_remove_symbol() {
    let mut grammar = Grammar::new();
    let [s, unused] = grammar.nonterminals_named(["S", "Unused"]);
    let a = grammar.create_terminal("a");
    grammar.rule(s).unwrap().rhs([a]).unwrap();
    grammar.set_start_symbol(s).unwrap();

    assert_eq!(
        grammar.remove_symbol(a),
        Err(GrammarError::SymbolInUse {
            name: "a".to_string(),
            production: "S #1".to_string(),
        })
    );
    assert_eq!(grammar.remove_symbol(unused), Ok(true));
    assert_eq!(grammar.remove_symbol(unused), Ok(false));
    assert!(!grammar.owns(unused));
    assert_eq!(grammar.symbols().collect::<Vec<_>>(), [s, a]);

    let id = grammar.productions()[0].id();
    assert!(grammar.remove_production(id));
    assert!(!grammar.remove_production(id));
    assert_eq!(
        grammar.remove_symbol(s),
        Err(GrammarError::StartSymbolInUse { name: "S".to_string() })
    );
    assert_eq!(grammar.remove_symbol(a), Ok(true));
    assert_eq!(
        grammar.create_production("stale", s, vec![a]),
        Err(GrammarError::RemovedSymbol { symbol: a })
    );
}

#[test]
fn test_removed_index_is_not_reused() {
    let mut grammar = Grammar::new();
    let a = grammar.create_terminal("a");
    assert_eq!(grammar.remove_symbol(a), Ok(true));
    let b = grammar.create_terminal("b");

    assert_ne!(a, b);
    assert!(!grammar.owns(a));
    assert_eq!(grammar.symbol_name(a), None);
    assert_eq!(grammar.num_syms(), 2);
}

#[test]
fn test_production_setters() {
    let mut grammar = support::grammar(&["S -> a", "T -> b"]);
    let s = grammar.find_symbol("S").unwrap();
    let t = grammar.find_symbol("T").unwrap();
    let b = grammar.find_symbol("b").unwrap();
    let id = grammar.productions()[0].id();

    grammar.set_production_rhs(id, vec![t, b]).unwrap();
    grammar.set_production_name(id, "first").unwrap();
    assert_eq!(
        grammar.set_production_lhs(id, b),
        Err(GrammarError::NotANonterminal { name: "b".to_string() })
    );
    grammar.set_production_lhs(id, t).unwrap();
    support::assert_productions(&grammar, &["T -> T b", "T -> b"]);
    assert_eq!(grammar.production(id).map(|p| p.name()), Some("first"));
    assert!(grammar.production(id).unwrap().is_left_recursion());

    assert!(grammar.remove_production(id));
    assert_eq!(
        grammar.set_production_rhs(id, vec![s]),
        Err(GrammarError::UnknownProduction { id })
    );
    assert_eq!(
        grammar.set_production_name(id, "gone"),
        Err(GrammarError::UnknownProduction { id })
    );
}

#[test]
fn test_symbol_names() {
    let mut grammar = Grammar::new();
    let s = grammar.create_nonterminal("S");
    let a = grammar.create_terminal("a");
    grammar.rule(s).unwrap().rhs([a]).unwrap();

    grammar.set_symbol_name(s, "Start").unwrap();
    assert_eq!(grammar.symbol_name(s), Some("Start"));
    support::assert_productions(&grammar, &["Start -> a"]);

    let x = grammar.create_terminal("x");
    assert_eq!(grammar.remove_symbol(x), Ok(true));
    assert_eq!(
        grammar.set_symbol_name(x, "y"),
        Err(GrammarError::RemovedSymbol { symbol: x })
    );
}

#[test]
fn test_left_production_map() {
    let grammar = support::grammar(&["S -> A b", "A -> a", "S -> c", "A -> ε"]);
    let s = grammar.find_symbol("S").unwrap();
    let a_nt = grammar.find_symbol("A").unwrap();
    let ids: Vec<_> = grammar.productions().iter().map(|p| p.id()).collect();

    let map = grammar.left_production_map();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(s), [ids[0], ids[2]]);
    assert_eq!(map.get(a_nt), [ids[1], ids[3]]);
    assert!(map.get(grammar.find_symbol("b").unwrap()).is_empty());
    assert_eq!(map.iter().map(|(lhs, _)| lhs).collect::<Vec<_>>(), [s, a_nt]);
}

#[test]
fn test_left_production_map_is_recomputed() {
    let mut grammar = support::grammar(&["S -> a", "T -> b"]);
    let s = grammar.find_symbol("S").unwrap();
    let t = grammar.find_symbol("T").unwrap();
    let id = grammar.productions()[1].id();
    let before = grammar.left_production_map();

    grammar.set_production_lhs(id, s).unwrap();

    assert_eq!(before.get(t), [id]);
    let after = grammar.left_production_map();
    assert!(after.get(t).is_empty());
    assert_eq!(after.get(s).len(), 2);
}

#[test]
fn test_clone_is_independent() {
    let mut original = support::grammar(&["S -> S a", "S -> b"]);
    let s = original.find_symbol("S").unwrap();
    let (mut copy, mapping) = original.clone_with_mapping();

    assert_ne!(original.id(), copy.id());
    assert_eq!(copy.productions_to_string(), original.productions_to_string());
    let copied_s = mapping.get(s).unwrap();
    assert!(copy.owns(copied_s));
    assert!(!copy.owns(s));
    assert_eq!(copy.symbol_name(copied_s), Some("S"));
    assert_eq!(copy.start_symbol(), Some(copied_s));
    assert_eq!(
        mapping.production(original.productions()[0].id()),
        Some(copy.productions()[0].id())
    );

    let id = copy.productions()[0].id();
    copy.remove_production(id);
    copy.set_symbol_name(copied_s, "T").unwrap();
    support::assert_productions(&original, &["S -> S a", "S -> b"]);
    support::assert_productions(&copy, &["T -> b"]);

    assert_eq!(
        copy.create_production("mixed", copied_s, vec![s]),
        Err(GrammarError::ForeignSymbol { symbol: s })
    );
    for grammar in [&original, &copy] {
        assert!(grammar.symbols().all(|sym| sym.grammar() == grammar.id()));
        for production in grammar.productions() {
            assert_eq!(production.grammar(), grammar.id());
            assert!(grammar.owns(production.lhs()));
            assert!(production.rhs().iter().all(|&sym| grammar.owns(sym)));
        }
    }
    let plain_clone = original.clone();
    assert_ne!(plain_clone.id(), original.id());
    assert_eq!(plain_clone.productions_to_string(), original.productions_to_string());
}

#[test]
fn test_replace_productions() {
    let mut grammar = support::grammar(&["S -> a", "S -> b"]);
    let s = grammar.find_symbol("S").unwrap();
    let a = grammar.find_symbol("a").unwrap();
    let kept = grammar.productions()[1].id();
    let removed = grammar.productions()[0].id();

    let drafts = vec![
        grammar.productions()[1].to_draft(),
        ProductionDraft::new("new", s, vec![a, a]),
    ];
    grammar.replace_productions(drafts).unwrap();

    support::assert_productions(&grammar, &["S -> b", "S -> a a"]);
    assert_eq!(grammar.productions()[0].id(), kept);
    assert_ne!(grammar.productions()[1].id(), removed);
    assert!(grammar.production(removed).is_none());
}

#[test]
fn test_replace_productions_is_atomic() {
    let mut grammar = support::grammar(&["S -> a"]);
    let s = grammar.find_symbol("S").unwrap();
    let a = grammar.find_symbol("a").unwrap();
    let draft = grammar.productions()[0].to_draft();
    let id = draft.origin.unwrap();

    assert_eq!(
        grammar.replace_productions(vec![draft.clone(), draft.clone()]),
        Err(GrammarError::DuplicateProduction { id })
    );
    assert_eq!(
        grammar.replace_productions(vec![
            ProductionDraft::new("ok", s, vec![]),
            ProductionDraft::new("bad", a, vec![]),
        ]),
        Err(GrammarError::NotANonterminal { name: "a".to_string() })
    );
    support::assert_productions(&grammar, &["S -> a"]);
    assert_eq!(grammar.productions()[0].id(), id);
}

#[test]
fn test_nullable_symbols() {
    let grammar = support::grammar(&["S -> A B", "A -> ε", "B -> A A", "C -> c"]);
    let nullable = grammar.nullable_symbols();
    let names: Vec<_> = nullable
        .iter()
        .map(|sym| grammar.symbol_name(sym).unwrap())
        .collect();

    assert_eq!(names, ["S", "A", "B"]);
}

#[test]
fn test_description_round_trip() {
    let grammar = support::grammar(&["E -> E + T", "E -> T", "T -> id", "T -> ε"]);
    let description = grammar.describe();

    assert_eq!(description.nonterminals, ["E", "T"]);
    assert_eq!(description.terminals, ["+", "id"]);
    assert_eq!(description.start.as_deref(), Some("E"));
    assert_eq!(
        description.productions[0],
        ProductionDescription {
            name: "E #1".to_string(),
            lhs: "E".to_string(),
            rhs: vec!["E".to_string(), "+".to_string(), "T".to_string()],
        }
    );

    let loaded = Grammar::from_description(&description).unwrap();
    assert_eq!(loaded.productions_to_string(), grammar.productions_to_string());
    assert_eq!(loaded.describe(), description);
}

#[test]
fn test_description_errors() {
    let duplicate = GrammarDescription {
        terminals: vec!["a".to_string()],
        nonterminals: vec!["a".to_string()],
        ..GrammarDescription::default()
    };
    assert_eq!(
        Grammar::from_description(&duplicate).err(),
        Some(GrammarError::DuplicateName { name: "a".to_string() })
    );

    let undefined = GrammarDescription {
        nonterminals: vec!["S".to_string()],
        productions: vec![ProductionDescription {
            name: "S #1".to_string(),
            lhs: "S".to_string(),
            rhs: vec!["x".to_string()],
        }],
        ..GrammarDescription::default()
    };
    assert_eq!(
        Grammar::from_description(&undefined).err(),
        Some(GrammarError::UndefinedName { name: "x".to_string() })
    );
}
