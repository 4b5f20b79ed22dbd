#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use cfg_rewrite::{Grammar, Symbol};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a grammar from lines such as `S -> S a` or `S -> ε`.
///
/// Names that appear on a left-hand side are nonterminals, created in order of first
/// appearance. All other names are terminals. The first left-hand side is the start symbol.
pub fn grammar(lines: &[&str]) -> Grammar {
    let parsed: Vec<(&str, Vec<&str>)> = lines
        .iter()
        .map(|line| {
            let (lhs, rhs) = line.split_once("->").expect("missing `->`");
            let rhs = rhs
                .split_whitespace()
                .filter(|&name| name != "ε")
                .collect();
            (lhs.trim(), rhs)
        })
        .collect();

    let mut grammar = Grammar::new();
    let mut syms: BTreeMap<&str, Symbol> = BTreeMap::new();
    for (lhs, _) in &parsed {
        if !syms.contains_key(lhs) {
            syms.insert(*lhs, grammar.create_nonterminal(*lhs));
        }
    }
    for (_, rhs) in &parsed {
        for name in rhs {
            if !syms.contains_key(name) {
                syms.insert(*name, grammar.create_terminal(*name));
            }
        }
    }
    for (lhs, rhs) in &parsed {
        let rhs: Vec<Symbol> = rhs.iter().map(|name| syms[name]).collect();
        grammar
            .rule(syms[lhs])
            .and_then(|rule| rule.rhs(rhs))
            .expect("invalid production");
    }
    if let Some((start, _)) = parsed.first() {
        grammar.set_start_symbol(syms[start]).expect("invalid start");
    }
    grammar
}

pub fn assert_productions(grammar: &Grammar, expected: &[&str]) {
    let expected: String = expected.iter().map(|line| format!("{}\n", line)).collect();
    let actual = grammar.productions_to_string();
    if actual != expected {
        eprintln!("Left:\n{}", actual);
        eprintln!("Right:\n{}", expected);
    }
    assert_eq!(actual, expected, "Productions expected to be equal");
}

/// Enumerates the sentences of up to `max_len` terminals derived from the start symbol.
pub fn sentences(grammar: &Grammar, max_len: usize) -> BTreeSet<Vec<String>> {
    let start = grammar.start_symbol().expect("no start symbol");
    let mut language: BTreeMap<Symbol, BTreeSet<Vec<Symbol>>> = BTreeMap::new();
    for terminal in grammar.terminals() {
        language.insert(terminal, BTreeSet::from([vec![terminal]]));
    }
    loop {
        let mut changed = false;
        for production in grammar.productions() {
            let mut derived = BTreeSet::from([vec![]]);
            for sym in production.rhs() {
                let empty = BTreeSet::new();
                let part = language.get(sym).unwrap_or(&empty);
                let mut next = BTreeSet::new();
                for prefix in &derived {
                    for suffix in part {
                        if prefix.len() + suffix.len() <= max_len {
                            let mut sentence: Vec<Symbol> = Vec::clone(prefix);
                            sentence.extend_from_slice(suffix);
                            next.insert(sentence);
                        }
                    }
                }
                derived = next;
            }
            let entry = language.entry(production.lhs()).or_default();
            for sentence in derived {
                changed |= entry.insert(sentence);
            }
        }
        if !changed {
            break;
        }
    }
    language
        .get(&start)
        .map(|sentences| {
            sentences
                .iter()
                .map(|sentence| {
                    sentence
                        .iter()
                        .map(|&sym| grammar.display_name(sym).into_owned())
                        .collect::<Vec<String>>()
                })
                .collect()
        })
        .unwrap_or_default()
}
