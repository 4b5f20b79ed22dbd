#![cfg(feature = "transform")]

use cfg_rewrite::{GrammarRewriteExt, RewriteError, RewriteOptions};
use test_case::test_case;

mod support;

#[test]
fn test_common_first_symbol() {
    support::init_logger();
    let mut grammar = support::grammar(&["A -> a B", "A -> a C", "B -> b", "C -> c"]);

    let helpers = grammar.left_factor().unwrap();

    support::assert_productions(
        &grammar,
        &["A -> a A'", "B -> b", "C -> c", "A' -> B", "A' -> C"],
    );
    assert_eq!(helpers.len(), 1);
    assert_eq!(grammar.symbol_name(helpers[0]), Some("A'"));
}

#[test]
fn test_longest_common_prefix() {
    let mut grammar = support::grammar(&["S -> i E t S", "S -> i E t S e S", "S -> a", "E -> b"]);

    grammar.left_factor().unwrap();

    support::assert_productions(
        &grammar,
        &["S -> i E t S S'", "S -> a", "E -> b", "S' -> ε", "S' -> e S"],
    );
}

#[test]
fn test_nested_factoring() {
    support::init_logger();
    let mut grammar = support::grammar(&["A -> a b c", "A -> a b d", "A -> a e", "A -> f"]);

    let helpers = grammar.left_factor().unwrap();

    support::assert_productions(
        &grammar,
        &[
            "A -> a A'",
            "A -> f",
            "A' -> b A''",
            "A' -> e",
            "A'' -> c",
            "A'' -> d",
        ],
    );
    let names: Vec<_> = helpers
        .iter()
        .map(|&sym| grammar.symbol_name(sym).unwrap())
        .collect();
    assert_eq!(names, ["A'", "A''"]);
}

#[test]
fn test_two_groups() {
    let mut grammar = support::grammar(&["A -> x y", "A -> z", "A -> x w", "A -> z v"]);

    grammar.left_factor().unwrap();

    support::assert_productions(
        &grammar,
        &["A -> x A'", "A -> z A'2", "A' -> y", "A' -> w", "A'2 -> ε", "A'2 -> v"],
    );
}

#[test]
fn test_identical_alternatives() {
    let mut grammar = support::grammar(&["A -> a", "A -> a"]);

    grammar.left_factor().unwrap();

    support::assert_productions(&grammar, &["A -> a A'", "A' -> ε", "A' -> ε"]);
}

#[test]
fn test_factored_grammar_is_unchanged() {
    let mut grammar = support::grammar(&["A -> a B", "A -> b", "A -> ε", "B -> c"]);
    let before = grammar.productions_to_string();

    assert_eq!(grammar.left_factor(), Ok(vec![]));
    assert_eq!(grammar.productions_to_string(), before);
}

#[test_case(&["A -> a B", "A -> a C", "B -> b", "C -> c"] ; "simple")]
#[test_case(&["S -> i E t S", "S -> i E t S e S", "S -> a", "E -> b"] ; "dangling else")]
#[test_case(&["A -> a b c", "A -> a b d", "A -> a e", "A -> f"] ; "nested")]
#[test_case(&["E -> T + E", "E -> T", "T -> id * T", "T -> id", "T -> ( E )"] ; "right recursive expression")]
fn test_left_factoring(lines: &[&str]) {
    support::init_logger();
    let mut grammar = support::grammar(lines);
    let original = grammar.clone();

    grammar.left_factor().unwrap();
    let once = grammar.productions_to_string();

    for lhs in grammar.nonterminals() {
        let mut firsts: Vec<_> = grammar
            .productions_of(lhs)
            .filter_map(|p| p.rhs().first().copied())
            .collect();
        let len = firsts.len();
        firsts.sort();
        firsts.dedup();
        assert_eq!(firsts.len(), len, "alternatives share a first symbol");
    }
    assert_eq!(support::sentences(&grammar, 7), support::sentences(&original, 7));

    assert_eq!(grammar.left_factor(), Ok(vec![]));
    assert_eq!(grammar.productions_to_string(), once);
}

#[test]
fn test_production_limit() {
    let mut grammar = support::grammar(&["A -> a b", "A -> a c"]);
    let options = RewriteOptions::default().with_max_productions(2);

    assert_eq!(
        grammar.left_factor_with(&options),
        Err(RewriteError::TooManyProductions {
            limit: 2,
            nonterminal: "A".to_string(),
        })
    );
    support::assert_productions(&grammar, &["A -> a b", "A -> a c"]);
    assert_eq!(grammar.find_symbol("A'"), None);
}
