use mindist_covering::CoveringBuilder;
use mindist_earley::{EarleyParser, ParseConfig};
use mindist_grammar::Grammar;
use test_case::test_case;

use crate::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn arith() -> Grammar {
    Grammar::from_rules(
        "<E>",
        [
            ("<E>", vec![vec!["<T>", "+", "<E>"], vec!["<T>"]]),
            ("<T>", vec![vec!["1"], vec!["(", "<E>", ")"]]),
        ],
    )
    .unwrap()
}

fn extract(grammar: &Grammar, input: &str, config: ParseConfig) -> Vec<Derivation> {
    let chart = EarleyParser::new(grammar, config).parse(input).unwrap();
    Extractor::new(&chart).extract()
}

#[test]
fn test_plain_derivation() {
    init_logger();
    let derivations = extract(&arith(), "1+1", ParseConfig::default());
    assert_eq!(derivations.len(), 1);
    assert_eq!(derivations[0].penalty, 0);
    assert_eq!(
        derivations[0].tree.to_sexpr(),
        "(<E> (<T> 1) + (<E> (<T> 1)))"
    );
}

#[test]
fn test_plain_rejection_is_empty() {
    let grammar = Grammar::from_rules("<A>", [("<A>", vec![vec!["a"]])]).unwrap();
    let chart = EarleyParser::new(&grammar, ParseConfig::default())
        .parse("b")
        .unwrap();
    let extractor = Extractor::new(&chart);
    assert!(extractor.extract().is_empty());
    assert_eq!(extractor.best(), Err(ForestError::NoParse));
}

#[test_case("1+1", 0, "1+1" ; "valid")]
#[test_case("1+1+", 1, "1+1" ; "trailing plus")]
#[test_case("(1", 1, "1" ; "stray parenthesis")]
#[test_case("", 1, "1" ; "empty")]
#[test_case("1+x", 1, "1+1" ; "foreign digit")]
fn test_covering_repair(input: &str, penalty: u32, repaired: &str) {
    init_logger();
    let grammar = arith();
    let covering = CoveringBuilder::new(&grammar)
        .alphabet("x".chars())
        .build()
        .unwrap();
    let chart = EarleyParser::new(&covering, ParseConfig::default())
        .parse(input)
        .unwrap();
    let best = Extractor::new(&chart).best().unwrap();
    assert_eq!(Some(best.penalty), chart.min_penalty());
    assert_eq!(best.penalty, penalty);
    assert_eq!(best.tree.yield_string(), input);
    assert_eq!(best.tree.repaired(), repaired);
    assert_eq!(best.tree.strip_covering().yield_string(), repaired);
    assert_eq!(best.tree.edits().len() as u32, penalty);
}

#[test]
fn test_zero_penalty_matches_plain_tree() {
    let grammar = arith();
    let covering = CoveringBuilder::new(&grammar).build().unwrap();
    for input in ["1", "1+1", "(1+1)+1", "((1))"] {
        let plain = extract(&grammar, input, ParseConfig::default());
        let covered = extract(&covering, input, ParseConfig::default());
        assert_eq!(covered[0].penalty, 0);
        assert_eq!(
            covered[0].tree.strip_covering().to_sexpr(),
            plain[0].tree.to_sexpr()
        );
    }
}

#[test]
fn test_several_trees_ascending() {
    let grammar = arith();
    let covering = CoveringBuilder::new(&grammar).build().unwrap();
    let derivations = extract(&covering, "1+1+", ParseConfig::new().max_trees(4));
    assert!(derivations.len() >= 2);
    assert!(derivations.len() <= 4);
    assert_eq!(derivations[0].penalty, 1);
    assert!(derivations
        .windows(2)
        .all(|pair| pair[0].penalty <= pair[1].penalty));
    let repairs = derivations
        .iter()
        .filter(|derivation| derivation.penalty == 1)
        .map(|derivation| derivation.tree.repaired())
        .collect::<Vec<_>>();
    assert!(repairs.contains(&"1+1".to_string()));
    assert!(repairs.contains(&"1+1+1".to_string()));
}

#[test]
fn test_exact_penalty_filter() {
    let grammar = arith();
    let covering = CoveringBuilder::new(&grammar).build().unwrap();
    let chart = EarleyParser::new(&covering, ParseConfig::default())
        .parse("1+1+")
        .unwrap();
    let exact = Extractor::new(&chart).max_trees(3).penalty(Some(1)).extract();
    assert_eq!(exact.len(), 2);
    assert!(exact.iter().all(|derivation| derivation.penalty == 1));
    let none = Extractor::new(&chart).max_trees(3).penalty(Some(0)).extract();
    assert!(none.is_empty());
}

#[test]
fn test_extraction_is_idempotent() {
    let grammar = arith();
    let covering = CoveringBuilder::new(&grammar).build().unwrap();
    let chart = EarleyParser::new(&covering, ParseConfig::new().max_trees(3))
        .parse("(1++1")
        .unwrap();
    let first = Extractor::new(&chart).extract();
    let second = Extractor::new(&chart).extract();
    assert_eq!(first, second);
}

#[test]
fn test_ambiguous_tie_break_is_leftmost_shortest() {
    let grammar = Grammar::from_rules(
        "<S>",
        [
            ("<S>", vec![vec!["<A>", "<A>"]]),
            ("<A>", vec![vec!["a"], vec!["a", "a"]]),
        ],
    )
    .unwrap();
    let best = extract(&grammar, "aaa", ParseConfig::default());
    assert_eq!(best[0].tree.to_sexpr(), "(<S> (<A> a) (<A> a a))");
}

#[test]
fn test_cyclic_grammar_yields_finite_tree() {
    let grammar = Grammar::from_rules(
        "<S>",
        [
            ("<S>", vec![vec!["<S>"], vec!["<B>"], vec!["s"]]),
            ("<B>", vec![vec!["<S>"], vec![]]),
        ],
    )
    .unwrap();
    let best = extract(&grammar, "s", ParseConfig::default());
    assert_eq!(best[0].tree.to_sexpr(), "(<S> s)");
    let best = extract(&grammar, "", ParseConfig::default());
    assert_eq!(best[0].tree.to_sexpr(), "(<S> (<B>))");
}

#[test]
fn test_deep_left_recursion_tree() {
    let grammar =
        Grammar::from_rules("<L>", [("<L>", vec![vec!["<L>", "a"], vec!["a"]])]).unwrap();
    let input = "a".repeat(200_000);
    let best = extract(&grammar, &input, ParseConfig::default())
        .into_iter()
        .next()
        .unwrap();
    let tree = &best.tree;
    assert_eq!(tree.depth(), 200_001);
    assert_eq!(tree.yield_string(), input);
    assert_eq!(tree.repaired(), input);
    assert_eq!(tree.strip_covering().len(), tree.len());
    let sexpr = tree.to_sexpr();
    assert!(sexpr.starts_with("(<L> (<L> (<L>"));
    assert_eq!(sexpr.matches('(').count(), 200_000);
}

fn ambiguous_sum() -> Grammar {
    Grammar::from_rules("<E>", [("<E>", vec![vec!["<E>", "+", "<E>"], vec!["1"]])]).unwrap()
}

const RIGHT_NESTED: &str = "(<E> (<E> 1) + (<E> (<E> 1) + (<E> 1)))";
const LEFT_NESTED: &str = "(<E> (<E> (<E> 1) + (<E> 1)) + (<E> 1))";

#[test]
fn test_every_cheapest_tree_of_ambiguous_input() {
    init_logger();
    let grammar = ambiguous_sum();
    let derivations = extract(&grammar, "1+1+1", ParseConfig::new().max_trees(10));
    let sexprs = derivations
        .iter()
        .map(|derivation| derivation.tree.to_sexpr())
        .collect::<Vec<_>>();
    assert_eq!(sexprs, [RIGHT_NESTED, LEFT_NESTED]);
    assert!(derivations.iter().all(|derivation| derivation.penalty == 0));

    let derivations = extract(&grammar, "1+1+1+1", ParseConfig::new().max_trees(10));
    assert_eq!(derivations.len(), 5);
    assert!(derivations.iter().all(|derivation| derivation.penalty == 0));
    let distinct = derivations
        .iter()
        .map(|derivation| derivation.tree.to_sexpr())
        .collect::<std::collections::HashSet<_>>();
    assert_eq!(distinct.len(), 5);
}

#[test]
fn test_every_cheapest_covering_tree_comes_first() {
    init_logger();
    let grammar = ambiguous_sum();
    let covering = CoveringBuilder::new(&grammar).build().unwrap();
    let derivations = extract(&covering, "1+1+1", ParseConfig::new().max_trees(3));
    assert_eq!(derivations.len(), 3);
    let cheapest = derivations[..2]
        .iter()
        .map(|derivation| {
            assert_eq!(derivation.penalty, 0);
            derivation.tree.strip_covering().to_sexpr()
        })
        .collect::<Vec<_>>();
    assert_eq!(cheapest, [RIGHT_NESTED, LEFT_NESTED]);
    assert!(derivations[2].penalty > 0);
    assert_ne!(derivations[0].tree, derivations[1].tree);
}

#[test]
fn test_limited_trees_are_the_cheapest() {
    let grammar = ambiguous_sum();
    let derivations = extract(&grammar, "1+1+1+1", ParseConfig::new().max_trees(2));
    let all = extract(&grammar, "1+1+1+1", ParseConfig::new().max_trees(10));
    assert_eq!(derivations[..], all[..2]);
}
