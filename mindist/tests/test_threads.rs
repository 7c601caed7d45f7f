mod grammars;
mod support;

use std::thread;

use mindist::{CoveringConfig, ErrorCorrectingParser};

use support::*;

fn assert_sync<T: Sync + Send>() {}

#[test]
fn test_parser_is_shared_across_threads() {
    assert_sync::<ErrorCorrectingParser>();
    init_logger();
    let parser = parser(grammars::arith::grammar(), CoveringConfig::default());
    let inputs = ["1+1", "1+1+", "(1", "", "1++1", "((1)+1"];
    let expected = inputs
        .iter()
        .map(|input| parser.correct(input).unwrap())
        .collect::<Vec<_>>();
    let shared = &parser;
    let results = thread::scope(|scope| {
        let handles = inputs
            .iter()
            .map(|&input| scope.spawn(move || shared.correct(input).unwrap()))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(results, expected);
}

#[test]
fn test_deep_input() {
    init_logger();
    let parser = parser(grammars::arith::digits(), CoveringConfig::default());
    let input = "1+".repeat(60) + "2*";
    let correction = parser.correct(&input).unwrap();
    assert_eq!(correction.penalty, 1);
    assert_consistent(&parser, &input, &correction);
    assert!(correction.derivation.tree.depth() > 60);
}
