use mindist::Grammar;

/// `<E> ::= <E> + <E> | 1`, with every bracketing of a sum.
pub fn grammar() -> Grammar {
    Grammar::from_rules("<E>", [("<E>", vec![vec!["<E>", "+", "<E>"], vec!["1"]])]).unwrap()
}
