use mindist::Grammar;

/// Balanced parentheses.
pub fn grammar() -> Grammar {
    Grammar::from_rules(
        "<S>",
        [("<S>", vec![vec!["(", "<S>", ")", "<S>"], vec![]])],
    )
    .unwrap()
}
