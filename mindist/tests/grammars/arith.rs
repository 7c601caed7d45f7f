use mindist::{Grammar, GrammarBuilder};

/// `<E> ::= <T> + <E> | <T>` and `<T> ::= 1 | ( <E> )`.
pub fn grammar() -> Grammar {
    Grammar::from_rules(
        "<E>",
        [
            ("<E>", vec![vec!["<T>", "+", "<E>"], vec!["<T>"]]),
            ("<T>", vec![vec!["1"], vec!["(", "<E>", ")"]]),
        ],
    )
    .unwrap()
}

/// Sums of several digits, with products.
pub fn digits() -> Grammar {
    let mut builder = GrammarBuilder::new();
    builder
        .rule("<sum>")
        .rhs(["<sum>", "+", "<product>"])
        .rhs(["<product>"])
        .rule("<product>")
        .rhs(["<product>", "*", "<num>"])
        .rhs(["<num>"])
        .rule("<num>")
        .rhs(["<digit>", "<num>"])
        .rhs(["<digit>"]);
    for digit in ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"] {
        builder.rule("<digit>").rhs([digit]);
    }
    builder.set_start("<sum>");
    builder.build().unwrap()
}
