use thiserror::Error;

/// Structural defects found while building a grammar.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GrammarError {
    /// A nonterminal is referenced but has no production set.
    #[error("undefined nonterminal {0}")]
    UndefinedSymbol(String),
    /// A user-supplied nonterminal uses a name reserved for the covering grammar.
    #[error("nonterminal name {0} is reserved")]
    ReservedName(String),
    /// A nonterminal name is not wrapped in angle brackets.
    #[error("nonterminal name {0:?} must be wrapped in angle brackets")]
    InvalidName(String),
    /// No start symbol was assigned.
    #[error("the grammar has no start symbol")]
    MissingStart,
}
