use mindist_grammar::GrammarError;
use thiserror::Error;

/// Reasons a covering grammar cannot be constructed.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CoveringError {
    /// The grammar uses no terminals and no extra characters were given.
    #[error("the alphabet is empty")]
    EmptyAlphabet,
    /// With a single character there is nothing to substitute it with.
    #[error("the alphabet has a single character {0:?}")]
    DegenerateAlphabet(char),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}
