use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ForestError {
    /// No finished start state spans the whole input.
    #[error("no derivation spans the input")]
    NoParse,
}
