use thiserror::Error;

use crate::covering::CoveringError;
use crate::earley::ParseError;
use crate::forest::ForestError;
use crate::grammar::GrammarError;

/// Any failure of error-correcting parsing.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Covering(#[from] CoveringError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Forest(#[from] ForestError),
}
