//! Error-correcting Earley parsing.
//!
//! A grammar is extended into a covering grammar that derives every string. Parsing with
//! it finds the derivation with the fewest penalized corrections, which repairs the input
//! with a minimal number of single-character edits.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, deny(warnings))]

pub mod correcting;
pub mod error;

pub use mindist_covering as covering;
pub use mindist_earley as earley;
pub use mindist_forest as forest;
pub use mindist_grammar as grammar;

pub use crate::correcting::{Correction, ErrorCorrectingParser};
pub use crate::error::Error;
pub use mindist_covering::{CoveringBuilder, CoveringConfig, CoveringError, CoveringMode};
pub use mindist_earley::{Chart, EarleyParser, ParseConfig, ParseError};
pub use mindist_forest::{Derivation, Edit, EditKind, Extractor, ForestError, ParseTree};
pub use mindist_grammar::{
    Grammar, GrammarBuilder, GrammarError, Role, Symbol, SymbolKind, Terminal,
};
