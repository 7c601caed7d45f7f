//! Covering grammars in the style of Aho and Peterson.
//!
//! A covering grammar derives every string over its alphabet. Derivations that deviate from
//! the original grammar go through penalized nonterminals, so the cheapest parse of a string
//! measures how many single-character edits separate it from the original language.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, deny(warnings))]

pub mod builder;
pub mod config;
pub mod error;

pub use crate::builder::CoveringBuilder;
pub use crate::config::{CoveringConfig, CoveringMode};
pub use crate::error::CoveringError;
