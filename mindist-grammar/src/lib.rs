//! Immutable context-free grammars over characters, built for error-correcting parsing.
//!
//! Nonterminals are written in angle brackets, as in `<expr>`. Every other string is a
//! literal, split into one terminal per character.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, deny(warnings))]

pub mod error;
pub mod grammar;
mod nullable;
mod occurence_map;
pub mod rule;
pub mod rule_builder;
pub mod source;
pub mod symbol;
pub mod symbol_bit_set;

pub use crate::error::GrammarError;
pub use crate::grammar::{Grammar, GrammarBuilder};
pub use crate::rule::{Rule, RuleId};
pub use crate::rule_builder::RuleBuilder;
pub use crate::source::{SymbolName, SymbolSource};
pub use crate::symbol::{is_nonterminal_name, Role, Symbol, SymbolKind, Terminal};
pub use crate::symbol_bit_set::SymbolBitSet;
