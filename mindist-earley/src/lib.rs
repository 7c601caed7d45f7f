//! Earley chart parsing with penalties.
//!
//! States are deduplicated per column by their dotted rule and origin, keeping the cheapest
//! penalty. With a covering grammar, the penalty of the cheapest finished root is the
//! number of edits that the input needs.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, deny(warnings))]

pub mod chart;
pub mod column;
pub mod config;
pub mod error;
pub mod parser;
pub mod penalty;
pub mod state;

pub use crate::chart::Chart;
pub use crate::column::Column;
pub use crate::config::ParseConfig;
pub use crate::error::ParseError;
pub use crate::parser::{Action, EarleyParser};
pub use crate::penalty::PenaltyModel;
pub use crate::state::{State, StateKey};
