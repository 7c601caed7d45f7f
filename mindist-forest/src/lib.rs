//! Minimum-penalty derivations, parse trees and repairs.

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
pub mod extract;
pub mod render;
pub mod repair;
pub mod tree;

pub use crate::error::ForestError;
pub use crate::extract::{Derivation, Extractor};
pub use crate::repair::{Edit, EditKind};
pub use crate::tree::{NodeId, NodeKind, ParseTree, Preorder, TreeNode};

#[cfg(test)]
mod tests;
