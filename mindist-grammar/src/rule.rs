//! Grammar rules.

use std::sync::Arc;

use crate::symbol::Symbol;

/// Position of a rule in the grammar's rule array.
pub type RuleId = usize;

/// Standard grammar rule representation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rule {
    /// The rule's left-hand side symbol.
    pub lhs: Symbol,
    /// The rule's right-hand side symbols.
    pub rhs: Arc<[Symbol]>,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: impl AsRef<[Symbol]>) -> Self {
        Rule {
            lhs,
            rhs: rhs.as_ref().into(),
        }
    }

    /// Returns the symbol right after the dot, or `None` if the dot is at the end.
    #[inline]
    pub fn postdot(&self, dot: usize) -> Option<Symbol> {
        self.rhs.get(dot).copied()
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}
