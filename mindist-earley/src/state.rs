//! Dotted rules with their origin and penalty.

use mindist_grammar::{Grammar, RuleId, Symbol};

/// Identity of a state within a column. Two states with equal keys differ at most in
/// penalty, and only the cheaper one survives.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StateKey {
    pub rule: RuleId,
    pub dot: u32,
    pub origin: u32,
}

/// A dotted rule instance. The column that holds it is its end position.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct State {
    pub lhs: Symbol,
    pub rule: RuleId,
    pub dot: u32,
    /// Input position where the state began.
    pub origin: u32,
    /// Cheapest accumulated cost of the matched part.
    pub penalty: u32,
}

impl State {
    /// Creates a state predicted at `origin`.
    pub fn predicted(grammar: &Grammar, rule: RuleId, origin: usize) -> Self {
        State {
            lhs: grammar.rule(rule).lhs,
            rule,
            dot: 0,
            origin: origin as u32,
            penalty: 0,
        }
    }

    #[inline]
    pub fn key(&self) -> StateKey {
        StateKey {
            rule: self.rule,
            dot: self.dot,
            origin: self.origin,
        }
    }

    /// Moves the dot over one symbol, adding `cost` to the penalty.
    #[inline]
    pub fn advance(self, cost: u32) -> Self {
        State {
            dot: self.dot + 1,
            penalty: self.penalty + cost,
            ..self
        }
    }

    /// Returns the symbol after the dot, or `None` if the state is finished.
    #[inline]
    pub fn postdot(&self, grammar: &Grammar) -> Option<Symbol> {
        grammar.rule(self.rule).postdot(self.dot as usize)
    }

    #[inline]
    pub fn is_finished(&self, grammar: &Grammar) -> bool {
        self.dot as usize == grammar.rule(self.rule).len()
    }

    #[inline]
    pub fn origin(&self) -> usize {
        self.origin as usize
    }
}
