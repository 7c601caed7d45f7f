//! Options of a parse.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options of chart construction and derivation extraction.
///
/// ```
/// use mindist_earley::ParseConfig;
///
/// let config = ParseConfig::new().max_trees(3).max_states(100_000);
/// assert_eq!(config.unit_penalty, 1);
/// assert_eq!(config.max_trees, 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseConfig {
    /// Cost of one use of a penalized nonterminal.
    pub unit_penalty: u32,
    /// How many derivations to extract, cheapest first.
    pub max_trees: usize,
    /// Only extract derivations with exactly this penalty.
    pub penalty: Option<u32>,
    /// Upper bound on the number of states in the chart.
    pub max_states: Option<usize>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            unit_penalty: 1,
            max_trees: 1,
            penalty: None,
            max_states: None,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit_penalty(mut self, unit_penalty: u32) -> Self {
        self.unit_penalty = unit_penalty;
        self
    }

    pub fn max_trees(mut self, max_trees: usize) -> Self {
        self.max_trees = max_trees;
        self
    }

    pub fn penalty(mut self, penalty: u32) -> Self {
        self.penalty = Some(penalty);
        self
    }

    pub fn max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }
}
