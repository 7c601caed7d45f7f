//! Options of the covering grammar construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the catch-all nonterminals are expanded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoveringMode {
    /// One alternative per alphabet character. Input outside the alphabet is rejected.
    #[default]
    Expanded,
    /// Terminal classes instead of per-character alternatives. Any input character is
    /// accepted, and the grammar grows linearly with the alphabet.
    Compact,
}

/// Options of the covering grammar construction.
///
/// ```
/// use mindist_covering::{CoveringConfig, CoveringMode};
///
/// let config = CoveringConfig::new().alphabet("xy".chars()).mode(CoveringMode::Compact);
/// assert_eq!(config.extra_alphabet, vec!['x', 'y']);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoveringConfig {
    /// Characters accepted in addition to the terminals of the grammar.
    pub extra_alphabet: Vec<char>,
    /// Overrides the start symbol of the grammar.
    pub start: Option<String>,
    pub mode: CoveringMode,
}

impl CoveringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the alphabet with the given characters.
    pub fn alphabet(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.extra_alphabet.extend(chars);
        self
    }

    pub fn start(mut self, name: &str) -> Self {
        self.start = Some(name.to_string());
        self
    }

    pub fn mode(mut self, mode: CoveringMode) -> Self {
        self.mode = mode;
        self
    }
}
