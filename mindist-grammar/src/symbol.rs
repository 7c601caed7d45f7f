//! A type that can represent symbols in a context-free grammar. Symbols are distinguished by their
//! IDs.

use std::fmt;
use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric representation of a symbol ID.
pub type SymbolRepr = u32;

/// A common grammar symbol type.
///
/// The niche in `NonZeroU32` keeps `Option<Symbol>` as small as `Symbol`.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol(NonZeroU32);

impl Symbol {
    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        let id = SymbolRepr::try_from(id).expect("symbol space exhausted");
        Symbol(NonZeroU32::new(id.wrapping_add(1)).expect("symbol space exhausted"))
    }
}

impl From<Symbol> for usize {
    #[inline]
    fn from(sym: Symbol) -> usize {
        sym.usize()
    }
}

/// What a terminal symbol matches in the input.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Terminal {
    /// Exactly this character.
    Char(char),
    /// Any input character.
    Any,
    /// Any input character other than this one.
    AnyExcept(char),
}

impl Terminal {
    /// Checks whether the input character is accepted.
    #[inline]
    pub fn matches(self, input: char) -> bool {
        match self {
            Terminal::Char(c) => c == input,
            Terminal::Any => true,
            Terminal::AnyExcept(c) => c != input,
        }
    }
}

/// The part a nonterminal plays. Everything other than `Plain` is introduced by the
/// covering grammar construction.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// A nonterminal of the user's grammar.
    Plain,
    /// Stands for the expected character `c`, matched directly or through a correction.
    Match(char),
    /// Any single character.
    AnyOne,
    /// One or more arbitrary characters.
    AnyPlus,
    /// Any single character other than `c`.
    AnyExcept(char),
    /// Matches nothing. Marks a missing character.
    Empty,
    /// Start of the covering grammar, tolerating trailing junk.
    CoveringStart,
}

impl Role {
    /// Returns `true` if completing a nonterminal with this role incurs a unit penalty.
    #[inline]
    pub fn is_penalized(self) -> bool {
        matches!(self, Role::AnyOne | Role::AnyExcept(_) | Role::Empty)
    }
}

/// Whether a symbol is a terminal or a nonterminal, and of which sort.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymbolKind {
    Terminal(Terminal),
    Nonterminal(Role),
}

impl SymbolKind {
    pub fn is_nonterminal(self) -> bool {
        matches!(self, SymbolKind::Nonterminal(_))
    }

    pub fn role(self) -> Option<Role> {
        match self {
            SymbolKind::Terminal(_) => None,
            SymbolKind::Nonterminal(role) => Some(role),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Terminal::Char(c) => write!(f, "{:?}", c),
            Terminal::Any => f.write_str("$."),
            Terminal::AnyExcept(c) => write!(f, "!{}", c),
        }
    }
}

/// Checks the naming convention: a nonterminal is wrapped in angle brackets.
pub fn is_nonterminal_name(name: &str) -> bool {
    name.len() > 2 && name.starts_with('<') && name.ends_with('>')
}
