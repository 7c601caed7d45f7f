//! Sets of symbols in the form of bit vectors.

use std::{iter, ops};

use bit_vec::BitVec;

use crate::rule::Rule;
use crate::source::SymbolSource;
use crate::symbol::Symbol;

/// A set of symbols in the form of a bit vector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a set with room for every symbol of the source, all absent.
    pub fn empty_for(sym_source: &SymbolSource) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(sym_source.num_syms(), false),
        }
    }

    /// Marks every symbol that appears on the left-hand side of a rule.
    pub fn defined<'a>(&mut self, rules: impl IntoIterator<Item = &'a Rule>) {
        for rule in rules {
            self.set(rule.lhs, true);
        }
    }

    /// Marks every symbol that appears on the right-hand side of a rule.
    pub fn used<'a>(&mut self, rules: impl IntoIterator<Item = &'a Rule>) {
        for rule in rules {
            for &sym in &rule.rhs[..] {
                self.set(sym, true);
            }
        }
    }

    pub fn set(&mut self, sym: Symbol, elem: bool) {
        if sym.usize() >= self.bit_vec.len() {
            let grow = sym.usize() + 1 - self.bit_vec.len();
            self.bit_vec.grow(grow, false);
        }
        self.bit_vec.set(sym.usize(), elem);
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }

    pub fn difference(&mut self, other: &SymbolBitSet) {
        let mut other = other.bit_vec.clone();
        other.grow(self.bit_vec.len().saturating_sub(other.len()), false);
        other.truncate(self.bit_vec.len());
        self.bit_vec.difference(&other);
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.bit_vec.none()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if self.bit_vec.get(index.usize()).unwrap_or(false) {
            &TRUE
        } else {
            &FALSE
        }
    }
}
