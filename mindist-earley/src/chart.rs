//! The completed chart of a parse.

use mindist_grammar::{Grammar, Symbol};

use crate::column::Column;
use crate::config::ParseConfig;
use crate::penalty::PenaltyModel;
use crate::state::State;

/// Columns for input positions `0..=n`, read-only once built.
#[derive(Clone, Debug)]
pub struct Chart<'g> {
    pub(crate) grammar: &'g Grammar,
    pub(crate) input: Vec<char>,
    pub(crate) columns: Vec<Column>,
    pub(crate) config: ParseConfig,
}

impl<'g> Chart<'g> {
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn input(&self) -> &[char] {
        &self.input[..]
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn penalty_model(&self) -> PenaltyModel {
        PenaltyModel::new(self.config.unit_penalty)
    }

    pub fn start(&self) -> Symbol {
        self.grammar.start()
    }

    /// Returns the number of columns, which is one more than the input length.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns[..]
    }

    /// Returns the number of states in all columns.
    pub fn num_states(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    fn roots_at(&self, index: usize) -> impl Iterator<Item = &State> + '_ {
        let start = self.start();
        self.columns[index]
            .finished(self.grammar)
            .filter(move |state| state.lhs == start && state.origin == 0)
    }

    /// Iterates over finished start states that span the whole input.
    pub fn finished_roots(&self) -> impl Iterator<Item = &State> + '_ {
        self.roots_at(self.columns.len() - 1)
    }

    /// Checks whether the grammar derives the input.
    pub fn accepts(&self) -> bool {
        self.finished_roots().next().is_some()
    }

    /// Returns the penalty of the cheapest derivation of the input.
    pub fn min_penalty(&self) -> Option<u32> {
        self.finished_roots().map(|state| state.penalty).min()
    }

    /// Returns the length of the longest input prefix that the grammar derives.
    pub fn prefix_end(&self) -> Option<usize> {
        (0..self.columns.len())
            .rev()
            .find(|&index| self.roots_at(index).next().is_some())
    }
}
