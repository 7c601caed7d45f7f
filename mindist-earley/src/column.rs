//! Sets of states ending at the same input position.

use std::collections::HashMap;

use log::trace;
use mindist_grammar::{Grammar, Symbol};
use smallvec::SmallVec;

use crate::state::{State, StateKey};

/// States whose end position is this column's index.
///
/// While a column is being built, a cheaper copy of a known state is appended rather than
/// updated in place, so that everything derived from it is derived again with the lower
/// penalty. Pruning drops the superseded copies.
#[derive(Clone, Debug, Default)]
pub struct Column {
    index: usize,
    states: Vec<State>,
    /// Position of the cheapest instance of each state.
    seen: HashMap<StateKey, usize>,
    /// States waiting on each postdot symbol. Built by pruning.
    waiting: HashMap<Symbol, SmallVec<[usize; 4]>>,
}

impl Column {
    pub fn new(index: usize) -> Self {
        Column {
            index,
            ..Self::default()
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Adds a state unless a copy at least as cheap is present. Returns whether it was added.
    pub fn add(&mut self, state: State) -> bool {
        let key = state.key();
        if let Some(&existing) = self.seen.get(&key) {
            if self.states[existing].penalty <= state.penalty {
                return false;
            }
            trace!(
                "SUPERSEDE at {}: {:?} penalty {} -> {}",
                self.index,
                key,
                self.states[existing].penalty,
                state.penalty
            );
        } else {
            trace!("ADD at {}: {:?} penalty {}", self.index, key, state.penalty);
        }
        self.seen.insert(key, self.states.len());
        self.states.push(state);
        true
    }

    /// Checks whether the state at `position` is the cheapest of its copies.
    #[inline]
    pub fn is_current(&self, position: usize) -> bool {
        self.seen.get(&self.states[position].key()) == Some(&position)
    }

    #[inline]
    pub fn get(&self, position: usize) -> State {
        self.states[position]
    }

    /// Keeps only the cheapest copy of every state and indexes the states by postdot symbol.
    pub fn prune(&mut self, grammar: &Grammar) {
        let before = self.states.len();
        let mut position = 0;
        let seen = &self.seen;
        self.states.retain(|state| {
            let keep = seen.get(&state.key()) == Some(&position);
            position += 1;
            keep
        });
        self.seen.clear();
        self.waiting.clear();
        for (position, state) in self.states.iter().enumerate() {
            self.seen.insert(state.key(), position);
            if let Some(postdot) = state.postdot(grammar) {
                self.waiting.entry(postdot).or_default().push(position);
            }
        }
        if before != self.states.len() {
            trace!(
                "PRUNE at {}: {} of {} states kept",
                self.index,
                self.states.len(),
                before
            );
        }
    }

    /// Iterates over the states waiting on `sym`. Requires a pruned column.
    pub fn waiting_on(&self, sym: Symbol) -> impl Iterator<Item = &State> + '_ {
        self.waiting
            .get(&sym)
            .into_iter()
            .flat_map(move |positions| positions.iter().map(move |&pos| &self.states[pos]))
    }

    /// Looks a state up by its key.
    pub fn find(&self, key: StateKey) -> Option<&State> {
        self.seen.get(&key).map(|&position| &self.states[position])
    }

    /// Iterates over the finished states.
    pub fn finished<'a>(&'a self, grammar: &'a Grammar) -> impl Iterator<Item = &'a State> + 'a {
        self.states
            .iter()
            .filter(move |state| state.is_finished(grammar))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use mindist_grammar::Grammar;

    use super::*;

    #[test]
    fn test_cheaper_copy_supersedes() {
        let grammar =
            Grammar::from_rules("<A>", [("<A>", vec![vec!["a", "<A>"], vec!["b"]])]).unwrap();
        let mut column = Column::new(0);
        let mut state = State::predicted(&grammar, 0, 0);
        state.penalty = 2;
        assert!(column.add(state));
        state.penalty = 3;
        assert!(!column.add(state));
        state.penalty = 1;
        assert!(column.add(state));
        assert!(column.add(State::predicted(&grammar, 1, 0)));
        assert_eq!(column.len(), 3);
        assert!(!column.is_current(0));
        assert!(column.is_current(1));

        column.prune(&grammar);
        assert_eq!(column.len(), 2);
        assert_eq!(column.find(state.key()).map(|s| s.penalty), Some(1));
        let a = grammar.symbol("a").unwrap();
        assert_eq!(column.waiting_on(a).count(), 1);
        assert_eq!(column.finished(&grammar).count(), 0);
    }
}
