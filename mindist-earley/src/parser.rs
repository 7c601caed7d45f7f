//! Chart construction.

use log::{debug, trace};
use mindist_grammar::{Grammar, Symbol, SymbolKind, Terminal};

use crate::chart::Chart;
use crate::column::Column;
use crate::config::ParseConfig;
use crate::error::ParseError;
use crate::penalty::PenaltyModel;
use crate::state::State;

/// The work a state calls for, determined by the symbol after its dot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Predict(Symbol),
    Scan(Terminal),
    Complete,
}

/// An Earley parser over characters.
///
/// Every state carries the cheapest penalty among the derivations that reach it. Penalized
/// nonterminals add the unit penalty as they are completed.
///
/// ```
/// use mindist_grammar::Grammar;
/// use mindist_earley::{EarleyParser, ParseConfig};
///
/// let grammar = Grammar::from_rules("<A>", [("<A>", vec![vec!["a", "<A>"], vec![]])]).unwrap();
/// let parser = EarleyParser::new(&grammar, ParseConfig::default());
/// assert!(parser.parse("aaa").unwrap().accepts());
/// assert!(!parser.parse("ab").unwrap().accepts());
/// ```
#[derive(Clone, Debug)]
pub struct EarleyParser<'g> {
    grammar: &'g Grammar,
    config: ParseConfig,
    penalty: PenaltyModel,
}

impl<'g> EarleyParser<'g> {
    pub fn new(grammar: &'g Grammar, config: ParseConfig) -> Self {
        EarleyParser {
            grammar,
            config,
            penalty: PenaltyModel::new(config.unit_penalty),
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Determines what to do with a state.
    pub fn action(&self, state: &State) -> Action {
        match state.postdot(self.grammar) {
            None => Action::Complete,
            Some(postdot) => match self.grammar.kind_of(postdot) {
                SymbolKind::Nonterminal(_) => Action::Predict(postdot),
                SymbolKind::Terminal(terminal) => Action::Scan(terminal),
            },
        }
    }

    /// Builds the chart of `input`.
    ///
    /// A string that the grammar does not derive still yields a chart, one without finished
    /// roots. The only error is running over the state budget.
    pub fn parse(&self, input: &str) -> Result<Chart<'g>, ParseError> {
        let input = input.chars().collect::<Vec<_>>();
        let mut columns = Vec::with_capacity(input.len() + 1);
        let mut current = Column::new(0);
        for &rule in self.grammar.rule_ids_of(self.grammar.start()) {
            current.add(State::predicted(self.grammar, rule, 0));
        }
        let mut num_states = 0;
        for position in 0..=input.len() {
            let mut next = Column::new(position + 1);
            self.process(&mut current, &mut next, &columns, &input, num_states)?;
            current.prune(self.grammar);
            num_states += current.len();
            debug!(
                "column {} has {} states, {} scanned into the next",
                position,
                current.len(),
                next.len()
            );
            columns.push(current);
            current = next;
        }
        Ok(Chart {
            grammar: self.grammar,
            input,
            columns,
            config: self.config,
        })
    }

    /// Runs predictions, scans and completions until the column stops growing.
    fn process(
        &self,
        current: &mut Column,
        next: &mut Column,
        done: &[Column],
        input: &[char],
        num_states: usize,
    ) -> Result<(), ParseError> {
        let position = current.index();
        let mut cursor = 0;
        while cursor < current.len() {
            if let Some(limit) = self.config.max_states {
                if num_states + current.len() + next.len() > limit {
                    return Err(ParseError::StateBudgetExceeded { limit, position });
                }
            }
            let state = current.get(cursor);
            cursor += 1;
            if !current.is_current(cursor - 1) {
                continue;
            }
            match self.action(&state) {
                Action::Predict(postdot) => {
                    for &rule in self.grammar.rule_ids_of(postdot) {
                        current.add(State::predicted(self.grammar, rule, position));
                    }
                    if let Some(cost) = self.penalty.null_cost(self.grammar, postdot) {
                        current.add(state.advance(cost));
                    }
                }
                Action::Scan(terminal) => {
                    if input.get(position).map_or(false, |&c| terminal.matches(c)) {
                        next.add(state.advance(0));
                    }
                }
                Action::Complete => {
                    // Empty matches are taken care of by prediction.
                    if state.origin() == position {
                        continue;
                    }
                    let cost = state.penalty + self.penalty.symbol_cost(self.grammar, state.lhs);
                    trace!(
                        "COMPLETE {} from {} to {} with cost {}",
                        self.grammar.name_of(state.lhs),
                        state.origin,
                        position,
                        cost
                    );
                    for parent in done[state.origin()].waiting_on(state.lhs) {
                        current.add(parent.advance(cost));
                    }
                }
            }
        }
        Ok(())
    }
}
