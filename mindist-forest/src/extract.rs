//! Extraction of the cheapest derivations from a chart.
//!
//! Every finished state is a node `(lhs, origin, end)` of the parse forest. Nodes are
//! evaluated bottom-up in order of increasing span length, so that the children of a node
//! are known before the node itself. Only children with the same span as their parent,
//! which arise from unit rules and nullable siblings, share a round; those rounds are
//! relaxed until no value improves.
//!
//! Every node keeps its `max_trees` cheapest derivations, ranked. A derivation names a rule,
//! the split points between its RHS symbols and, for every nonterminal child, the rank of
//! the child's derivation. Derivations are ordered by penalty, then by height, then by
//! rule index, then by the split points in lexicographic order, which prefers shorter
//! leftmost children. A derivation is strictly taller than the child derivations it uses,
//! so even cyclic grammars yield finite trees.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, trace};
use mindist_earley::{Chart, PenaltyModel, StateKey};
use mindist_grammar::{Grammar, Role, RuleId, Symbol, SymbolKind};
use smallvec::SmallVec;

use crate::error::ForestError;
use crate::tree::{NodeId, NodeKind, ParseTree};

/// A complete derivation of the input with its total penalty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Derivation {
    pub penalty: u32,
    pub tree: ParseTree,
}

/// Penalty and height of a derivation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct Score {
    cost: u32,
    height: u32,
}

impl Score {
    const ZERO: Score = Score { cost: 0, height: 0 };

    /// Joins the scores of sibling derivations.
    fn join(self, other: Score) -> Score {
        Score {
            cost: self.cost + other.cost,
            height: self.height.max(other.height),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct NodeKey {
    lhs: Symbol,
    origin: u32,
    end: u32,
}

/// A split of a span among the symbols of a rule suffix.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct Suffix {
    score: Score,
    /// Boundaries between the RHS symbols, from the origin to the end.
    split: SmallVec<[u32; 4]>,
    /// Rank of the derivation of each RHS symbol. Always 0 for terminals.
    ranks: SmallVec<[u32; 4]>,
}

/// A ranked derivation of a node. Field order is the comparison order.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct Choice {
    score: Score,
    rule: RuleId,
    split: SmallVec<[u32; 4]>,
    ranks: SmallVec<[u32; 4]>,
}

impl Choice {
    fn new(score: Score, rule: RuleId, suffix: Suffix) -> Self {
        Choice {
            score,
            rule,
            split: suffix.split,
            ranks: suffix.ranks,
        }
    }
}

/// Partial splits of a rule suffix, cheapest first.
type Suffixes = SmallVec<[Suffix; 1]>;

/// Extracts minimum-penalty derivations from a chart.
///
/// ```
/// use mindist_grammar::Grammar;
/// use mindist_earley::{EarleyParser, ParseConfig};
/// use mindist_forest::Extractor;
///
/// let grammar = Grammar::from_rules("<A>", [("<A>", vec![vec!["a", "<A>"], vec![]])]).unwrap();
/// let chart = EarleyParser::new(&grammar, ParseConfig::default()).parse("aa").unwrap();
/// let best = Extractor::new(&chart).best().unwrap();
/// assert_eq!(best.penalty, 0);
/// assert_eq!(best.tree.to_sexpr(), "(<A> a (<A> a (<A>)))");
/// ```
pub struct Extractor<'c, 'g> {
    chart: &'c Chart<'g>,
    grammar: &'g Grammar,
    penalty_model: PenaltyModel,
    max_trees: usize,
    penalty: Option<u32>,
}

/// Node values computed for one chart.
struct Forest {
    /// The cheapest derivations of every node, best first.
    values: HashMap<NodeKey, Vec<Choice>>,
    /// Origins of finished states, by end position and LHS.
    origins: Vec<HashMap<Symbol, SmallVec<[u32; 4]>>>,
}

impl<'c, 'g> Extractor<'c, 'g> {
    /// Creates an extractor that follows the chart's configuration.
    pub fn new(chart: &'c Chart<'g>) -> Self {
        Extractor {
            chart,
            grammar: chart.grammar(),
            penalty_model: chart.penalty_model(),
            max_trees: chart.config().max_trees,
            penalty: chart.config().penalty,
        }
    }

    /// Sets how many derivations to extract.
    pub fn max_trees(mut self, max_trees: usize) -> Self {
        self.max_trees = max_trees;
        self
    }

    /// Restricts extraction to derivations with exactly this penalty.
    pub fn penalty(mut self, penalty: Option<u32>) -> Self {
        self.penalty = penalty;
        self
    }

    /// Returns the cheapest derivation.
    pub fn best(&self) -> Result<Derivation, ForestError> {
        self.clone_with_limit(1)
            .extract()
            .into_iter()
            .next()
            .ok_or(ForestError::NoParse)
    }

    fn clone_with_limit(&self, max_trees: usize) -> Self {
        Extractor {
            max_trees,
            ..*self
        }
    }

    /// Returns up to `max_trees` derivations of the whole input in order of ascending
    /// penalty. The result is empty if the grammar does not derive the input.
    pub fn extract(&self) -> Vec<Derivation> {
        if !self.chart.accepts() || self.max_trees == 0 {
            return vec![];
        }
        let forest = self.evaluate();
        let end = self.chart.len() - 1;
        let root = NodeKey {
            lhs: self.chart.start(),
            origin: 0,
            end: end as u32,
        };

        let mut candidates = vec![];
        for state in self.chart.finished_roots() {
            if let Some(penalty) = self.penalty {
                if state.penalty + self.node_cost(root.lhs) != penalty {
                    continue;
                }
            }
            for suffix in self.splits(&forest, state.rule, 0, end, self.max_trees) {
                let score = self.node_score(root.lhs, suffix.score);
                candidates.push(Choice::new(score, state.rule, suffix));
            }
        }
        if let Some(penalty) = self.penalty {
            candidates.retain(|choice| choice.score.cost == penalty);
        }
        candidates.sort();
        debug!(
            "extracting from {} candidates over {} forest nodes",
            candidates.len(),
            forest.values.len()
        );

        let mut seen = HashSet::new();
        let mut derivations = vec![];
        for choice in candidates {
            if derivations.len() == self.max_trees {
                break;
            }
            let tree = self.build_tree(&forest, root, &choice);
            if seen.insert(tree.clone()) {
                derivations.push(Derivation {
                    penalty: choice.score.cost,
                    tree,
                });
            }
        }
        derivations
    }

    fn node_cost(&self, lhs: Symbol) -> u32 {
        self.penalty_model.symbol_cost(self.grammar, lhs)
    }

    fn node_score(&self, lhs: Symbol, derivation: Score) -> Score {
        Score {
            cost: derivation.cost + self.node_cost(lhs),
            height: derivation.height + 1,
        }
    }

    /// Computes the best choice for every node.
    fn evaluate(&self) -> Forest {
        let mut origins = vec![HashMap::<Symbol, SmallVec<[u32; 4]>>::new(); self.chart.len()];
        // Finished rules of every node, grouped by span length and origin.
        let mut rounds: BTreeMap<(u32, u32), HashMap<NodeKey, SmallVec<[RuleId; 2]>>> =
            BTreeMap::new();
        for (end, column) in self.chart.columns().iter().enumerate() {
            for state in column.finished(self.grammar) {
                let key = NodeKey {
                    lhs: state.lhs,
                    origin: state.origin,
                    end: end as u32,
                };
                let entry = origins[end].entry(state.lhs).or_default();
                if !entry.contains(&state.origin) {
                    entry.push(state.origin);
                }
                rounds
                    .entry((key.end - key.origin, key.origin))
                    .or_default()
                    .entry(key)
                    .or_default()
                    .push(state.rule);
            }
        }

        let mut forest = Forest {
            values: HashMap::new(),
            origins,
        };
        for nodes in rounds.values() {
            // Deterministic order within a round.
            let mut nodes = nodes.iter().collect::<Vec<_>>();
            nodes.sort_by_key(|(key, _)| key.lhs);
            let mut passes = 0;
            loop {
                passes += 1;
                let mut changed = false;
                for &(&key, rules) in &nodes {
                    let mut ranked = rules
                        .iter()
                        .flat_map(|&rule| {
                            self.splits(
                                &forest,
                                rule,
                                key.origin as usize,
                                key.end as usize,
                                self.max_trees,
                            )
                            .into_iter()
                            .map(move |suffix| (rule, suffix))
                        })
                        .map(|(rule, suffix)| {
                            Choice::new(self.node_score(key.lhs, suffix.score), rule, suffix)
                        })
                        .collect::<Vec<_>>();
                    ranked.sort();
                    ranked.truncate(self.max_trees);
                    if ranked.is_empty() || forest.values.get(&key) == Some(&ranked) {
                        continue;
                    }
                    trace!(
                        "CHOOSE {} from {} to {}: rule {} penalty {} height {} of {}",
                        self.grammar.name_of(key.lhs),
                        key.origin,
                        key.end,
                        ranked[0].rule,
                        ranked[0].score.cost,
                        ranked[0].score.height,
                        ranked.len()
                    );
                    forest.values.insert(key, ranked);
                    changed = true;
                }
                if !changed {
                    break;
                }
            }
            if passes > 2 {
                trace!("round of {} nodes settled after {} passes", nodes.len(), passes);
            }
        }
        forest
    }

    /// Finds the `limit` cheapest ways to derive the span `origin..end` with `rule`, walking
    /// the chart backwards from the finished state. Each way picks split points and a ranked
    /// derivation for every child.
    fn splits(
        &self,
        forest: &Forest,
        rule_id: RuleId,
        origin: usize,
        end: usize,
        limit: usize,
    ) -> Suffixes {
        let rule = self.grammar.rule(rule_id);
        let input = self.chart.input();
        let has_state = |dot: usize, position: usize| {
            self.chart
                .column(position)
                .find(StateKey {
                    rule: rule_id,
                    dot: dot as u32,
                    origin: origin as u32,
                })
                .is_some()
        };

        let mut layer: BTreeMap<usize, Suffixes> = BTreeMap::new();
        let mut last: SmallVec<[u32; 4]> = SmallVec::new();
        last.push(end as u32);
        let finished = Suffix {
            score: Score::ZERO,
            split: last,
            ranks: SmallVec::new(),
        };
        layer.insert(end, SmallVec::from_elem(finished, 1));

        for dot in (0..rule.len()).rev() {
            let sym = rule.rhs[dot];
            let mut previous: BTreeMap<usize, Suffixes> = BTreeMap::new();
            for (&position, suffixes) in &layer {
                let mut extend = |child_start: usize, child: Score, rank: u32| {
                    let entry = previous.entry(child_start).or_default();
                    for suffix in suffixes {
                        let mut split: SmallVec<[u32; 4]> =
                            SmallVec::with_capacity(suffix.split.len() + 1);
                        split.push(child_start as u32);
                        split.extend_from_slice(&suffix.split);
                        let mut ranks: SmallVec<[u32; 4]> =
                            SmallVec::with_capacity(suffix.ranks.len() + 1);
                        ranks.push(rank);
                        ranks.extend_from_slice(&suffix.ranks);
                        let extended = Suffix {
                            score: child.join(suffix.score),
                            split,
                            ranks,
                        };
                        insert_bounded(entry, extended, limit);
                    }
                };
                match self.grammar.kind_of(sym) {
                    SymbolKind::Terminal(terminal) => {
                        if position > origin
                            && terminal.matches(input[position - 1])
                            && has_state(dot, position - 1)
                        {
                            extend(position - 1, Score::ZERO, 0);
                        }
                    }
                    SymbolKind::Nonterminal(_) => {
                        let child_origins = match forest.origins[position].get(&sym) {
                            Some(child_origins) => child_origins,
                            None => continue,
                        };
                        for &child_origin in child_origins {
                            let child_start = child_origin as usize;
                            if child_start < origin || !has_state(dot, child_start) {
                                continue;
                            }
                            let child_key = NodeKey {
                                lhs: sym,
                                origin: child_origin,
                                end: position as u32,
                            };
                            let ranked = match forest.values.get(&child_key) {
                                Some(ranked) => ranked,
                                None => continue,
                            };
                            for (rank, child) in ranked.iter().enumerate().take(limit) {
                                extend(child_start, child.score, rank as u32);
                            }
                        }
                    }
                }
            }
            layer = previous;
        }
        layer.remove(&origin).unwrap_or_default()
    }

    /// Unfolds the choices below the root into a tree.
    fn build_tree(&self, forest: &Forest, root: NodeKey, choice: &Choice) -> ParseTree {
        let input = self.chart.input();
        let mut tree = ParseTree::new(
            self.nonterminal_kind(root.lhs),
            root.origin as usize..root.end as usize,
        );
        let mut stack: Vec<(NodeId, &Choice)> = vec![(tree.root(), choice)];
        while let Some((parent, choice)) = stack.pop() {
            let rule = self.grammar.rule(choice.rule);
            let split = &choice.split;
            for (dot, &sym) in rule.rhs.iter().enumerate() {
                let span = split[dot] as usize..split[dot + 1] as usize;
                match self.grammar.kind_of(sym) {
                    SymbolKind::Terminal(_) => {
                        tree.add_child(parent, NodeKind::Leaf(input[span.start]), span);
                    }
                    SymbolKind::Nonterminal(_) => {
                        let key = NodeKey {
                            lhs: sym,
                            origin: split[dot],
                            end: split[dot + 1],
                        };
                        let child = tree.add_child(parent, self.nonterminal_kind(sym), span);
                        let chosen = forest
                            .values
                            .get(&key)
                            .and_then(|ranked| ranked.get(choice.ranks[dot] as usize))
                            .expect("chosen split refers to an unevaluated derivation");
                        stack.push((child, chosen));
                    }
                }
            }
        }
        tree
    }

    fn nonterminal_kind(&self, sym: Symbol) -> NodeKind {
        NodeKind::Nonterminal {
            name: self.grammar.name_of(sym).clone(),
            role: self.grammar.kind_of(sym).role().unwrap_or(Role::Plain),
        }
    }
}

/// Inserts into a list kept sorted and no longer than `limit`.
fn insert_bounded(entries: &mut Suffixes, entry: Suffix, limit: usize) {
    let position = entries
        .iter()
        .position(|existing| entry < *existing)
        .unwrap_or(entries.len());
    if position < limit {
        entries.insert(position, entry);
        entries.truncate(limit);
    }
}
