use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::rule::{Rule, RuleId};
use crate::symbol::Symbol;

/// For each symbol, the rules in which it occurs on the RHS.
pub(crate) struct OccurenceMap {
    occurences: BTreeMap<Symbol, SmallVec<[RuleId; 4]>>,
    empty_occurences: SmallVec<[RuleId; 4]>,
}

impl OccurenceMap {
    pub(crate) fn from_rules<'a>(rules: impl Iterator<Item = &'a Rule>) -> Self {
        let mut occurences: BTreeMap<Symbol, SmallVec<[RuleId; 4]>> = BTreeMap::new();
        for (i, rule) in rules.enumerate() {
            let mut rhs_syms = rule.rhs.to_vec();
            rhs_syms.sort();
            rhs_syms.dedup();
            for rhs_sym in rhs_syms {
                occurences.entry(rhs_sym).or_default().push(i);
            }
        }
        OccurenceMap {
            occurences,
            empty_occurences: SmallVec::new(),
        }
    }

    pub(crate) fn rhs(&self, sym: Symbol) -> &[RuleId] {
        self.occurences
            .get(&sym)
            .unwrap_or(&self.empty_occurences)
    }
}
