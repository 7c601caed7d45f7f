//! Calculation of the cheapest way each nonterminal can derive the empty string.

use log::trace;

use crate::occurence_map::OccurenceMap;
use crate::rule::Rule;
use crate::source::SymbolSource;
use crate::symbol::Symbol;

/// Computes, for every symbol, the minimal number of penalized completions needed to derive
/// the empty string, or `None` if the symbol is not nullable.
///
/// A rule `A ::= B C` with nullable `B` and `C` makes `A` nullable with the cost of `B` plus the
/// cost of `C`, plus one if `A` itself is penalized. The costs are relaxed transitively with
/// a work stack, similar to a multi-source shortest path search.
pub(crate) fn null_units(sym_source: &SymbolSource, rules: &[Rule]) -> Vec<Option<u32>> {
    let own_cost = |sym: Symbol| match sym_source.role_of(sym) {
        Some(role) if role.is_penalized() => 1,
        _ => 0,
    };
    let mut value = vec![None; sym_source.num_syms()];
    let mut work_stack = vec![];
    for rule in rules.iter().filter(|rule| rule.rhs.is_empty()) {
        let cost = own_cost(rule.lhs);
        if value[rule.lhs.usize()].map_or(true, |current| cost < current) {
            value[rule.lhs.usize()] = Some(cost);
            work_stack.push(rule.lhs);
        }
    }

    let occurence_map = OccurenceMap::from_rules(rules.iter());

    while let Some(work_sym) = work_stack.pop() {
        for &rule_id in occurence_map.rhs(work_sym) {
            let rule = &rules[rule_id];
            let maybe_work_value = rule
                .rhs
                .iter()
                .try_fold(own_cost(rule.lhs), |acc, elem| {
                    value[elem.usize()].map(|val| acc + val)
                });
            if let Some(work_value) = maybe_work_value {
                if let Some(current_value) = value[rule.lhs.usize()] {
                    if current_value <= work_value {
                        continue;
                    }
                }
                trace!(
                    "NULLABLE {} with cost {}",
                    sym_source.name_of(rule.lhs),
                    work_value
                );
                value[rule.lhs.usize()] = Some(work_value);
                work_stack.push(rule.lhs);
            }
        }
    }

    value
}
