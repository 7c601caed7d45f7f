//! Penalty bookkeeping.

use mindist_grammar::{Grammar, Role, Symbol};

/// Assigns costs to the use of penalized nonterminals.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PenaltyModel {
    pub unit: u32,
}

impl Default for PenaltyModel {
    fn default() -> Self {
        PenaltyModel { unit: 1 }
    }
}

impl PenaltyModel {
    pub fn new(unit: u32) -> Self {
        PenaltyModel { unit }
    }

    /// Returns the cost added when a nonterminal with the given role is completed.
    #[inline]
    pub fn completion(&self, role: Role) -> u32 {
        if role.is_penalized() {
            self.unit
        } else {
            0
        }
    }

    /// Returns the cost of a symbol as a whole, which is nothing for terminals.
    #[inline]
    pub fn symbol_cost(&self, grammar: &Grammar, sym: Symbol) -> u32 {
        grammar
            .kind_of(sym)
            .role()
            .map_or(0, |role| self.completion(role))
    }

    /// Returns the cost of the cheapest derivation of the empty string from `sym`, or `None`
    /// if it derives no empty string.
    #[inline]
    pub fn null_cost(&self, grammar: &Grammar, sym: Symbol) -> Option<u32> {
        grammar.null_units(sym).map(|units| units * self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_costs() {
        let model = PenaltyModel::new(3);
        assert_eq!(model.completion(Role::Plain), 0);
        assert_eq!(model.completion(Role::Match('a')), 0);
        assert_eq!(model.completion(Role::AnyPlus), 0);
        assert_eq!(model.completion(Role::CoveringStart), 0);
        assert_eq!(model.completion(Role::AnyOne), 3);
        assert_eq!(model.completion(Role::AnyExcept('a')), 3);
        assert_eq!(model.completion(Role::Empty), 3);
        assert_eq!(PenaltyModel::default().unit, 1);
    }
}
