//! Grammar rules can be built with the builder pattern.

use crate::grammar::GrammarBuilder;
use crate::symbol::Symbol;

/// The rule builder.
///
/// ```
/// use mindist_grammar::GrammarBuilder;
///
/// let mut builder = GrammarBuilder::new();
/// builder
///     .rule("<E>")
///     .rhs(["<T>", "+", "<E>"])
///     .rhs(["<T>"])
///     .rule("<T>")
///     .rhs(["1"])
///     .rhs(["(", "<E>", ")"]);
/// builder.set_start("<E>");
/// let grammar = builder.build().unwrap();
/// assert_eq!(grammar.rules().count(), 4);
/// ```
pub struct RuleBuilder<'a> {
    lhs: Symbol,
    grammar: &'a mut GrammarBuilder,
}

impl<'a> RuleBuilder<'a> {
    /// Creates a rule builder for alternatives of `lhs`.
    pub fn new(grammar: &'a mut GrammarBuilder, lhs: Symbol) -> Self {
        RuleBuilder { lhs, grammar }
    }

    /// Starts building a new rule with the given LHS name.
    pub fn rule(self, lhs: &str) -> Self {
        let lhs = self.grammar.nonterminal(lhs);
        RuleBuilder::new(self.grammar, lhs)
    }

    /// Starts building a new rule with the given LHS symbol.
    pub fn rule_sym(self, lhs: Symbol) -> Self {
        RuleBuilder::new(self.grammar, lhs)
    }

    /// Adds a rule alternative written with symbol names. Names in angle brackets are
    /// nonterminals, and every other string is a literal contributing one terminal per
    /// character.
    pub fn rhs<'n, S>(self, names: S) -> Self
    where
        S: AsRef<[&'n str]>,
    {
        let mut syms = vec![];
        for name in names.as_ref() {
            syms.extend(self.grammar.symbols_of(name));
        }
        self.rhs_syms(syms)
    }

    /// Adds a rule alternative with the given RHS symbols.
    pub fn rhs_syms<S>(self, syms: S) -> Self
    where
        S: AsRef<[Symbol]>,
    {
        self.grammar.add_rule(self.lhs, syms.as_ref());
        self
    }
}
