//! Definitions of the context-free grammar type and its builder.

use std::fmt::{self, Write};

use log::debug;
use smallvec::SmallVec;

use crate::error::GrammarError;
use crate::nullable;
use crate::rule::{Rule, RuleId};
use crate::rule_builder::RuleBuilder;
use crate::source::{SymbolName, SymbolSource};
use crate::symbol::{is_nonterminal_name, Role, Symbol, SymbolKind, Terminal};
use crate::symbol_bit_set::SymbolBitSet;

/// Context-free grammar type.
///
/// A `Grammar` is immutable. It can only be created through a [`GrammarBuilder`], which
/// validates it. Rules keep their insertion order, which is also the order in which
/// alternatives of a nonterminal are listed.
#[derive(Clone, Debug)]
pub struct Grammar {
    sym_source: SymbolSource,
    rules: Vec<Rule>,
    /// Rule IDs indexed by LHS symbol.
    by_lhs: Vec<SmallVec<[RuleId; 4]>>,
    start: Symbol,
    /// Terminal characters in order of first appearance.
    alphabet: Vec<char>,
    /// Cheapest derivation of the empty string, counted in penalized completions.
    null_units: Vec<Option<u32>>,
}

/// Accumulates symbols and rules, then validates them into a [`Grammar`].
#[derive(Clone, Debug, Default)]
pub struct GrammarBuilder {
    sym_source: SymbolSource,
    rules: Vec<Rule>,
    start: Option<Symbol>,
    first_error: Option<GrammarError>,
}

impl GrammarBuilder {
    /// Creates an empty grammar builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty grammar builder with the given symbol source.
    ///
    /// Symbols will be generated with this symbol source.
    pub fn with_sym_source(sym_source: SymbolSource) -> Self {
        GrammarBuilder {
            sym_source,
            ..Self::default()
        }
    }

    /// Returns the plain nonterminal with the given name.
    ///
    /// Names must be wrapped in angle brackets. Names beginning with `<$` or `<@` are
    /// reserved for the covering grammar. Violations are reported by [`fn build`].
    ///
    /// [`fn build`]: Self::build
    pub fn nonterminal(&mut self, name: &str) -> Symbol {
        if !is_nonterminal_name(name) {
            self.record_error(GrammarError::InvalidName(name.to_string()));
            let wrapped = format!("<{}>", name);
            return self.nonterminal(&wrapped);
        }
        if name.starts_with("<$") || name.starts_with("<@") {
            self.record_error(GrammarError::ReservedName(name.to_string()));
            if let Some(sym) = self.sym_source.get(name) {
                return sym;
            }
        }
        self.sym_source.intern(name, SymbolKind::Nonterminal(Role::Plain))
    }

    /// Returns the reserved nonterminal for the given role.
    ///
    /// # Panics
    ///
    /// Panics if the role is `Role::Plain`.
    pub fn reserved(&mut self, role: Role) -> Symbol {
        let name = match role {
            Role::Plain => panic!("plain nonterminals are not reserved"),
            Role::Match(c) => format!("<$ [{}]>", c),
            Role::AnyOne => "<$.>".to_string(),
            Role::AnyPlus => "<$.+>".to_string(),
            Role::AnyExcept(c) => format!("<$![{}]>", c),
            Role::Empty => "<$>".to_string(),
            Role::CoveringStart => {
                let inner = match self.start {
                    Some(start) => {
                        let name = self.sym_source.name_of(start);
                        name[1..name.len() - 1].to_string()
                    }
                    None => "start".to_string(),
                };
                format!("<@# {}>", inner)
            }
        };
        self.sym_source.intern(&name, SymbolKind::Nonterminal(role))
    }

    /// Returns the terminal symbol matching the given terminal.
    pub fn terminal(&mut self, terminal: Terminal) -> Symbol {
        match terminal {
            Terminal::Char(c) => self.sym_source.terminal(c),
            Terminal::Any => self.sym_source.intern("$.", SymbolKind::Terminal(terminal)),
            Terminal::AnyExcept(c) => self
                .sym_source
                .intern(&format!("!{}", c), SymbolKind::Terminal(terminal)),
        }
    }

    /// Translates a written symbol into grammar symbols: a nonterminal, or one terminal per
    /// character of a literal.
    pub(crate) fn symbols_of(&mut self, name: &str) -> SmallVec<[Symbol; 4]> {
        if is_nonterminal_name(name) {
            let mut result = SmallVec::new();
            result.push(self.nonterminal(name));
            result
        } else {
            name.chars().map(|c| self.sym_source.terminal(c)).collect()
        }
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: &str) -> RuleBuilder<'_> {
        let lhs = self.nonterminal(lhs);
        RuleBuilder::new(self, lhs)
    }

    /// Starts building a new rule for an existing symbol.
    pub fn rule_sym(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder::new(self, lhs)
    }

    /// Adds a rule to this grammar.
    ///
    /// # Panics
    ///
    /// Panics if `lhs` is a terminal.
    pub fn add_rule(&mut self, lhs: Symbol, rhs: &[Symbol]) {
        assert!(
            self.sym_source.kind_of(lhs).is_nonterminal(),
            "terminal {} used as a rule's LHS",
            self.sym_source.name_of(lhs)
        );
        self.rules.push(Rule::new(lhs, rhs));
    }

    /// Assigns the start symbol by name.
    pub fn set_start(&mut self, name: &str) -> Symbol {
        let start = self.nonterminal(name);
        self.start = Some(start);
        start
    }

    /// Assigns the start symbol.
    pub fn set_start_sym(&mut self, start: Symbol) {
        self.start = Some(start);
    }

    /// Returns the start symbol assigned so far.
    pub fn start(&self) -> Option<Symbol> {
        self.start
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    fn record_error(&mut self, error: GrammarError) {
        if self.first_error.is_none() {
            self.first_error = Some(error);
        }
    }

    /// Validates the rules and freezes them into a grammar.
    ///
    /// Every plain nonterminal that is referenced, as well as the start symbol, must have at
    /// least one rule. Reserved nonterminals are exempt.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if let Some(error) = self.first_error {
            return Err(error);
        }
        let start = self.start.ok_or(GrammarError::MissingStart)?;

        let mut undefined = SymbolBitSet::empty_for(&self.sym_source);
        undefined.used(&self.rules);
        undefined.set(start, true);
        let mut defined = SymbolBitSet::empty_for(&self.sym_source);
        defined.defined(&self.rules);
        undefined.difference(&defined);
        let dangling = undefined
            .iter()
            .find(|&sym| self.sym_source.role_of(sym) == Some(Role::Plain));
        if let Some(sym) = dangling {
            return Err(GrammarError::UndefinedSymbol(
                self.sym_source.name_of(sym).to_string(),
            ));
        }

        let mut by_lhs = vec![SmallVec::new(); self.sym_source.num_syms()];
        for (rule_id, rule) in self.rules.iter().enumerate() {
            by_lhs[rule.lhs.usize()].push(rule_id);
        }

        let mut alphabet = vec![];
        for rule in &self.rules {
            for &sym in &rule.rhs[..] {
                if let SymbolKind::Terminal(Terminal::Char(c)) = self.sym_source.kind_of(sym) {
                    if !alphabet.contains(&c) {
                        alphabet.push(c);
                    }
                }
            }
        }

        let null_units = nullable::null_units(&self.sym_source, &self.rules);

        debug!(
            "built grammar with {} rules, {} symbols and {} terminal characters",
            self.rules.len(),
            self.sym_source.num_syms(),
            alphabet.len()
        );

        Ok(Grammar {
            sym_source: self.sym_source,
            rules: self.rules,
            by_lhs,
            start,
            alphabet,
            null_units,
        })
    }
}

impl Grammar {
    /// Builds a grammar from a mapping of nonterminal names to lists of alternatives, each
    /// alternative being a list of written symbols.
    ///
    /// ```
    /// use mindist_grammar::Grammar;
    ///
    /// let grammar = Grammar::from_rules(
    ///     "<A>",
    ///     [("<A>", vec![vec!["a", "<A>"], vec![]])],
    /// ).unwrap();
    /// assert!(grammar.is_nonterminal("<A>"));
    /// assert!(!grammar.is_nonterminal("a"));
    /// ```
    pub fn from_rules<K, R, A, S>(
        start: &str,
        rules: impl IntoIterator<Item = (K, R)>,
    ) -> Result<Grammar, GrammarError>
    where
        K: AsRef<str>,
        R: IntoIterator<Item = A>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GrammarBuilder::new();
        for (lhs, alternatives) in rules {
            let lhs = builder.nonterminal(lhs.as_ref());
            for alternative in alternatives {
                let names = alternative.into_iter().collect::<Vec<S>>();
                let names = names.iter().map(AsRef::as_ref).collect::<Vec<&str>>();
                builder.rule_sym(lhs).rhs(names);
            }
        }
        builder.set_start(start);
        builder.build()
    }

    /// Starts a new builder sharing this grammar's symbols and start symbol, but no rules.
    pub fn to_builder(&self) -> GrammarBuilder {
        let mut builder = GrammarBuilder::with_sym_source(self.sym_source.clone());
        builder.set_start_sym(self.start);
        builder
    }

    /// Returns the start symbol.
    pub fn start(&self) -> Symbol {
        self.start
    }

    /// Returns an iterator over the list of grammar rules.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Returns the rule with the given ID.
    pub fn rule(&self, rule_id: RuleId) -> &Rule {
        &self.rules[rule_id]
    }

    /// Returns the IDs of the alternatives of a symbol in order. Empty for terminals.
    pub fn rule_ids_of(&self, lhs: Symbol) -> &[RuleId] {
        &self.by_lhs[lhs.usize()][..]
    }

    /// Returns the alternatives of the named nonterminal in order.
    pub fn rules_of(&self, name: &str) -> Result<impl Iterator<Item = &Rule>, GrammarError> {
        match self.symbol(name) {
            Some(sym) if self.kind_of(sym).is_nonterminal() => Ok(self
                .rule_ids_of(sym)
                .iter()
                .map(move |&rule_id| &self.rules[rule_id])),
            _ => Err(GrammarError::UndefinedSymbol(name.to_string())),
        }
    }

    /// Checks whether the name is registered as a nonterminal of this grammar.
    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.symbol(name)
            .map_or(false, |sym| self.kind_of(sym).is_nonterminal())
    }

    /// Looks a symbol up by name.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.sym_source.get(name)
    }

    pub fn name_of(&self, sym: Symbol) -> &SymbolName {
        self.sym_source.name_of(sym)
    }

    pub fn kind_of(&self, sym: Symbol) -> SymbolKind {
        self.sym_source.kind_of(sym)
    }

    /// Returns the terminal characters used by the rules, in order of first appearance.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet[..]
    }

    /// Returns the minimal number of penalized completions in a derivation of the empty
    /// string from `sym`, or `None` if `sym` is not nullable.
    pub fn null_units(&self, sym: Symbol) -> Option<u32> {
        self.null_units[sym.usize()]
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Formats the grammar to a `String`. The output looks like this:
    ///
    /// ```ignore
    /// <E> ::= <T> ~ '+' ~ <E>;
    /// <T> ::= '1';
    /// <A> ::= ();
    /// ```
    pub fn stringify_to_bnf(&self) -> String {
        let mut result = String::new();
        for rule in self.rules() {
            let stringify_sym = |sym: Symbol| match self.kind_of(sym) {
                SymbolKind::Terminal(terminal) => terminal.to_string(),
                SymbolKind::Nonterminal(_) => self.name_of(sym).to_string(),
            };
            let rhs = if rule.rhs.is_empty() {
                "()".into()
            } else {
                rule.rhs
                    .iter()
                    .copied()
                    .map(stringify_sym)
                    .collect::<Vec<_>>()
                    .join(" ~ ")
            };
            writeln!(&mut result, "{} ::= {};", self.name_of(rule.lhs), rhs)
                .expect("writing to String failed");
        }
        result
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify_to_bnf())
    }
}
