//! Rewrites a grammar into a covering grammar.

use log::{debug, trace};
use mindist_grammar::{Grammar, GrammarBuilder, GrammarError, Role, Symbol, SymbolKind, Terminal};

use crate::config::{CoveringConfig, CoveringMode};
use crate::error::CoveringError;

/// Builds the covering grammar of a grammar.
///
/// The covering grammar accepts every string over its alphabet. Each terminal `a` of the
/// grammar is replaced with a nonterminal that matches `a` directly, after junk, as a
/// substitution of another character, or as nothing at all. The last three are penalized
/// through the catch-all nonterminals they use.
///
/// ```
/// use mindist_grammar::Grammar;
/// use mindist_covering::CoveringBuilder;
///
/// let grammar = Grammar::from_rules("<A>", [("<A>", vec![vec!["a", "b"]])]).unwrap();
/// let covering = CoveringBuilder::new(&grammar).build().unwrap();
/// assert_eq!(&**covering.name_of(covering.start()), "<@# A>");
/// assert!(covering.is_nonterminal("<$ [a]>"));
/// ```
pub struct CoveringBuilder<'a> {
    grammar: &'a Grammar,
    config: CoveringConfig,
}

/// The symbols of catch-all nonterminals, created as the rewrite goes.
struct CoveringRewrite {
    destination: GrammarBuilder,
    alphabet: Vec<char>,
    mode: CoveringMode,
    any_one: Symbol,
    any_plus: Symbol,
    empty: Symbol,
    lhs: Option<Symbol>,
}

impl<'a> CoveringBuilder<'a> {
    /// Starts building the covering grammar of `grammar` with default options.
    pub fn new(grammar: &'a Grammar) -> Self {
        Self::with_config(grammar, CoveringConfig::default())
    }

    pub fn with_config(grammar: &'a Grammar, config: CoveringConfig) -> Self {
        CoveringBuilder { grammar, config }
    }

    /// Extends the alphabet with characters that the grammar does not use.
    pub fn alphabet(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.config = self.config.alphabet(chars);
        self
    }

    /// Covers the language of another nonterminal instead of the start symbol.
    pub fn start(mut self, name: &str) -> Self {
        self.config = self.config.start(name);
        self
    }

    pub fn mode(mut self, mode: CoveringMode) -> Self {
        self.config = self.config.mode(mode);
        self
    }

    /// Returns the alphabet: terminals of the grammar followed by extra characters.
    pub fn full_alphabet(&self) -> Vec<char> {
        let mut alphabet = self.grammar.alphabet().to_vec();
        for &c in &self.config.extra_alphabet {
            if !alphabet.contains(&c) {
                alphabet.push(c);
            }
        }
        alphabet
    }

    fn inner_start(&self) -> Result<Symbol, CoveringError> {
        let name = match self.config.start.as_deref() {
            Some(name) => name,
            None => return Ok(self.grammar.start()),
        };
        match self.grammar.symbol(name) {
            Some(sym) if self.grammar.kind_of(sym) == SymbolKind::Nonterminal(Role::Plain) => {
                Ok(sym)
            }
            _ => Err(GrammarError::UndefinedSymbol(name.to_string()).into()),
        }
    }

    /// Constructs the covering grammar. Its start symbol is a fresh nonterminal.
    pub fn build(self) -> Result<Grammar, CoveringError> {
        let alphabet = self.full_alphabet();
        match alphabet[..] {
            [] => return Err(CoveringError::EmptyAlphabet),
            [single] => return Err(CoveringError::DegenerateAlphabet(single)),
            _ => {}
        }
        let inner_start = self.inner_start()?;

        let mut destination = self.grammar.to_builder();
        destination.set_start_sym(inner_start);
        let any_one = destination.reserved(Role::AnyOne);
        let any_plus = destination.reserved(Role::AnyPlus);
        let empty = destination.reserved(Role::Empty);
        let mut rewrite = CoveringRewrite {
            destination,
            alphabet,
            mode: self.config.mode,
            any_one,
            any_plus,
            empty,
            lhs: None,
        };
        let covering_start = rewrite.wrap_start(inner_start);
        rewrite.translate_rules(self.grammar);
        for &c in self.grammar.alphabet() {
            rewrite.match_char(c);
        }
        rewrite.catch_all();

        let mut destination = rewrite.destination;
        destination.set_start_sym(covering_start);
        let covering = destination.build()?;
        debug!(
            "covering grammar has {} rules over {} characters ({:?} mode)",
            covering.rules().count(),
            rewrite.alphabet.len(),
            self.config.mode
        );
        Ok(covering)
    }
}

impl CoveringRewrite {
    fn rhs<A: AsRef<[Symbol]>>(&mut self, rhs: A) {
        let lhs = self.lhs.expect("rewrite has no current LHS");
        trace!(
            "COVERING {} ::= {}",
            self.destination.sym_source().name_of(lhs),
            rhs.as_ref()
                .iter()
                .map(|&sym| self.destination.sym_source().name_of(sym).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
        self.destination.rule_sym(lhs).rhs_syms(rhs);
    }

    fn wrap_start(&mut self, inner_start: Symbol) -> Symbol {
        let covering_start = self.destination.reserved(Role::CoveringStart);
        self.lhs = Some(covering_start);
        let any_plus = self.any_plus;
        // start ::= inner | inner any_plus
        self.rhs([inner_start]);
        self.rhs([inner_start, any_plus]);
        covering_start
    }

    /// Copies the rules, with every character replaced by its match nonterminal.
    fn translate_rules(&mut self, grammar: &Grammar) {
        for rule in grammar.rules() {
            let rhs = rule
                .rhs
                .iter()
                .map(|&sym| match grammar.kind_of(sym) {
                    SymbolKind::Terminal(Terminal::Char(c)) => {
                        self.destination.reserved(Role::Match(c))
                    }
                    _ => sym,
                })
                .collect::<Vec<_>>();
            self.lhs = Some(rule.lhs);
            self.rhs(rhs);
        }
    }

    fn match_char(&mut self, c: char) {
        let this = self.destination.reserved(Role::Match(c));
        let any_except = self.destination.reserved(Role::AnyExcept(c));
        let terminal = self.destination.terminal(Terminal::Char(c));
        let (any_plus, empty) = (self.any_plus, self.empty);
        self.lhs = Some(this);
        // this ::= c | any_plus c | empty | any_except
        self.rhs([terminal]);
        self.rhs([any_plus, terminal]);
        self.rhs([empty]);
        self.rhs([any_except]);

        self.lhs = Some(any_except);
        match self.mode {
            CoveringMode::Expanded => {
                for other in self.alphabet.clone() {
                    if other != c {
                        let other = self.destination.terminal(Terminal::Char(other));
                        self.rhs([other]);
                    }
                }
            }
            CoveringMode::Compact => {
                let class = self.destination.terminal(Terminal::AnyExcept(c));
                self.rhs([class]);
            }
        }
    }

    fn catch_all(&mut self) {
        let (any_one, any_plus, empty) = (self.any_one, self.any_plus, self.empty);
        self.lhs = Some(any_one);
        match self.mode {
            CoveringMode::Expanded => {
                for c in self.alphabet.clone() {
                    let terminal = self.destination.terminal(Terminal::Char(c));
                    self.rhs([terminal]);
                }
            }
            CoveringMode::Compact => {
                let class = self.destination.terminal(Terminal::Any);
                self.rhs([class]);
            }
        }
        self.lhs = Some(any_plus);
        // any_plus ::= any_one | any_plus any_one
        self.rhs([any_one]);
        self.rhs([any_plus, any_one]);
        self.lhs = Some(empty);
        self.rhs([]);
    }
}
