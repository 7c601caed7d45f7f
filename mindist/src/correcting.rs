//! Parsing against the covering grammar of a grammar.

use log::debug;

use crate::covering::{CoveringBuilder, CoveringConfig};
use crate::earley::{EarleyParser, ParseConfig};
use crate::error::Error;
use crate::forest::{Derivation, Edit, Extractor};
use crate::grammar::Grammar;

/// The cheapest repair of an input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Correction {
    pub penalty: u32,
    /// The input with all edits applied.
    pub repaired: String,
    pub edits: Vec<Edit>,
    /// The input marked up with its edits.
    pub delta: String,
    pub derivation: Derivation,
}

/// Parses any input, reporting how far it is from the grammar's language.
///
/// The covering grammar is built once. Parsing only reads it, so a single parser can be
/// shared across threads.
///
/// ```
/// use mindist::{CoveringConfig, ErrorCorrectingParser, Grammar, ParseConfig};
///
/// let grammar = Grammar::from_rules(
///     "<E>",
///     [
///         ("<E>", vec![vec!["<T>", "+", "<E>"], vec!["<T>"]]),
///         ("<T>", vec![vec!["1"], vec!["(", "<E>", ")"]]),
///     ],
/// ).unwrap();
/// let parser =
///     ErrorCorrectingParser::new(grammar, CoveringConfig::default(), ParseConfig::default())
///         .unwrap();
/// let correction = parser.correct("1+").unwrap();
/// assert_eq!(correction.penalty, 1);
/// assert_eq!(correction.delta, "1{s/'+'//}");
/// ```
#[derive(Clone, Debug)]
pub struct ErrorCorrectingParser {
    grammar: Grammar,
    covering: Grammar,
    config: ParseConfig,
}

impl ErrorCorrectingParser {
    /// Builds the covering grammar of `grammar`.
    pub fn new(
        grammar: Grammar,
        covering_config: CoveringConfig,
        config: ParseConfig,
    ) -> Result<Self, Error> {
        let covering = CoveringBuilder::with_config(&grammar, covering_config).build()?;
        debug!(
            "error-correcting parser: {} rules covered by {}",
            grammar.rules().count(),
            covering.rules().count()
        );
        Ok(ErrorCorrectingParser {
            grammar,
            covering,
            config,
        })
    }

    /// Returns the grammar being covered.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn covering_grammar(&self) -> &Grammar {
        &self.covering
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Returns up to `max_trees` derivations of `input`, cheapest first.
    ///
    /// The result is empty only when the input holds characters outside the alphabet.
    pub fn parse(&self, input: &str) -> Result<Vec<Derivation>, Error> {
        let chart = EarleyParser::new(&self.covering, self.config).parse(input)?;
        Ok(Extractor::new(&chart).extract())
    }

    /// Finds the cheapest repair of `input`.
    pub fn correct(&self, input: &str) -> Result<Correction, Error> {
        let chart = EarleyParser::new(&self.covering, self.config).parse(input)?;
        let derivation = Extractor::new(&chart).max_trees(1).best()?;
        Ok(Correction {
            penalty: derivation.penalty,
            repaired: derivation.tree.repaired(),
            edits: derivation.tree.edits(),
            delta: derivation.tree.delta(),
            derivation,
        })
    }

    /// Parses `input` with the grammar itself, without corrections.
    pub fn parse_exact(&self, input: &str) -> Result<Vec<Derivation>, Error> {
        let chart = EarleyParser::new(&self.grammar, self.config).parse(input)?;
        Ok(Extractor::new(&chart).extract())
    }
}
