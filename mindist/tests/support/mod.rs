#![allow(dead_code)]

use mindist::{CoveringConfig, Correction, EditKind, ErrorCorrectingParser, Grammar, ParseConfig};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn parser(grammar: Grammar, covering: CoveringConfig) -> ErrorCorrectingParser {
    ErrorCorrectingParser::new(grammar, covering, ParseConfig::default())
        .expect("covering grammar failed to build")
}

/// Sums what the edits of a correction cost, one unit per character touched.
pub fn edit_weight(correction: &Correction) -> u32 {
    correction
        .edits
        .iter()
        .map(|edit| match &edit.kind {
            EditKind::Delete(junk) => junk.chars().count() as u32,
            EditKind::Substitute { .. } | EditKind::Insert(_) => 1,
        })
        .sum()
}

/// Checks everything a correction must agree on.
pub fn assert_consistent(parser: &ErrorCorrectingParser, input: &str, correction: &Correction) {
    let tree = &correction.derivation.tree;
    assert_eq!(tree.yield_string(), input, "covering tree must derive the input");
    assert_eq!(tree.strip_covering().yield_string(), correction.repaired);
    assert_eq!(edit_weight(correction), correction.penalty, "input {:?}", input);
    let exact = parser.parse_exact(&correction.repaired).unwrap();
    assert!(
        !exact.is_empty(),
        "repair {:?} of {:?} is not in the language",
        correction.repaired,
        input
    );
    assert_eq!(correction.penalty == 0, correction.repaired == input);
}
