use thiserror::Error;

/// Failures of chart construction.
///
/// A rejected input is not an error. It yields a chart without finished roots.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("more than {limit} states in the chart at input position {position}")]
    StateBudgetExceeded { limit: usize, position: usize },
}
