//! Error types for input validation and search.

use thiserror::Error;

/// A caller-supplied coordinate could not be turned into a [`Point`](crate::point::Point).
///
/// These are raised before any traversal starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("point `{0}` is missing a ',' between x and y")]
    MissingComma(String),

    #[error("coordinate `{0}` is not an integer")]
    InvalidCoordinate(String),

    #[error("coordinate {0} does not fit in a 32-bit grid")]
    OutOfRange(i64),

    #[error("point must have exactly 2 coordinates, got {0}")]
    WrongArity(usize),
}

/// A search could not run to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search budget of {budget} node expansions exhausted")]
    BudgetExhausted { budget: u64 },
}
