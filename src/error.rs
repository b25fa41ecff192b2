use thiserror::Error;

use crate::config::ConfigError;

/// The inventory or target text could not be turned into numbers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("no resistor values given")]
    Empty,
    #[error("'{token}' (value {position}) is not a valid resistance")]
    InvalidToken { token: String, position: usize },
    #[error("target '{0}' is not a valid resistance")]
    InvalidTarget(String),
}

impl ParseError {
    /// True when the failure came from the resistor list rather than the target.
    pub fn is_inventory(&self) -> bool {
        !matches!(self, ParseError::InvalidTarget(_))
    }
}

/// Search parameters that would make the result meaningless.
///
/// These are checked before any combination is evaluated, so a search either fails up front or
/// returns a complete result set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("the inventory is empty")]
    EmptyInventory,
    #[error("target resistance must be a non-zero finite number, got {0}")]
    InvalidTarget(f64),
    #[error("tolerance must be a fraction in (0, 1], got {0}")]
    InvalidTolerance(f64),
    #[error("maximum combination size must be at least 1")]
    ZeroMaxSize,
    #[error("inventory value {index} is not a finite number ({value})")]
    NonFiniteValue { index: usize, value: f64 },
    #[error("inventory value {index} is zero, which cannot be used in parallel")]
    ZeroInParallel { index: usize },
}

/// Any failure between reading the user's input and printing the results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] SearchError),
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}
