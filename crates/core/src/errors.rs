//! Core error types for the valuation engine.
//!
//! Missing prices, missing transactions and numeric glitches are not errors in
//! this crate; they degrade to omitted contributions or zero returns. The types
//! below cover input the engine cannot interpret and failures reported by the
//! collaborators it calls.

use chrono::{NaiveDate, ParseError as ChronoParseError};
use thiserror::Error;

use crate::quotes::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("History calculation failed: {0}")]
    Calculation(#[from] CalculatorError),
}

/// Errors that occur while building a history series.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Start date {start} is after as-of date {as_of}")]
    InvertedRange { start: NaiveDate, as_of: NaiveDate },
}

/// Validation errors for caller input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}
