//! Quote-related error types.

use thiserror::Error;

/// Errors reported by price collaborators.
///
/// The history service never propagates these; a failing symbol is valued as
/// if it had no price history.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("No data found")]
    NoData,
}

impl MarketDataError {
    /// Returns true if this error only means "nothing to show".
    pub fn is_data_absence(&self) -> bool {
        matches!(self, MarketDataError::NotFound(_) | MarketDataError::NoData)
    }
}
