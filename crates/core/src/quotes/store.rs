//! Price storage traits.
//!
//! These traits abstract where prices come from so the engine can be driven
//! by a database, a file, or test doubles interchangeably.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::PriceObservation;
use crate::errors::Result;

/// Read access to persisted daily closes.
pub trait QuoteStore: Send + Sync {
    /// Persisted observations for `symbol` with `start <= date <= end`.
    ///
    /// Order is not guaranteed; callers sanitize the result. A symbol with no
    /// history returns an empty vector rather than an error.
    fn range(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<PriceObservation>>;
}

/// Access to a live ("current") quote for a symbol.
#[async_trait]
pub trait LiveQuoteProvider: Send + Sync {
    /// The latest available price, or `None` when the provider has nothing.
    async fn latest_quote(&self, symbol: &str) -> Result<Option<PriceObservation>>;
}
