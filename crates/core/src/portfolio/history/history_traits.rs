//! Portfolio history service traits.

use async_trait::async_trait;

use super::history_model::{HistoryRequest, PortfolioHistory};
use crate::errors::Result;
use crate::portfolio::performance::TwrPoint;
use crate::portfolio::valuation::DailyPortfolioValue;
use crate::transactions::Transaction;

/// Trait defining the contract for historical valuation and TWR.
///
/// Every method is a pure function of the transactions, the request and the
/// prices the resolver returns. Nothing is cached between calls.
#[async_trait]
pub trait PortfolioHistoryServiceTrait: Send + Sync {
    /// Daily mark-to-market value of the market-priced holdings.
    ///
    /// # Arguments
    /// * `transactions` - The user's full transaction history
    /// * `request` - Start date, as-of date and live-fallback override
    ///
    /// # Returns
    /// One value per calendar day from the effective start to the as-of date,
    /// or an empty vector when there is nothing to value.
    async fn calculate_value_history(
        &self,
        transactions: &[Transaction],
        request: &HistoryRequest,
    ) -> Result<Vec<DailyPortfolioValue>>;

    /// Chain-linked cumulative TWR, in percent, one point per day.
    async fn calculate_twr_history(
        &self,
        transactions: &[Transaction],
        request: &HistoryRequest,
    ) -> Result<Vec<TwrPoint>>;

    /// Values, cash flows, TWR points and summary from a single pass.
    async fn calculate_history(
        &self,
        transactions: &[Transaction],
        request: &HistoryRequest,
    ) -> Result<PortfolioHistory>;
}
