//! Selection of transactions that take part in the historical valuation.
//!
//! Only instruments with an externally observable market price are valued
//! day by day. Reserves, fixed income, real estate and custom holdings are
//! excluded here and valued by other means.

use super::transactions_constants::SYNTHETIC_SYMBOL_PREFIXES;
use super::transactions_model::Transaction;

/// Why a transaction was left out of the valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The asset class has no market price series
    NonMarketClass,
    /// The symbol follows a synthetic-holding naming convention
    SyntheticSymbol,
    /// The symbol is blank
    MissingSymbol,
}

/// Returns the reason a transaction is excluded, or `None` when it is kept.
pub fn classify_transaction(transaction: &Transaction) -> Option<Exclusion> {
    let symbol = transaction.symbol.trim();
    if symbol.is_empty() {
        return Some(Exclusion::MissingSymbol);
    }
    if !transaction.asset_class.is_market_priced() {
        return Some(Exclusion::NonMarketClass);
    }
    if is_synthetic_symbol(symbol) {
        return Some(Exclusion::SyntheticSymbol);
    }
    None
}

/// Check if a symbol names a synthetic holding
pub fn is_synthetic_symbol(symbol: &str) -> bool {
    let upper = symbol.trim().to_uppercase();
    SYNTHETIC_SYMBOL_PREFIXES
        .iter()
        .any(|prefix| upper.starts_with(prefix))
}

/// Check if a transaction belongs to a market-priced instrument
pub fn is_market_priced(transaction: &Transaction) -> bool {
    classify_transaction(transaction).is_none()
}

/// Keeps only transactions on market-priced instruments, with surrounding
/// whitespace stripped from their symbols.
pub fn filter_market_priced(transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| is_market_priced(t))
        .map(|t| Transaction {
            symbol: t.symbol.trim().to_string(),
            ..t.clone()
        })
        .collect()
}
