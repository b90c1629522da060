//! Valuetrack Core - historical valuation and time-weighted return.
//!
//! Turns a list of buy/sell transactions plus a source of daily prices into
//! a calendar-day portfolio value series and a chain-linked cumulative TWR
//! series. Price storage and live quotes sit behind traits in [`quotes`];
//! callers provide the implementations.

pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod quotes;
pub mod settings;
pub mod transactions;
pub mod utils;

// Re-export the main entry points
pub use portfolio::*;
pub use settings::HistorySettings;
pub use transactions::{AssetClass, Transaction, TransactionKind};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
