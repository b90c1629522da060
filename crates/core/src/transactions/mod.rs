//! Transaction inputs and the market-priced filter.

mod transaction_filter;
mod transactions_constants;
mod transactions_model;

pub use transaction_filter::*;
pub use transactions_constants::*;
pub use transactions_model::*;
