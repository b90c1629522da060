//! Portfolio history: positions, valuation, performance and the service
//! that ties them together.

pub mod history;
pub mod performance;
pub mod positions;
pub mod valuation;

pub use history::*;
