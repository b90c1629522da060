//! Price data for the history engine.
//!
//! - [`model`] - Price observations and sanitizing
//! - [`store`] - Traits for persisted closes and live quotes
//! - [`resolver`] - The resolver contract consumed by the engine and a
//!   store-backed implementation of it
//! - [`errors`] - Error type reported by price collaborators

pub mod errors;
pub mod model;
pub mod resolver;
pub mod store;


pub use errors::MarketDataError;
pub use model::{sanitize_observations, PriceObservation, PriceSource};
pub use resolver::{PriceResolverTrait, QuoteHistoryResolver};
pub use store::{LiveQuoteProvider, QuoteStore};
