//! Quantity tracking for the valuation walk.

mod position_tracker;
mod positions_model;

pub use position_tracker::*;
pub use positions_model::*;
