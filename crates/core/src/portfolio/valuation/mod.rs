pub mod price_map;
pub mod valuation_calculator;
pub mod valuation_model;

pub use price_map::*;
pub use valuation_calculator::*;
pub use valuation_model::*;
