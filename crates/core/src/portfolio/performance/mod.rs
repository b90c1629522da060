mod cash_flow;
mod diagnostics;
pub mod performance_model;
mod performance_summary;
mod twr_calculator;

pub use cash_flow::{attribute_cash_flows, classify_flow, DailyCashFlow, FlowType};
pub use diagnostics::{LogDiagnostics, SeriesDiagnostics, SeriesStats};
pub use performance_model::*;
pub use performance_summary::{calculate_annualized_return, summarize_twr};
pub use twr_calculator::{calculate_twr, daily_return, TwrChain, TwrOptions, TwrState};

#[cfg(test)]
mod twr_calculator_tests;
