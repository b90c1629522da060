use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cumulative time-weighted return on one day, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwrPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Headline figures derived from a TWR series. Percentages throughout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub cumulative_return: Decimal,
    pub annualized_return: Decimal,
    /// Largest peak-to-trough decline, reported as a positive number
    pub max_drawdown: Decimal,
}
