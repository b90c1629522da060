//! Optional statistics hook for computed value series.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::Serialize;

use crate::constants::{DAYS_PER_YEAR_DECIMAL, DECIMAL_PRECISION};
use crate::portfolio::valuation::DailyPortfolioValue;

/// Summary statistics of a daily value series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStats {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub start_value: Decimal,
    pub end_value: Decimal,
    pub days: i64,
    /// Compound annual growth of the raw values, unadjusted for cash flows.
    pub cagr: Option<Decimal>,
}

impl SeriesStats {
    /// Statistics of `values`, `None` for an empty series.
    pub fn from_values(values: &[DailyPortfolioValue]) -> Option<Self> {
        let first = values.first()?;
        let last = values.last()?;
        let days = (last.date - first.date).num_days();

        Some(Self {
            first_date: first.date,
            last_date: last.date,
            start_value: first.value,
            end_value: last.value,
            days,
            cagr: compound_annual_growth(first.value, last.value, days),
        })
    }
}

fn compound_annual_growth(start: Decimal, end: Decimal, days: i64) -> Option<Decimal> {
    if start <= Decimal::ZERO || end <= Decimal::ZERO || days <= 0 {
        return None;
    }
    let exponent = DAYS_PER_YEAR_DECIMAL / Decimal::from(days);
    end.checked_div(start)
        .and_then(|ratio| ratio.checked_powd(exponent))
        .and_then(|growth| growth.checked_sub(Decimal::ONE))
        .map(|cagr| cagr.round_dp(DECIMAL_PRECISION))
}

/// Receives statistics of every value series the history service computes.
pub trait SeriesDiagnostics: Send + Sync {
    fn on_value_series(&self, stats: &SeriesStats);
}

/// Writes series statistics to the log at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl SeriesDiagnostics for LogDiagnostics {
    fn on_value_series(&self, stats: &SeriesStats) {
        debug!(
            "Value series {}..{} ({} days): {} -> {}, CAGR {:?}",
            stats.first_date,
            stats.last_date,
            stats.days,
            stats.start_value,
            stats.end_value,
            stats.cagr
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn value(y: i32, m: u32, d: u32, v: Decimal) -> DailyPortfolioValue {
        DailyPortfolioValue {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            value: v,
        }
    }

    #[test]
    fn test_empty_series_has_no_stats() {
        assert_eq!(SeriesStats::from_values(&[]), None);
    }

    #[test]
    fn test_single_day_has_no_cagr() {
        let stats = SeriesStats::from_values(&[value(2024, 1, 1, dec!(100))]).unwrap();
        assert_eq!(stats.days, 0);
        assert_eq!(stats.cagr, None);
    }

    #[test]
    fn test_cagr_over_one_year() {
        let stats = SeriesStats::from_values(&[
            value(2023, 1, 1, dec!(1000)),
            value(2024, 1, 1, dec!(1100)),
        ])
        .unwrap();
        assert_eq!(stats.days, 365);
        let cagr = stats.cagr.unwrap();
        assert!((cagr - dec!(0.1)).abs() < dec!(0.001), "{}", cagr);
    }

    #[test]
    fn test_zero_start_value_has_no_cagr() {
        let stats = SeriesStats::from_values(&[
            value(2023, 1, 1, dec!(0)),
            value(2024, 1, 1, dec!(1100)),
        ])
        .unwrap();
        assert_eq!(stats.cagr, None);
    }

    #[test]
    fn test_unrepresentable_growth_has_no_cagr() {
        let stats = SeriesStats::from_values(&[
            value(2023, 1, 1, Decimal::new(1, 28)),
            value(2024, 1, 1, Decimal::MAX),
        ])
        .unwrap();
        assert_eq!(stats.cagr, None);
    }
}
