use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use super::{PerformanceSummary, TwrPoint};
use crate::constants::DAYS_PER_YEAR_DECIMAL;

const HUNDRED: Decimal = dec!(100);

/// Headline figures of a TWR series.
///
/// An empty series gives an all-zero summary without dates.
pub fn summarize_twr(points: &[TwrPoint], precision: u32) -> PerformanceSummary {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return PerformanceSummary::default();
    };

    let total_return = last.value / HUNDRED;
    let annualized = calculate_annualized_return(first.date, last.date, total_return);

    PerformanceSummary {
        period_start: Some(first.date),
        period_end: Some(last.date),
        cumulative_return: last.value,
        annualized_return: (annualized * HUNDRED).round_dp(precision),
        max_drawdown: (calculate_max_drawdown(points) * HUNDRED).round_dp(precision),
    }
}

/// Geometric annualisation of a fractional return.
///
/// Periods shorter than a year return `total_return` unchanged. Losses of
/// 100 % or more are reported as -1.
pub fn calculate_annualized_return(
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_return: Decimal,
) -> Decimal {
    if start_date > end_date {
        return Decimal::ZERO;
    }

    if total_return <= dec!(-1.0) {
        return dec!(-1.0);
    }

    let days = (end_date - start_date).num_days();
    if days <= 0 {
        return total_return;
    }

    let years = Decimal::from(days) / DAYS_PER_YEAR_DECIMAL;
    if years < Decimal::ONE {
        return total_return;
    }

    let base = Decimal::ONE + total_return;
    if base <= Decimal::ZERO {
        return dec!(-1.0);
    }

    let exponent = Decimal::ONE / years;
    match base.checked_powd(exponent) {
        Some(grown) => grown - Decimal::ONE,
        None => total_return,
    }
}

/// Largest fractional decline from a running peak of the growth index.
fn calculate_max_drawdown(points: &[TwrPoint]) -> Decimal {
    let mut peak_value = Decimal::ONE;
    let mut max_drawdown = Decimal::ZERO;

    for point in points {
        let index_value = Decimal::ONE + point.value / HUNDRED;
        peak_value = peak_value.max(index_value);
        if peak_value.is_zero() {
            max_drawdown = max_drawdown.max(Decimal::ONE);
        } else {
            let drawdown = (peak_value - index_value) / peak_value;
            max_drawdown = max_drawdown.max(drawdown);
        }
    }

    max_drawdown.max(Decimal::ZERO)
}
