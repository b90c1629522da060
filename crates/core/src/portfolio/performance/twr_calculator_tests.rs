//! Unit tests for the TWR chain.

use super::*;
use crate::portfolio::valuation::DailyPortfolioValue;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

fn options() -> TwrOptions {
    TwrOptions {
        outlier_threshold: dec!(0.5),
        precision: 6,
    }
}

fn series(values: &[Decimal]) -> Vec<DailyPortfolioValue> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DailyPortfolioValue {
            date: day(i as u32 + 1),
            value: *v,
        })
        .collect()
}

fn values_of(points: &[TwrPoint]) -> Vec<Decimal> {
    points.iter().map(|p| p.value).collect()
}

// ============================================================================
// daily_return
// ============================================================================

#[test]
fn test_daily_return_without_flow() {
    assert_eq!(daily_return(dec!(1000), dec!(1100), dec!(0), dec!(0.5)), dec!(0.1));
}

#[test]
fn test_daily_return_strips_contribution() {
    // 500 of the 1500 is new money
    assert_eq!(daily_return(dec!(1000), dec!(1500), dec!(500), dec!(0.5)), dec!(0));
}

#[test]
fn test_daily_return_strips_withdrawal() {
    // sold 400 worth, the rest rose 5 %
    assert_eq!(daily_return(dec!(1000), dec!(650), dec!(-400), dec!(0.5)), dec!(0.05));
}

#[test]
fn test_daily_return_zero_previous_value() {
    assert_eq!(daily_return(dec!(0), dec!(250), dec!(250), dec!(0.5)), Decimal::ZERO);
    assert_eq!(daily_return(dec!(0), dec!(0), dec!(0), dec!(0.5)), Decimal::ZERO);
    assert_eq!(daily_return(dec!(0), dec!(250), dec!(0), dec!(0.5)), Decimal::ZERO);
}

#[test]
fn test_daily_return_outliers_are_clamped() {
    assert_eq!(daily_return(dec!(1000), dec!(10), dec!(0), dec!(0.5)), Decimal::ZERO);
    assert_eq!(daily_return(dec!(10), dec!(1000), dec!(0), dec!(0.5)), Decimal::ZERO);
}

#[test]
fn test_daily_return_at_threshold_is_kept() {
    assert_eq!(daily_return(dec!(100), dec!(150), dec!(0), dec!(0.5)), dec!(0.5));
    assert_eq!(daily_return(dec!(100), dec!(50), dec!(0), dec!(0.5)), dec!(-0.5));
}

// ============================================================================
// calculate_twr
// ============================================================================

#[test]
fn test_empty_series_gives_empty_chain() {
    assert!(calculate_twr(&[], &DailyCashFlow::default(), options()).is_empty());
}

#[test]
fn test_first_point_is_zero() {
    let points = calculate_twr(&series(&[dec!(500)]), &DailyCashFlow::default(), options());
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].value, Decimal::ZERO);
    assert_eq!(points[0].date, day(1));
}

#[test]
fn test_price_move_is_reflected() {
    let values = series(&[dec!(1000), dec!(1000), dec!(1000), dec!(1000), dec!(1100)]);
    let points = calculate_twr(&values, &DailyCashFlow::default(), options());
    assert_eq!(
        values_of(&points),
        vec![dec!(0), dec!(0), dec!(0), dec!(0), dec!(10)]
    );
}

#[test]
fn test_returns_compound() {
    let values = series(&[dec!(100), dec!(110), dec!(121)]);
    let points = calculate_twr(&values, &DailyCashFlow::default(), options());
    assert_eq!(values_of(&points), vec![dec!(0), dec!(10), dec!(21)]);
}

#[test]
fn test_contribution_is_not_a_return() {
    let values = series(&[dec!(1000), dec!(1000), dec!(2100)]);
    let mut flows = DailyCashFlow::default();
    flows.add(day(3), dec!(1000));

    let points = calculate_twr(&values, &flows, options());
    assert_eq!(points[2].value, dec!(10));
}

#[test]
fn test_first_contribution_after_empty_days() {
    let values = series(&[dec!(0), dec!(0), dec!(250), dec!(275)]);
    let mut flows = DailyCashFlow::default();
    flows.add(day(3), dec!(250));

    let points = calculate_twr(&values, &flows, options());
    assert_eq!(values_of(&points), vec![dec!(0), dec!(0), dec!(0), dec!(10)]);
}

#[test]
fn test_seed_day_flow_is_ignored() {
    let values = series(&[dec!(1000), dec!(1050)]);
    let mut flows = DailyCashFlow::default();
    flows.add(day(1), dec!(1000));

    let points = calculate_twr(&values, &flows, options());
    assert_eq!(values_of(&points), vec![dec!(0), dec!(5)]);
}

#[test]
fn test_glitch_day_does_not_corrupt_chain() {
    let glitched = series(&[dec!(1000), dec!(1000), dec!(3), dec!(1000), dec!(1100)]);
    let clean = series(&[dec!(1000), dec!(1000), dec!(1000), dec!(1000), dec!(1100)]);

    let glitched_points = calculate_twr(&glitched, &DailyCashFlow::default(), options());
    let clean_points = calculate_twr(&clean, &DailyCashFlow::default(), options());

    assert_eq!(glitched_points[2].value, Decimal::ZERO);
    assert_eq!(
        glitched_points.last().unwrap().value,
        clean_points.last().unwrap().value
    );
}

#[test]
fn test_full_liquidation_then_rebuy() {
    let values = series(&[dec!(1000), dec!(0), dec!(0), dec!(500), dec!(550)]);
    let mut flows = DailyCashFlow::default();
    flows.add(day(2), dec!(-1000));
    flows.add(day(4), dec!(500));

    let points = calculate_twr(&values, &flows, options());
    assert_eq!(
        values_of(&points),
        vec![dec!(0), dec!(0), dec!(0), dec!(0), dec!(10)]
    );
}

#[test]
fn test_output_is_rounded_to_precision() {
    let values = series(&[dec!(3), dec!(4)]);
    let points = calculate_twr(
        &values,
        &DailyCashFlow::default(),
        TwrOptions {
            outlier_threshold: dec!(0.5),
            precision: 2,
        },
    );
    assert_eq!(points[1].value, dec!(33.33));
}

// ============================================================================
// TwrChain
// ============================================================================

#[test]
fn test_chain_state_transitions() {
    let values = series(&[dec!(100), dec!(101)]);
    let mut chain = TwrChain::new(options());
    assert_eq!(chain.state(), TwrState::Uninitialized);

    chain.push(&values[0], Decimal::ZERO).unwrap();
    assert_eq!(chain.state(), TwrState::Seeded);

    chain.push(&values[1], Decimal::ZERO).unwrap();
    assert_eq!(chain.state(), TwrState::Accumulating);

    chain.finish();
    assert_eq!(chain.state(), TwrState::Done);
    assert!(chain.push(&values[1], Decimal::ZERO).is_none());
}

// ============================================================================
// Numeric limits
// ============================================================================

#[test]
fn test_unrepresentable_percentage_is_treated_as_flat() {
    let huge = Decimal::from_i128_with_scale(10i128.pow(25), 0);
    let values = series(&[dec!(0.01), huge, huge]);
    let points = calculate_twr(
        &values,
        &DailyCashFlow::default(),
        TwrOptions {
            outlier_threshold: Decimal::MAX,
            precision: 6,
        },
    );

    assert_eq!(values_of(&points), vec![dec!(0), dec!(0), dec!(0)]);
}

#[test]
fn test_daily_return_with_extreme_withdrawal_is_clamped() {
    // curr - flow overflows the decimal range
    assert_eq!(
        daily_return(dec!(0.0000001), Decimal::MAX, Decimal::MIN, Decimal::MAX),
        Decimal::ZERO
    );
}
