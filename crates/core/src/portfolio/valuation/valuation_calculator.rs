use log::{debug, error};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{DailyPortfolioValue, DailyPriceMap};
use crate::portfolio::history::Timeline;
use crate::portfolio::positions::PositionLedger;

/// Walks the timeline once and values the portfolio on every day.
///
/// For each day and symbol the day's quantity delta is applied first, so a
/// same-day buy is already part of that day's value. A symbol contributes
/// `quantity * price` only when its running quantity is positive and its
/// price map has an entry for the day. Values are rounded to `precision`
/// decimal places.
///
/// # Arguments
///
/// * `timeline` - Days to value, in order.
/// * `ledger` - Opening quantities and per-day deltas.
/// * `price_maps` - Forward-filled prices per symbol.
/// * `precision` - Decimal places kept on each daily value.
pub fn calculate_daily_values(
    timeline: &Timeline,
    ledger: &PositionLedger,
    price_maps: &HashMap<String, DailyPriceMap>,
    precision: u32,
) -> Vec<DailyPortfolioValue> {
    let symbols: BTreeSet<String> = ledger.symbols();

    let mut quantities: BTreeMap<&str, Decimal> = symbols
        .iter()
        .map(|symbol| (symbol.as_str(), ledger.opening_quantity(symbol)))
        .collect();

    let mut values = Vec::with_capacity(timeline.len());

    for &day in timeline.days() {
        let mut total = Decimal::ZERO;

        for (symbol, quantity) in quantities.iter_mut() {
            let delta = ledger.delta_on(symbol, day);
            match quantity.checked_add(delta) {
                Some(next) => *quantity = next,
                None => error!(
                    "Overflow applying {} {} on {}. Quantity unchanged.",
                    delta, symbol, day
                ),
            }

            if *quantity <= Decimal::ZERO {
                continue;
            }

            let Some(price) = price_maps.get(*symbol).and_then(|map| map.get(day)) else {
                debug!(
                    "No price for {} on {}. Position excluded from the day's value.",
                    symbol, day
                );
                continue;
            };

            match quantity
                .checked_mul(price)
                .and_then(|market_value| total.checked_add(market_value))
            {
                Some(new_total) => total = new_total,
                None => error!(
                    "Overflow valuing {} {} at {} on {}. Position skipped.",
                    quantity, symbol, price, day
                ),
            }
        }

        values.push(DailyPortfolioValue {
            date: day,
            value: total.round_dp(precision),
        });
    }

    values
}
