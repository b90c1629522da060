use chrono_tz::Tz;

use super::DailyPriceMap;
use crate::portfolio::history::Timeline;
use crate::quotes::{sanitize_observations, PriceObservation, PriceSource};
use crate::transactions::Transaction;
use crate::utils::time_utils::valuation_date_from_utc;

/// Price points implied by the user's own trades in one symbol.
///
/// Trades without a usable unit price are skipped.
pub fn trade_implied_observations(transactions: &[Transaction], tz: Tz) -> Vec<PriceObservation> {
    transactions
        .iter()
        .filter_map(|t| {
            t.implied_price().map(|price| {
                PriceObservation::with_source(
                    valuation_date_from_utc(t.date, tz),
                    price,
                    PriceSource::Trade,
                )
            })
        })
        .collect()
}

/// Builds the forward-filled price map of one symbol over `timeline`.
///
/// Persisted history and trade-implied prices are merged; on a day with both,
/// the persisted close wins. Each timeline day takes the most recent
/// observation on or before it, so a trade before the first persisted close
/// seeds the symbol from the start. Days before any observation stay empty.
pub fn build_daily_price_map(
    history: Vec<PriceObservation>,
    implied: Vec<PriceObservation>,
    timeline: &Timeline,
) -> DailyPriceMap {
    let mut merged = history;
    merged.extend(implied);
    let observations = sanitize_observations(merged);

    let mut price_map = DailyPriceMap::default();
    let mut pending = observations.iter().peekable();
    let mut last_known_price = None;

    for &day in timeline.days() {
        while let Some(observation) = pending.next_if(|o| o.date <= day) {
            last_known_price = Some(observation.price);
        }
        if let Some(price) = last_known_price {
            price_map.insert(day, price);
        }
    }

    price_map
}
