//! Price observation model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a price observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceSource {
    /// Persisted daily close
    #[default]
    History,
    /// Live quote used to fill a recent gap
    Live,
    /// Price implied by one of the user's own trades
    Trade,
}

/// A daily price for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub price: Decimal,
    #[serde(default)]
    pub source: PriceSource,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self {
            date,
            price,
            source: PriceSource::History,
        }
    }

    pub fn with_source(date: NaiveDate, price: Decimal, source: PriceSource) -> Self {
        Self {
            date,
            price,
            source,
        }
    }

    /// Prices must be strictly positive to be used for valuation.
    pub fn is_usable(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

/// Drops unusable observations and orders the rest by date.
///
/// When several observations share a day, the first one in source priority
/// order (history, then live, then trade) is kept.
pub fn sanitize_observations(observations: Vec<PriceObservation>) -> Vec<PriceObservation> {
    let mut usable: Vec<PriceObservation> = observations
        .into_iter()
        .filter(PriceObservation::is_usable)
        .collect();
    usable.sort_by_key(|o| (o.date, source_rank(o.source)));
    usable.dedup_by_key(|o| o.date);
    usable
}

fn source_rank(source: PriceSource) -> u8 {
    match source {
        PriceSource::History => 0,
        PriceSource::Live => 1,
        PriceSource::Trade => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_sanitize_drops_non_positive_prices() {
        let cleaned = sanitize_observations(vec![
            PriceObservation::new(day(1), dec!(10)),
            PriceObservation::new(day(2), dec!(0)),
            PriceObservation::new(day(3), dec!(-4)),
        ]);
        assert_eq!(cleaned, vec![PriceObservation::new(day(1), dec!(10))]);
    }

    #[test]
    fn test_sanitize_sorts_and_prefers_history_on_same_day() {
        let cleaned = sanitize_observations(vec![
            PriceObservation::with_source(day(3), dec!(13), PriceSource::Trade),
            PriceObservation::new(day(3), dec!(12)),
            PriceObservation::with_source(day(1), dec!(9), PriceSource::Live),
        ]);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].date, day(1));
        assert_eq!(cleaned[1].price, dec!(12));
        assert_eq!(cleaned[1].source, PriceSource::History);
    }
}
