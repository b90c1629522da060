//! Portfolio valuation domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate mark-to-market value of the priced portfolio on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPortfolioValue {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Forward-filled day → price mapping for one symbol.
///
/// Days before the first known price are absent; the symbol contributes
/// nothing on those days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyPriceMap {
    prices: BTreeMap<NaiveDate, Decimal>,
}

impl DailyPriceMap {
    pub fn get(&self, day: NaiveDate) -> Option<Decimal> {
        self.prices.get(&day).copied()
    }

    pub fn insert(&mut self, day: NaiveDate, price: Decimal) {
        self.prices.insert(day, price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// First day that carries a price.
    pub fn first_priced_day(&self) -> Option<NaiveDate> {
        self.prices.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Decimal)> {
        self.prices.iter()
    }
}

impl FromIterator<(NaiveDate, Decimal)> for DailyPriceMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Decimal)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}
