use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Quantities split at the start of the timeline.
///
/// `pre_start_quantities` holds the signed net of every trade before the
/// effective start. `daily_deltas` holds the signed net per symbol per day for
/// trades on or after it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionLedger {
    pub pre_start_quantities: BTreeMap<String, Decimal>,
    pub daily_deltas: BTreeMap<String, BTreeMap<NaiveDate, Decimal>>,
}

impl PositionLedger {
    /// Every symbol that appears in the ledger, in sorted order.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.pre_start_quantities
            .keys()
            .chain(self.daily_deltas.keys())
            .cloned()
            .collect()
    }

    /// Quantity held when the walk starts. Oversold histories clamp to zero.
    pub fn opening_quantity(&self, symbol: &str) -> Decimal {
        self.pre_start_quantities
            .get(symbol)
            .copied()
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    }

    /// Net quantity change for `symbol` on `day`, zero when nothing traded.
    pub fn delta_on(&self, symbol: &str, day: NaiveDate) -> Decimal {
        self.daily_deltas
            .get(symbol)
            .and_then(|deltas| deltas.get(&day))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}
