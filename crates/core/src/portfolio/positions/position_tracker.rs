use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{debug, error};
use rust_decimal::Decimal;

use super::PositionLedger;
use crate::transactions::Transaction;
use crate::utils::time_utils::valuation_date_from_utc;

/// Splits transactions into opening quantities and per-day deltas.
///
/// Each transaction is keyed by its calendar day in `tz`. Trades strictly
/// before `effective_start` fold into the opening quantity of their symbol;
/// the rest are summed per symbol and day.
pub fn track_positions(
    transactions: &[Transaction],
    effective_start: NaiveDate,
    tz: Tz,
) -> PositionLedger {
    let mut ledger = PositionLedger::default();

    for transaction in transactions {
        let day = valuation_date_from_utc(transaction.date, tz);
        let delta = transaction.signed_quantity();

        let slot = if day < effective_start {
            ledger
                .pre_start_quantities
                .entry(transaction.symbol.clone())
                .or_insert(Decimal::ZERO)
        } else {
            ledger
                .daily_deltas
                .entry(transaction.symbol.clone())
                .or_default()
                .entry(day)
                .or_insert(Decimal::ZERO)
        };
        match slot.checked_add(delta) {
            Some(next) => *slot = next,
            None => error!(
                "Overflow applying transaction {} ({} {}). Skipped.",
                transaction.id, delta, transaction.symbol
            ),
        }
    }

    for (symbol, quantity) in &ledger.pre_start_quantities {
        if *quantity < Decimal::ZERO {
            debug!(
                "Net position for {} before {} is negative ({}). Opening at zero.",
                symbol, effective_start, quantity
            );
        }
    }

    ledger
}
