use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::transactions::Transaction;
use crate::utils::time_utils::{get_days_between, valuation_date_from_utc};

/// Ordered, gap-free run of calendar days a history is computed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    days: Vec<NaiveDate>,
}

impl Timeline {
    /// Every calendar day from `start` to `end`, inclusive. Empty when
    /// `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            days: get_days_between(start, end),
        }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// The later of the requested start and the day of the first purchase with a
/// positive value.
///
/// Returns `None` when no such purchase exists; there is nothing to chart.
pub fn effective_start_date(
    transactions: &[Transaction],
    requested_start: Option<NaiveDate>,
    tz: Tz,
) -> Option<NaiveDate> {
    let first_buy = transactions
        .iter()
        .filter(|t| t.is_buy() && t.resolved_total() > Decimal::ZERO)
        .map(|t| valuation_date_from_utc(t.date, tz))
        .min()?;

    Some(match requested_start {
        Some(requested) => requested.max(first_buy),
        None => first_buy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{AssetClass, TransactionKind};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn trade(kind: TransactionKind, quantity: Decimal, price: Decimal, d: u32) -> Transaction {
        Transaction {
            id: format!("t{}", d),
            symbol: "XYZ".to_string(),
            kind,
            asset_class: AssetClass::Stock,
            quantity,
            price,
            total: None,
            date: Utc.with_ymd_and_hms(2024, 7, d, 18, 45, 0).unwrap(),
        }
    }

    #[test]
    fn test_timeline_is_inclusive_and_gap_free() {
        let timeline = Timeline::new(day(1), day(5));
        assert_eq!(timeline.len(), 5);
        assert_eq!(timeline.start(), Some(day(1)));
        assert_eq!(timeline.end(), Some(day(5)));
        assert!(timeline
            .days()
            .windows(2)
            .all(|w| w[0].succ_opt() == Some(w[1])));
    }

    #[test]
    fn test_timeline_after_today_is_empty() {
        let timeline = Timeline::new(day(6), day(5));
        assert!(timeline.is_empty());
        assert_eq!(timeline.start(), None);
    }

    #[test]
    fn test_effective_start_is_first_buy_when_no_request() {
        let txs = vec![
            trade(TransactionKind::Buy, dec!(1), dec!(10), 9),
            trade(TransactionKind::Buy, dec!(1), dec!(10), 4),
        ];
        assert_eq!(effective_start_date(&txs, None, chrono_tz::UTC), Some(day(4)));
    }

    #[test]
    fn test_effective_start_takes_later_of_request_and_first_buy() {
        let txs = vec![trade(TransactionKind::Buy, dec!(1), dec!(10), 4)];
        assert_eq!(
            effective_start_date(&txs, Some(day(2)), chrono_tz::UTC),
            Some(day(4))
        );
        assert_eq!(
            effective_start_date(&txs, Some(day(8)), chrono_tz::UTC),
            Some(day(8))
        );
    }

    #[test]
    fn test_sells_and_zero_value_buys_do_not_start_the_timeline() {
        let txs = vec![
            trade(TransactionKind::Sell, dec!(1), dec!(10), 2),
            trade(TransactionKind::Buy, dec!(1), dec!(0), 3),
            trade(TransactionKind::Buy, dec!(2), dec!(5), 6),
        ];
        assert_eq!(effective_start_date(&txs, None, chrono_tz::UTC), Some(day(6)));
    }

    #[test]
    fn test_no_positive_buy_means_no_start() {
        let txs = vec![trade(TransactionKind::Sell, dec!(1), dec!(10), 2)];
        assert_eq!(effective_start_date(&txs, Some(day(1)), chrono_tz::UTC), None);
        assert_eq!(effective_start_date(&[], None, chrono_tz::UTC), None);
    }
}
