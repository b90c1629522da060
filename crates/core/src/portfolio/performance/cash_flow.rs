//! Cash flow attribution for performance calculation.
//!
//! Only the market-priced sub-portfolio is valued, so every buy brings money
//! into it and every sell takes money out. These flows are what the TWR chain
//! strips out of each day's value change.

use chrono::NaiveDate;
use chrono_tz::Tz;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::transactions::{Transaction, TransactionKind};
use crate::utils::time_utils::valuation_date_from_utc;

/// Direction of money crossing the valuation boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// Cash invested into the priced portfolio (buys)
    Contribution,
    /// Cash taken out of the priced portfolio (sells)
    Withdrawal,
}

/// Classify the flow a transaction represents.
pub fn classify_flow(transaction: &Transaction) -> FlowType {
    match transaction.kind {
        TransactionKind::Buy => FlowType::Contribution,
        TransactionKind::Sell => FlowType::Withdrawal,
    }
}

/// Net signed cash flow keyed by day. Days without trades are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyCashFlow {
    flows: BTreeMap<NaiveDate, Decimal>,
}

impl DailyCashFlow {
    /// Net flow on `day`, zero when nothing traded.
    pub fn on(&self, day: NaiveDate) -> Decimal {
        self.flows.get(&day).copied().unwrap_or(Decimal::ZERO)
    }

    /// Adds `amount` to the day's net flow. An amount that would overflow
    /// the running net is dropped.
    pub fn add(&mut self, day: NaiveDate, amount: Decimal) {
        let net = self.flows.entry(day).or_insert(Decimal::ZERO);
        match net.checked_add(amount) {
            Some(next) => *net = next,
            None => warn!("Cash flow of {} on {} overflows the day's net. Ignored.", amount, day),
        }
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Decimal)> {
        self.flows.iter()
    }

    /// Sum of every flow, `None` when it is not representable.
    pub fn net_total(&self) -> Option<Decimal> {
        self.flows
            .values()
            .try_fold(Decimal::ZERO, |acc, flow| acc.checked_add(*flow))
    }
}

/// Nets buy totals (+) and sell totals (-) per day from `effective_start` on.
///
/// Trades before the effective start are already part of the opening
/// positions and are ignored.
pub fn attribute_cash_flows(
    transactions: &[Transaction],
    effective_start: NaiveDate,
    tz: Tz,
) -> DailyCashFlow {
    let mut cash_flows = DailyCashFlow::default();
    for transaction in transactions {
        let day = valuation_date_from_utc(transaction.date, tz);
        if day < effective_start {
            continue;
        }
        let amount = transaction.resolved_total();
        let signed = match classify_flow(transaction) {
            FlowType::Contribution => amount,
            FlowType::Withdrawal => -amount,
        };
        cash_flows.add(day, signed);
    }
    cash_flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::AssetClass;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn create_test_transaction(
        kind: TransactionKind,
        quantity: Decimal,
        price: Decimal,
        total: Option<Decimal>,
        d: u32,
    ) -> Transaction {
        Transaction {
            id: format!("t{}", d),
            symbol: "XYZ".to_string(),
            kind,
            asset_class: AssetClass::Stock,
            quantity,
            price,
            total,
            date: Utc.with_ymd_and_hms(2024, 8, d, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_buy_is_contribution() {
        let tx = create_test_transaction(TransactionKind::Buy, dec!(1), dec!(1), None, 1);
        assert_eq!(classify_flow(&tx), FlowType::Contribution);
    }

    #[test]
    fn test_sell_is_withdrawal() {
        let tx = create_test_transaction(TransactionKind::Sell, dec!(1), dec!(1), None, 1);
        assert_eq!(classify_flow(&tx), FlowType::Withdrawal);
    }

    #[test]
    fn test_buys_and_sells_net_per_day() {
        let txs = vec![
            create_test_transaction(TransactionKind::Buy, dec!(10), dec!(100), None, 3),
            create_test_transaction(TransactionKind::Sell, dec!(2), dec!(110), None, 3),
            create_test_transaction(TransactionKind::Buy, dec!(1), dec!(50), Some(dec!(51)), 5),
        ];
        let flows = attribute_cash_flows(&txs, day(1), chrono_tz::UTC);

        assert_eq!(flows.on(day(3)), dec!(780));
        assert_eq!(flows.on(day(5)), dec!(51));
        assert_eq!(flows.on(day(4)), Decimal::ZERO);
        assert_eq!(flows.len(), 2);
        assert_eq!(flows.net_total(), Some(dec!(831)));
    }

    #[test]
    fn test_flows_before_start_are_ignored() {
        let txs = vec![
            create_test_transaction(TransactionKind::Buy, dec!(10), dec!(100), None, 1),
            create_test_transaction(TransactionKind::Buy, dec!(1), dec!(100), None, 4),
        ];
        let flows = attribute_cash_flows(&txs, day(4), chrono_tz::UTC);
        assert_eq!(flows.on(day(1)), Decimal::ZERO);
        assert_eq!(flows.on(day(4)), dec!(100));
    }

    #[test]
    fn test_missing_total_uses_quantity_times_price() {
        let txs = vec![create_test_transaction(
            TransactionKind::Sell,
            dec!(3),
            dec!(20),
            Some(dec!(0)),
            2,
        )];
        let flows = attribute_cash_flows(&txs, day(1), chrono_tz::UTC);
        assert_eq!(flows.on(day(2)), dec!(-60));
    }

    #[test]
    fn test_overflowing_flow_is_dropped() {
        let mut flows = DailyCashFlow::default();
        flows.add(day(1), Decimal::MAX);
        flows.add(day(1), dec!(1));
        flows.add(day(2), Decimal::MAX);

        assert_eq!(flows.on(day(1)), Decimal::MAX);
        assert_eq!(flows.net_total(), None);
    }

    #[test]
    fn test_no_transactions_no_flows() {
        assert!(attribute_cash_flows(&[], day(1), chrono_tz::UTC).is_empty());
    }
}
