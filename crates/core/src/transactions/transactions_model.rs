//! Transaction domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_constants::{TRANSACTION_KIND_BUY, TRANSACTION_KIND_SELL};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Buy,
    Sell,
}

impl TransactionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => TRANSACTION_KIND_BUY,
            TransactionKind::Sell => TRANSACTION_KIND_SELL,
        }
    }

    /// +1 for buys, -1 for sells.
    pub fn sign(&self) -> Decimal {
        match self {
            TransactionKind::Buy => Decimal::ONE,
            TransactionKind::Sell => Decimal::NEGATIVE_ONE,
        }
    }
}

/// Instrument classification carried with each transaction.
///
/// Only classes with an external market price series take part in the
/// historical valuation; the rest are valued elsewhere in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    #[default]
    Stock,
    Etf,
    Reit,
    RealEstateFund, // Listed real estate investment funds (FII)
    Bdr,            // Depositary receipts
    Crypto,
    FixedIncome,
    EmergencyReserve,
    OpportunityReserve,
    RealEstate, // Physical property
    Custom,
}

impl AssetClass {
    /// True when the class is priced by a market data feed.
    pub fn is_market_priced(&self) -> bool {
        matches!(
            self,
            AssetClass::Stock
                | AssetClass::Etf
                | AssetClass::Reit
                | AssetClass::RealEstateFund
                | AssetClass::Bdr
                | AssetClass::Crypto
        )
    }
}

/// A single buy or sell as recorded by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub symbol: String,
    pub kind: TransactionKind,
    #[serde(default)]
    pub asset_class: AssetClass,
    pub quantity: Decimal,
    pub price: Decimal,
    /// Recorded gross amount. Missing or non-positive totals are derived.
    #[serde(default)]
    pub total: Option<Decimal>,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn is_buy(&self) -> bool {
        self.kind == TransactionKind::Buy
    }

    /// Gross amount of the trade, see [`derive_total`].
    pub fn resolved_total(&self) -> Decimal {
        derive_total(self.quantity, self.price, self.total)
    }

    /// Unit price implied by the trade, see [`derive_unit_price`].
    pub fn implied_price(&self) -> Option<Decimal> {
        derive_unit_price(self.quantity, self.price, self.total)
    }

    /// Quantity with the trade direction applied.
    pub fn signed_quantity(&self) -> Decimal {
        self.kind.sign() * self.quantity
    }

    /// Cash moved into (+) or out of (-) the priced portfolio by this trade.
    pub fn signed_total(&self) -> Decimal {
        self.kind.sign() * self.resolved_total()
    }
}

/// Gross amount of a trade.
///
/// Fallback order:
/// 1. the recorded `total`, when present and positive;
/// 2. `quantity * price`.
pub fn derive_total(quantity: Decimal, price: Decimal, total: Option<Decimal>) -> Decimal {
    match total {
        Some(total) if total > Decimal::ZERO => total,
        _ => quantity.checked_mul(price).unwrap_or(Decimal::ZERO),
    }
}

/// Unit price of a trade.
///
/// Fallback order:
/// 1. the recorded `price`, when positive;
/// 2. `total / quantity`, when both are positive;
/// 3. none.
pub fn derive_unit_price(
    quantity: Decimal,
    price: Decimal,
    total: Option<Decimal>,
) -> Option<Decimal> {
    if price > Decimal::ZERO {
        return Some(price);
    }
    match total {
        Some(total) if total > Decimal::ZERO && quantity > Decimal::ZERO => {
            total.checked_div(quantity)
        }
        _ => None,
    }
}
