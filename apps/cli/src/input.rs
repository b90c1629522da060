//! JSON input files.
//!
//! Transactions are an array of objects:
//! `{"id", "symbol", "kind": "BUY"|"SELL", "assetClass", "quantity", "price", "total", "date"}`.
//! Prices are an object keyed by symbol: `{"XYZ": [{"date": "2024-05-01", "price": 10.5}]}`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use valuetrack_core::quotes::PriceObservation;
use valuetrack_core::Transaction;

pub fn parse_transactions(raw: &str) -> Result<Vec<Transaction>> {
    serde_json::from_str(raw).context("Invalid transaction file")
}

pub fn parse_prices(raw: &str) -> Result<HashMap<String, Vec<PriceObservation>>> {
    serde_json::from_str(raw).context("Invalid price file")
}

pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transactions from {}", path.display()))?;
    parse_transactions(&raw)
}

pub fn load_prices(path: &Path) -> Result<HashMap<String, Vec<PriceObservation>>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prices from {}", path.display()))?;
    parse_prices(&raw)
}
