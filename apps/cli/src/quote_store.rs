use std::collections::HashMap;

use chrono::NaiveDate;
use valuetrack_core::quotes::{PriceObservation, QuoteStore};
use valuetrack_core::Result;

/// Persisted closes held in memory, loaded once from a price file.
#[derive(Debug, Default)]
pub struct InMemoryQuoteStore {
    quotes: HashMap<String, Vec<PriceObservation>>,
}

impl InMemoryQuoteStore {
    pub fn new(mut quotes: HashMap<String, Vec<PriceObservation>>) -> Self {
        for observations in quotes.values_mut() {
            observations.sort_by_key(|o| o.date);
        }
        Self { quotes }
    }

    pub fn symbol_count(&self) -> usize {
        self.quotes.len()
    }
}

impl QuoteStore for InMemoryQuoteStore {
    fn range(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceObservation>> {
        Ok(self
            .quotes
            .get(symbol)
            .map(|observations| {
                observations
                    .iter()
                    .filter(|o| o.date >= start && o.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
