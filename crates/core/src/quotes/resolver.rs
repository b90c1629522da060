//! Price history resolution.
//!
//! ```text
//! PortfolioHistoryService → PriceResolverTrait
//!                               ↓
//!                     QuoteHistoryResolver → QuoteStore (persisted closes)
//!                                          → LiveQuoteProvider (recent gaps)
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use std::sync::Arc;

use super::model::{sanitize_observations, PriceObservation, PriceSource};
use super::store::{LiveQuoteProvider, QuoteStore};
use crate::errors::Result;

/// Source of daily prices consumed by the history engine.
#[async_trait]
pub trait PriceResolverTrait: Send + Sync {
    /// Chronological observations for `symbol` between `from` and `to`
    /// (inclusive). May be empty. When `allow_live_fallback` is set the
    /// resolver may fill days after the last persisted close with a live
    /// quote.
    async fn resolve_history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
        allow_live_fallback: bool,
    ) -> Result<Vec<PriceObservation>>;
}

/// Resolver backed by a persisted quote store with an optional live provider.
#[derive(Clone)]
pub struct QuoteHistoryResolver {
    store: Arc<dyn QuoteStore>,
    live_provider: Option<Arc<dyn LiveQuoteProvider>>,
}

impl QuoteHistoryResolver {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self {
            store,
            live_provider: None,
        }
    }

    pub fn with_live_provider(mut self, live_provider: Arc<dyn LiveQuoteProvider>) -> Self {
        self.live_provider = Some(live_provider);
        self
    }

    async fn live_fill(&self, symbol: &str, to: NaiveDate) -> Option<PriceObservation> {
        let provider = self.live_provider.as_ref()?;
        match provider.latest_quote(symbol).await {
            Ok(Some(quote)) if quote.is_usable() => Some(PriceObservation::with_source(
                to,
                quote.price,
                PriceSource::Live,
            )),
            Ok(_) => {
                debug!("No usable live quote for {}", symbol);
                None
            }
            Err(e) => {
                warn!("Live quote lookup failed for {}: {}", symbol, e);
                None
            }
        }
    }
}

#[async_trait]
impl PriceResolverTrait for QuoteHistoryResolver {
    async fn resolve_history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
        allow_live_fallback: bool,
    ) -> Result<Vec<PriceObservation>> {
        if from > to {
            return Ok(Vec::new());
        }

        let mut observations = sanitize_observations(self.store.range(symbol, from, to)?);

        let needs_fill = observations.last().map_or(true, |last| last.date < to);
        if allow_live_fallback && needs_fill {
            if let Some(live) = self.live_fill(symbol, to).await {
                debug!(
                    "Filling {} on {} with live quote {}",
                    symbol, to, live.price
                );
                observations.push(live);
            }
        }

        Ok(observations)
    }
}
