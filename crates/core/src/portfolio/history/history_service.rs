use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use futures::future::join_all;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use super::history_model::{HistoryRequest, PortfolioHistory};
use super::history_traits::PortfolioHistoryServiceTrait;
use super::timeline::{effective_start_date, Timeline};
use crate::errors::{CalculatorError, Error, Result};
use crate::portfolio::performance::{
    attribute_cash_flows, calculate_twr, summarize_twr, SeriesDiagnostics, SeriesStats,
    TwrOptions, TwrPoint,
};
use crate::portfolio::positions::track_positions;
use crate::portfolio::valuation::{
    build_daily_price_map, calculate_daily_values, trade_implied_observations,
    DailyPortfolioValue, DailyPriceMap,
};
use crate::quotes::PriceResolverTrait;
use crate::settings::HistorySettings;
use crate::transactions::{filter_market_priced, Transaction};
use crate::utils::time_utils::{valuation_date_from_utc, valuation_date_today};

/// Computes daily value and TWR series from a transaction list.
#[derive(Clone)]
pub struct PortfolioHistoryService {
    settings: HistorySettings,
    tz: Tz,
    price_resolver: Arc<dyn PriceResolverTrait>,
    diagnostics: Option<Arc<dyn SeriesDiagnostics>>,
}

impl PortfolioHistoryService {
    /// Fails when `settings` do not validate.
    pub fn new(
        settings: HistorySettings,
        price_resolver: Arc<dyn PriceResolverTrait>,
    ) -> Result<Self> {
        settings.validate()?;
        let tz = settings.tz()?;
        Ok(Self {
            settings,
            tz,
            price_resolver,
            diagnostics: None,
        })
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn SeriesDiagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn settings(&self) -> &HistorySettings {
        &self.settings
    }

    fn twr_options(&self) -> TwrOptions {
        TwrOptions {
            outlier_threshold: self.settings.outlier_threshold,
            precision: self.settings.return_precision,
        }
    }

    /// Resolves persisted and live prices for every symbol concurrently and
    /// merges them with the trade-implied prices into forward-filled maps.
    ///
    /// History is requested from the symbol's first trade day, so a position
    /// opened before the timeline starts carries its last close into the
    /// first day. A symbol whose lookup fails is priced from its own trades
    /// only.
    async fn load_price_maps(
        &self,
        transactions_by_symbol: &BTreeMap<String, Vec<Transaction>>,
        timeline: &Timeline,
        as_of: NaiveDate,
        allow_live_fallback: bool,
    ) -> HashMap<String, DailyPriceMap> {
        let Some(start) = timeline.start() else {
            return HashMap::new();
        };

        let lookups = transactions_by_symbol.iter().map(|(symbol, transactions)| {
            let from = transactions
                .iter()
                .map(|t| valuation_date_from_utc(t.date, self.tz))
                .min()
                .map_or(start, |first_trade| first_trade.min(start));
            async move {
                let observations = self
                    .price_resolver
                    .resolve_history(symbol, from, as_of, allow_live_fallback)
                    .await;
                (symbol, observations)
            }
        });

        let mut price_maps = HashMap::with_capacity(transactions_by_symbol.len());
        for (symbol, observations) in join_all(lookups).await {
            let history = match observations {
                Ok(history) => history,
                Err(Error::MarketData(e)) if e.is_data_absence() => {
                    debug!("No stored prices for {}: {}", symbol, e);
                    Vec::new()
                }
                Err(e) => {
                    warn!(
                        "Price history for {} unavailable, using trade prices only: {}",
                        symbol, e
                    );
                    Vec::new()
                }
            };
            let implied = transactions_by_symbol
                .get(symbol)
                .map(|txs| trade_implied_observations(txs, self.tz))
                .unwrap_or_default();

            let price_map = build_daily_price_map(history, implied, timeline);
            if price_map.is_empty() {
                debug!("No price available for {} in the requested range", symbol);
            }
            price_maps.insert(symbol.clone(), price_map);
        }
        price_maps
    }

    async fn run(
        &self,
        transactions: &[Transaction],
        request: &HistoryRequest,
    ) -> Result<PortfolioHistory> {
        let started = Instant::now();
        let as_of = request
            .as_of
            .unwrap_or_else(|| valuation_date_today(self.tz));

        if let Some(start) = request.start_date {
            if start > as_of {
                return Err(CalculatorError::InvertedRange { start, as_of }.into());
            }
        }

        let priced = filter_market_priced(transactions);
        if priced.is_empty() {
            debug!("No market-priced transactions, nothing to chart");
            return Ok(PortfolioHistory::empty());
        }

        let Some(effective_start) = effective_start_date(&priced, request.start_date, self.tz)
        else {
            debug!("No purchase with a positive value, nothing to chart");
            return Ok(PortfolioHistory::empty());
        };

        let timeline = Timeline::new(effective_start, as_of);
        if timeline.is_empty() {
            debug!(
                "First purchase {} is after as-of date {}, nothing to chart",
                effective_start, as_of
            );
            return Ok(PortfolioHistory::empty());
        }

        let ledger = track_positions(&priced, effective_start, self.tz);
        let cash_flows = attribute_cash_flows(&priced, effective_start, self.tz);

        let mut transactions_by_symbol: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
        for transaction in priced {
            transactions_by_symbol
                .entry(transaction.symbol.clone())
                .or_default()
                .push(transaction);
        }

        let allow_live_fallback = request
            .allow_live_fallback
            .unwrap_or(self.settings.allow_live_fallback);
        let price_maps = self
            .load_price_maps(&transactions_by_symbol, &timeline, as_of, allow_live_fallback)
            .await;

        let values =
            calculate_daily_values(&timeline, &ledger, &price_maps, self.settings.value_precision);

        if let Some(diagnostics) = &self.diagnostics {
            if let Some(stats) = SeriesStats::from_values(&values) {
                diagnostics.on_value_series(&stats);
            }
        }

        let returns = calculate_twr(&values, &cash_flows, self.twr_options());
        let summary = summarize_twr(&returns, self.settings.return_precision);

        debug!(
            "History for {} symbols over {} days computed in {:?}",
            transactions_by_symbol.len(),
            timeline.len(),
            started.elapsed()
        );

        Ok(PortfolioHistory {
            values,
            cash_flows,
            returns,
            summary,
        })
    }
}

#[async_trait]
impl PortfolioHistoryServiceTrait for PortfolioHistoryService {
    async fn calculate_value_history(
        &self,
        transactions: &[Transaction],
        request: &HistoryRequest,
    ) -> Result<Vec<DailyPortfolioValue>> {
        Ok(self.run(transactions, request).await?.values)
    }

    async fn calculate_twr_history(
        &self,
        transactions: &[Transaction],
        request: &HistoryRequest,
    ) -> Result<Vec<TwrPoint>> {
        Ok(self.run(transactions, request).await?.returns)
    }

    async fn calculate_history(
        &self,
        transactions: &[Transaction],
        request: &HistoryRequest,
    ) -> Result<PortfolioHistory> {
        self.run(transactions, request).await
    }
}
