//! History request and result models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::portfolio::performance::{DailyCashFlow, PerformanceSummary, TwrPoint};
use crate::portfolio::valuation::DailyPortfolioValue;

/// Parameters of one history computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    /// Earliest day to chart. The first purchase bounds it from below.
    pub start_date: Option<NaiveDate>,
    /// Last day to chart. Defaults to today in the configured timezone.
    pub as_of: Option<NaiveDate>,
    /// Overrides the configured live-quote fallback for this request.
    pub allow_live_fallback: Option<bool>,
}

impl HistoryRequest {
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            ..Default::default()
        }
    }

    pub fn as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }
}

/// Everything one history computation produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHistory {
    pub values: Vec<DailyPortfolioValue>,
    pub cash_flows: DailyCashFlow,
    pub returns: Vec<TwrPoint>,
    pub summary: PerformanceSummary,
}

impl PortfolioHistory {
    /// "Nothing to chart"; a valid, non-error outcome.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
