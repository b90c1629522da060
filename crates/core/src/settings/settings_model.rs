//! Engine settings.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DECIMAL_PRECISION, DEFAULT_TIMEZONE, DISPLAY_DECIMAL_PRECISION, MAX_DAILY_RETURN,
};
use crate::errors::{Result, ValidationError};

/// Tunables for a history computation.
///
/// Every field has a default, so an empty JSON object deserializes to the
/// standard behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistorySettings {
    /// Absolute daily return above which a day is treated as a data glitch.
    pub outlier_threshold: Decimal,
    /// Decimal places kept on daily portfolio values.
    pub value_precision: u32,
    /// Decimal places kept on emitted TWR percentages.
    pub return_precision: u32,
    /// Whether the price resolver may fill recent gaps with a live quote.
    pub allow_live_fallback: bool,
    /// IANA timezone in which transaction timestamps become day keys.
    pub timezone: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            outlier_threshold: MAX_DAILY_RETURN,
            value_precision: DISPLAY_DECIMAL_PRECISION,
            return_precision: DECIMAL_PRECISION,
            allow_live_fallback: true,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl HistorySettings {
    /// Parses settings from a JSON document, then validates them.
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: HistorySettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.outlier_threshold <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "outlierThreshold must be positive, got {}",
                self.outlier_threshold
            ))
            .into());
        }
        self.tz()?;
        Ok(())
    }

    /// Resolves the configured timezone name.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            ValidationError::InvalidInput(format!("Unknown timezone '{}'", self.timezone)).into()
        })
    }
}
