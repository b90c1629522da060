use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use valuetrack_core::HistorySettings;

/// Environment-derived configuration. Every value is optional; unset values
/// keep the engine defaults or the values from `VT_SETTINGS_FILE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub settings_path: Option<PathBuf>,
    pub timezone: Option<String>,
    pub outlier_threshold: Option<Decimal>,
    pub value_precision: Option<u32>,
    pub return_precision: Option<u32>,
    pub allow_live_fallback: Option<bool>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            settings_path: var("VT_SETTINGS_FILE").map(PathBuf::from),
            timezone: var("VT_TIMEZONE"),
            outlier_threshold: var("VT_OUTLIER_THRESHOLD")
                .map(|v| v.trim().parse::<Decimal>())
                .transpose()
                .context("VT_OUTLIER_THRESHOLD must be a decimal number")?,
            value_precision: var("VT_VALUE_PRECISION")
                .map(|v| v.trim().parse::<u32>())
                .transpose()
                .context("VT_VALUE_PRECISION must be a non-negative integer")?,
            return_precision: var("VT_RETURN_PRECISION")
                .map(|v| v.trim().parse::<u32>())
                .transpose()
                .context("VT_RETURN_PRECISION must be a non-negative integer")?,
            allow_live_fallback: var("VT_ALLOW_LIVE_FALLBACK")
                .map(|v| v.trim().parse::<bool>())
                .transpose()
                .context("VT_ALLOW_LIVE_FALLBACK must be true or false")?,
        })
    }

    /// Settings file (if any) with the environment overrides applied on top.
    pub fn history_settings(&self) -> Result<HistorySettings> {
        let mut settings = match &self.settings_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings file {}", path.display()))?;
                HistorySettings::from_json(&raw)?
            }
            None => HistorySettings::default(),
        };

        if let Some(timezone) = &self.timezone {
            settings.timezone = timezone.clone();
        }
        if let Some(threshold) = self.outlier_threshold {
            settings.outlier_threshold = threshold;
        }
        if let Some(precision) = self.value_precision {
            settings.value_precision = precision;
        }
        if let Some(precision) = self.return_precision {
            settings.return_precision = precision;
        }
        if let Some(allow) = self.allow_live_fallback {
            settings.allow_live_fallback = allow;
        }

        settings.validate()?;
        Ok(settings)
    }
}
