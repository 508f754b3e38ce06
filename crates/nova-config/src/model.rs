use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use nova_core::PredictionPolicy;
use nova_domain::{CurrencyCode, FilterRange, MonthOverflow};

use crate::ConfigError;

/// Stores user-configurable preferences for the shell and the bill predictor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Currency preselected for new profiles.
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub default_range: FilterRange,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub prediction: PredictionSettings,

    /// Optional directory for CSV reports. Defaults to `~/Documents`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            default_range: FilterRange::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            prediction: PredictionSettings::default(),
            export_dir: None,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prediction.validate()
    }

    pub fn resolve_export_dir(&self) -> PathBuf {
        if let Some(path) = &self.export_dir {
            return path.clone();
        }

        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Thresholds of the recurring-bill predictor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PredictionSettings {
    pub min_transactions: usize,
    pub min_gap_days: i64,
    pub max_gap_days: i64,
    pub horizon_days: i64,
    pub month_overflow: MonthOverflow,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self::from(&PredictionPolicy::MONTHLY_BILL)
    }
}

impl PredictionSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_transactions < 2 {
            return Err(ConfigError::Invalid(
                "prediction.min_transactions must be at least 2".into(),
            ));
        }
        if self.min_gap_days < 1 {
            return Err(ConfigError::Invalid(
                "prediction.min_gap_days must be positive".into(),
            ));
        }
        if self.min_gap_days > self.max_gap_days {
            return Err(ConfigError::Invalid(format!(
                "prediction.min_gap_days ({}) exceeds max_gap_days ({})",
                self.min_gap_days, self.max_gap_days
            )));
        }
        if self.horizon_days < 0 {
            return Err(ConfigError::Invalid(
                "prediction.horizon_days must not be negative".into(),
            ));
        }
        Ok(())
    }

    pub fn policy(&self) -> PredictionPolicy {
        PredictionPolicy {
            min_transactions: self.min_transactions,
            min_gap_days: self.min_gap_days,
            max_gap_days: self.max_gap_days,
            horizon_days: self.horizon_days,
            month_overflow: self.month_overflow,
            ..PredictionPolicy::MONTHLY_BILL
        }
    }
}

impl From<&PredictionPolicy> for PredictionSettings {
    fn from(policy: &PredictionPolicy) -> Self {
        Self {
            min_transactions: policy.min_transactions,
            min_gap_days: policy.min_gap_days,
            max_gap_days: policy.max_gap_days,
            horizon_days: policy.horizon_days,
            month_overflow: policy.month_overflow,
        }
    }
}
