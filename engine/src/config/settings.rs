// Engine settings, loaded from a JSON file or defaulted
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::EngineError;
use crate::indicators::ZeroLossPolicy;
use crate::logging::LogFormat;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    /// Root directory of the CSV exports read by the data provider.
    pub data_dir: PathBuf,
    /// Months of daily history loaded for an analysis.
    pub lookback_months: u32,
    /// Trailing rows shown by the history listing.
    pub history_rows: usize,
    /// First date requested for the history listing.
    pub history_start: NaiveDate,
    /// News items attached to an analysis report.
    pub news_limit: usize,
    pub rsi_zero_loss: ZeroLossPolicy,
    pub log_format: LogFormat,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_dir: PathBuf::from("data"),
            lookback_months: 6,
            history_rows: 20,
            history_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            news_limit: 3,
            rsi_zero_loss: ZeroLossPolicy::Saturate,
            log_format: LogFormat::Pretty,
        }
    }
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e)))?;
        let settings: EngineSettings = serde_json::from_str(&raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings in '{}': {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.lookback_months == 0 {
            return Err(EngineError::ConfigError("lookback_months must be greater than 0".to_string()));
        }
        if self.history_rows == 0 {
            return Err(EngineError::ConfigError("history_rows must be greater than 0".to_string()));
        }
        Ok(())
    }
}
