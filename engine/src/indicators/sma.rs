// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("MA{}", period),
            period,
        }
    }

    /// Mean of the trailing `period` closes, inclusive of the current one.
    /// Rows without a full window stay `None`.
    pub fn values(&self, closes: &[f64]) -> Vec<Option<f64>> {
        if self.period == 0 || closes.len() < self.period {
            return vec![None; closes.len()];
        }

        let mut results = vec![None; self.period - 1];
        results.extend(closes.windows(self.period).map(|w| Some(window_mean(w))));
        results
    }
}

// A window of one repeated value averages to exactly that value; anything else is a
// Neumaier-compensated sum.
fn window_mean(window: &[f64]) -> f64 {
    let first = window[0];
    if window.iter().all(|&v| v == first) {
        return first;
    }

    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &value in window {
        let t = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }
    (sum + compensation) / window.len() as f64
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, closes: &[f64]) -> Result<Vec<Option<f64>>, EngineError> {
        if self.period == 0 {
            return Err(EngineError::ConfigError("SMA period must be greater than 0".to_string()));
        }
        Ok(self.values(closes))
    }
}
