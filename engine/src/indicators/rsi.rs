// Relative Strength Index (RSI) indicator implementation, Wilder smoothing
use super::ema::smooth;
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde::Deserialize;
use serde_json::Value;

/// What to do when the smoothed loss is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroLossPolicy {
    /// RSI is 100 when there were gains; undefined while there has been no movement at all.
    #[default]
    Saturate,
    /// Fail with [`EngineError::DivisionSingularity`].
    Reject,
}

pub struct Rsi {
    name: String,
    period: usize,
    policy: ZeroLossPolicy,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self::with_policy(period, ZeroLossPolicy::default())
    }

    pub fn with_policy(period: usize, policy: ZeroLossPolicy) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
            policy,
        }
    }

    fn from_averages(&self, index: usize, avg_gain: f64, avg_loss: f64) -> Result<Option<f64>, EngineError> {
        if avg_loss == 0.0 {
            return match self.policy {
                ZeroLossPolicy::Reject => Err(EngineError::DivisionSingularity { index }),
                ZeroLossPolicy::Saturate if avg_gain > 0.0 => Ok(Some(100.0)),
                ZeroLossPolicy::Saturate => Ok(None),
            };
        }
        let rs = avg_gain / avg_loss;
        Ok(Some(100.0 - (100.0 / (1.0 + rs))))
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "zero_loss": format!("{:?}", self.policy) })
    }

    fn calculate(&self, closes: &[f64]) -> Result<Vec<Option<f64>>, EngineError> {
        if self.period == 0 {
            return Err(EngineError::ConfigError("RSI period must be greater than 0".to_string()));
        }
        if closes.is_empty() {
            return Ok(Vec::new());
        }

        // The first row has no prior close: it seeds both streams with 0.
        let (gains, losses): (Vec<f64>, Vec<f64>) = std::iter::once((0.0, 0.0))
            .chain(closes.windows(2).map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            }))
            .unzip();

        let alpha = 1.0 / self.period as f64;
        let avg_gains = smooth(&gains, alpha);
        let avg_losses = smooth(&losses, alpha);

        let mut results = Vec::with_capacity(closes.len());
        results.push(None);
        for i in 1..closes.len() {
            results.push(self.from_averages(i, avg_gains[i], avg_losses[i])?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_hand_computed_values() {
        // period 2 => alpha 0.5
        // smoothed gains: 0, 0.5, 0.25, 1.125 ; smoothed losses: 0, 0, 0.5, 0.25
        let results = Rsi::new(2).calculate(&[10.0, 11.0, 10.0, 12.0]).unwrap();
        assert_eq!(results[0], None);
        assert_eq!(results[1], Some(100.0));
        assert!((results[2].unwrap() - 100.0 / 3.0).abs() < 1e-9);
        assert!((results[3].unwrap() - (100.0 - 100.0 / 5.5)).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_reference_closes_stay_in_range() {
        let closes = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64, 46.25,
        ];
        let results = Rsi::new(14).calculate(&closes).unwrap();
        assert_eq!(results.len(), closes.len());
        assert_eq!(results[0], None);
        for value in results.iter().skip(1) {
            let v = value.expect("defined after the first row");
            assert!((0.0..=100.0).contains(&v), "RSI out of range: {}", v);
        }
        // More gains than losses over the run
        assert!(results[20].unwrap() > 50.0);
    }

    #[test]
    fn test_rsi_all_gains() {
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let results = Rsi::new(14).calculate(&closes).unwrap();
        assert_eq!(results[0], None);
        for value in &results[1..] {
            assert_eq!(*value, Some(100.0));
        }
    }

    #[test]
    fn test_rsi_all_losses() {
        let closes: Vec<f64> = (1..=20).map(|i| 20.0 - i as f64).collect();
        let results = Rsi::new(14).calculate(&closes).unwrap();
        for value in &results[1..] {
            assert_eq!(*value, Some(0.0));
        }
    }

    #[test]
    fn test_rsi_flat_series_is_undefined() {
        let results = Rsi::new(14).calculate(&[5.0; 10]).unwrap();
        assert!(results.iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_reject_policy_reports_row() {
        let rsi = Rsi::with_policy(14, ZeroLossPolicy::Reject);
        match rsi.calculate(&[1.0, 2.0, 3.0]) {
            Err(EngineError::DivisionSingularity { index }) => assert_eq!(index, 1),
            other => panic!("expected DivisionSingularity, got {:?}", other),
        }
        // A single row never divides
        assert_eq!(rsi.calculate(&[1.0]).unwrap(), vec![None]);
    }
}
