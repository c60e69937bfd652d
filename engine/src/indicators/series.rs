// Builds the full indicator table (MA5/20/60, RSI14, MACD 12/26/9) over a price history.
use shared::models::{IndicatorRow, PricePoint};

use super::{IndicatorCalculator, Macd, Rsi, Sma, ZeroLossPolicy};
use crate::error::EngineError;

pub struct IndicatorEngine {
    ma5: Sma,
    ma20: Sma,
    ma60: Sma,
    rsi: Rsi,
    macd: Macd,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(ZeroLossPolicy::default())
    }
}

impl IndicatorEngine {
    pub fn new(zero_loss: ZeroLossPolicy) -> Self {
        Self {
            ma5: Sma::new(5),
            ma20: Sma::new(20),
            ma60: Sma::new(60),
            rsi: Rsi::with_policy(14, zero_loss),
            macd: Macd::default(),
        }
    }

    /// Sorts `series` by date and returns one row per point, in that order.
    ///
    /// Fails only when `series` is empty (or, under [`ZeroLossPolicy::Reject`], when the
    /// RSI would divide by a zero smoothed loss).
    pub fn compute(&self, series: &[PricePoint]) -> Result<Vec<IndicatorRow>, EngineError> {
        if series.is_empty() {
            return Err(EngineError::InsufficientData);
        }

        let mut points = series.to_vec();
        points.sort_by_key(|p| p.date);
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();

        let ma5 = column(&self.ma5, &closes)?;
        let ma20 = column(&self.ma20, &closes)?;
        let ma60 = column(&self.ma60, &closes)?;
        let rsi = column(&self.rsi, &closes)?;
        let macd = self.macd.calculate(&closes);

        tracing::debug!(rows = points.len(), "Computed indicator series");

        let rows = points
            .into_iter()
            .enumerate()
            .map(|(i, point)| IndicatorRow {
                point,
                ma5: ma5[i],
                ma20: ma20[i],
                ma60: ma60[i],
                rsi14: rsi[i],
                dif: macd.dif[i],
                dea: macd.dea[i],
                macd: macd.macd[i],
            })
            .collect();
        Ok(rows)
    }
}

fn column(calculator: &dyn IndicatorCalculator, closes: &[f64]) -> Result<Vec<Option<f64>>, EngineError> {
    tracing::trace!(
        indicator = calculator.name(),
        parameters = %calculator.parameters(),
        "Calculating indicator column"
    );
    calculator.calculate(closes)
}

/// [`IndicatorEngine::compute`] with the default zero-loss policy.
pub fn compute(series: &[PricePoint]) -> Result<Vec<IndicatorRow>, EngineError> {
    IndicatorEngine::default().compute(series)
}
