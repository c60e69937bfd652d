// MACD (12, 26, 9): DIF = EMA(fast) - EMA(slow), DEA = EMA(signal) of DIF, MACD = 2 * (DIF - DEA)
use super::ema::Ema;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub macd: Vec<f64>,
}

pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }

    /// Every EMA is seeded by its own first input, so all three lines exist from row 0.
    pub fn calculate(&self, closes: &[f64]) -> MacdSeries {
        let fast = self.fast.values(closes);
        let slow = self.slow.values(closes);
        let dif: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let dea = self.signal.values(&dif);
        let macd = dif.iter().zip(&dea).map(|(d, e)| 2.0 * (d - e)).collect();
        MacdSeries { dif, dea, macd }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_flat_series_is_zero() {
        let series = Macd::default().calculate(&[7.5; 40]);
        assert!(series.dif.iter().all(|v| *v == 0.0));
        assert!(series.dea.iter().all(|v| *v == 0.0));
        assert!(series.macd.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_macd_second_row_by_hand() {
        let series = Macd::default().calculate(&[10.0, 12.0]);
        // EMA12 = 10 + 2/13 * 2, EMA26 = 10 + 2/27 * 2
        let dif = 4.0 / 13.0 - 4.0 / 27.0;
        let dea = 0.2 * dif;
        assert_eq!(series.dif[0], 0.0);
        assert!((series.dif[1] - dif).abs() < 1e-12);
        assert!((series.dea[1] - dea).abs() < 1e-12);
        assert!((series.macd[1] - 2.0 * (dif - dea)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_rising_prices_turn_dif_positive() {
        let closes: Vec<f64> = (0..50).map(|i| 10.0 + i as f64 * 0.5).collect();
        let series = Macd::default().calculate(&closes);
        assert!(series.dif[49] > 0.0);
        assert!(series.dif[49] > series.dea[49]);
    }

    #[test]
    fn test_macd_empty() {
        let series = Macd::default().calculate(&[]);
        assert!(series.dif.is_empty() && series.dea.is_empty() && series.macd.is_empty());
    }
}
