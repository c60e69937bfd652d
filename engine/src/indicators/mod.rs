// Technical indicators module
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod series;
pub mod sma;

pub use ema::Ema;
pub use macd::{Macd, MacdSeries};
pub use rsi::{Rsi, ZeroLossPolicy};
pub use series::{compute, IndicatorEngine};
pub use sma::Sma;

use crate::error::EngineError;
use serde_json::Value;

// Common trait for the single-output indicators computed over a close-price column
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value;
    /// One value per input close; `None` where the indicator is not defined yet.
    fn calculate(&self, closes: &[f64]) -> Result<Vec<Option<f64>>, EngineError>;
}
