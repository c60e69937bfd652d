// Exponential Moving Average (EMA) indicator implementation

/// Recursive exponential smoothing seeded by the first raw value:
/// `out[0] = values[0]`, `out[i] = alpha * values[i] + (1 - alpha) * out[i - 1]`.
///
/// A value equal to the running average leaves it untouched, so a constant input
/// smooths to exactly that constant.
pub fn smooth(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut results = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    if let Some(&first) = iter.next() {
        let mut previous = first;
        results.push(previous);
        for &value in iter {
            if value != previous {
                previous = alpha * value + (1.0 - alpha) * previous;
            }
            results.push(previous);
        }
    }
    results
}

pub struct Ema {
    span: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self { span }
    }

    pub fn alpha(&self) -> f64 {
        2.0 / (self.span as f64 + 1.0)
    }

    /// EMA over every input value; defined from the first one on.
    pub fn values(&self, data: &[f64]) -> Vec<f64> {
        smooth(data, self.alpha())
    }
}
