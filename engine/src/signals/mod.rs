// Signal evaluation over the two most recent indicator rows
pub mod evaluator;

pub use evaluator::{classify_crossover, classify_momentum, classify_trend, evaluate, evaluate_series, score};
