// Engine library root
//
// `indicators` and `signals` are the pure computation core. `data`, `services` and
// `report` surround it with CSV providers, an async cache-backed service and text output.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod report;
pub mod services;
pub mod signals;

pub use error::{EngineError, ProviderError};
pub use indicators::compute;
pub use signals::{evaluate, evaluate_series};
