use thiserror::Error;

/// Failures raised by a price history or news source.
///
/// Kept apart from [`EngineError::InsufficientData`] so callers can tell "the provider
/// returned nothing" from "the engine was handed nothing".
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("No {timeframe} history found for '{symbol}'")]
    EmptyHistory { symbol: String, timeframe: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("Data format error: {0}")]
    Format(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient data: the price series is empty")]
    InsufficientData,

    #[error("Insufficient history: at least 2 indicator rows are required, got {available}")]
    InsufficientHistory { available: usize },

    #[error("Division singularity: smoothed loss is zero at row {index} while computing RSI")]
    DivisionSingularity { index: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data provider error: {source}")]
    Provider {
        #[from]
        source: ProviderError,
    },

    #[error("Market data store error: {0}")]
    MarketDataError(String),
}
