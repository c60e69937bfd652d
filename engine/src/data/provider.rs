// Sources of price history and news consumed by the analysis service
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use shared::models::{NewsItem, PricePoint, TimeFrame};

use super::csv_parser::QuoteCsvParser;
use super::resample;
use crate::error::ProviderError;

pub trait PriceHistoryProvider: Send + Sync {
    /// Points with `from <= date <= to`, sorted ascending by date.
    fn price_history(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, ProviderError>;
}

pub trait NewsProvider: Send + Sync {
    /// At most `limit` items, in the provider's order (most recent first for exports).
    fn recent_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, ProviderError>;
}

/// Reads one directory per symbol:
///
/// ```text
/// <root>/<symbol>/daily.csv     required
/// <root>/<symbol>/weekly.csv    optional, aggregated from daily.csv when absent
/// <root>/<symbol>/monthly.csv   optional, aggregated from daily.csv when absent
/// <root>/<symbol>/news.csv      optional
/// ```
pub struct CsvDataProvider {
    root: PathBuf,
}

impl CsvDataProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn symbol_dir(&self, symbol: &str) -> Result<PathBuf, ProviderError> {
        let valid = !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_') && symbol != "." && symbol != "..";
        if !valid {
            return Err(ProviderError::UnknownSymbol(symbol.to_string()));
        }
        let dir = self.root.join(symbol);
        if !dir.is_dir() {
            return Err(ProviderError::UnknownSymbol(symbol.to_string()));
        }
        Ok(dir)
    }

    fn read_points(path: &Path) -> Result<Vec<PricePoint>, ProviderError> {
        QuoteCsvParser::load_price_history(path).map_err(|e| classify(path, e))
    }
}

// Keeps I/O and CSV failures typed; everything else is a field-level format problem.
fn classify(path: &Path, err: anyhow::Error) -> ProviderError {
    let message = format!("{}: {:#}", path.display(), err);
    let err = match err.downcast::<std::io::Error>() {
        Ok(source) => return ProviderError::Io { source },
        Err(err) => err,
    };
    match err.downcast::<csv::Error>() {
        Ok(source) => ProviderError::Csv { source },
        Err(_) => ProviderError::Format(message),
    }
}

impl PriceHistoryProvider for CsvDataProvider {
    fn price_history(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        let dir = self.symbol_dir(symbol)?;
        let exported = dir.join(format!("{}.csv", timeframe.as_str()));

        let mut points = if exported.is_file() {
            Self::read_points(&exported)?
        } else {
            let daily_path = dir.join("daily.csv");
            if !daily_path.is_file() {
                return Err(ProviderError::EmptyHistory {
                    symbol: symbol.to_string(),
                    timeframe: timeframe.to_string(),
                });
            }
            let mut daily = Self::read_points(&daily_path)?;
            daily.sort_by_key(|p| p.date);
            tracing::debug!(symbol, %timeframe, "Aggregating daily bars");
            resample::aggregate(&daily, timeframe)
        };

        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        points.retain(|p| p.date >= from && p.date <= to);

        if points.is_empty() {
            return Err(ProviderError::EmptyHistory {
                symbol: symbol.to_string(),
                timeframe: timeframe.to_string(),
            });
        }
        Ok(points)
    }
}

impl NewsProvider for CsvDataProvider {
    fn recent_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, ProviderError> {
        let path = self.symbol_dir(symbol)?.join("news.csv");
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let mut items = QuoteCsvParser::load_news(&path).map_err(|e| classify(&path, e))?;
        items.truncate(limit);
        Ok(items)
    }
}
