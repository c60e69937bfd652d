// Handler for loading a price history through the provider into the cache
use chrono::NaiveDate;
use shared::models::{MarketData, TimeFrame};

use super::AnalysisService;
use crate::error::EngineError;

pub async fn handle_load_history(
    service: &AnalysisService,
    symbol: &str,
    timeframe: TimeFrame,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<MarketData, EngineError> {
    if from > to {
        return Err(EngineError::MarketDataError(format!(
            "Invalid range for '{}': {} is after {}",
            symbol, from, to
        )));
    }

    let provider = service.prices.clone();
    let owned_symbol = symbol.to_string();
    // CSV reads are blocking file I/O
    let fetched = tokio::task::spawn_blocking(move || provider.price_history(&owned_symbol, timeframe, from, to))
        .await
        .map_err(|e| EngineError::MarketDataError(format!("Price history task failed: {}", e)))?;

    let points = match fetched {
        Ok(points) => points,
        Err(e) => {
            tracing::warn!(symbol, %timeframe, error = %e, "Price history provider failed");
            return Err(e.into());
        }
    };

    let mut store = service.market_data_store.write().await;
    let cached = store.add_points(symbol, timeframe, points.clone());
    store.mark_loaded(symbol, timeframe, from, to);
    drop(store);

    tracing::debug!(symbol, %timeframe, loaded = points.len(), cached, "Stored price history");
    Ok(MarketData {
        symbol: symbol.to_string(),
        timeframe,
        points,
    })
}

/// Cached points for `[from, to]` when the cache spans the range, otherwise a provider fetch.
pub async fn cached_or_load(
    service: &AnalysisService,
    symbol: &str,
    timeframe: TimeFrame,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<MarketData, EngineError> {
    let store = service.market_data_store.read().await;
    let cached = if store.covers(symbol, timeframe, from, to) {
        store.get_points(symbol, timeframe, Some(from), Some(to))
    } else {
        None
    };
    drop(store);

    match cached {
        Some(points) if !points.is_empty() => {
            tracing::debug!(symbol, %timeframe, count = points.len(), "Serving price history from cache");
            Ok(MarketData { symbol: symbol.to_string(), timeframe, points })
        }
        _ => handle_load_history(service, symbol, timeframe, from, to).await,
    }
}
