// Handler for recent news lookups
use shared::models::NewsItem;

use super::AnalysisService;
use crate::error::EngineError;

pub async fn fetch_news(service: &AnalysisService, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, EngineError> {
    let provider = service.news.clone();
    let owned_symbol = symbol.to_string();
    let items = tokio::task::spawn_blocking(move || provider.recent_news(&owned_symbol, limit))
        .await
        .map_err(|e| EngineError::MarketDataError(format!("News task failed: {}", e)))??;
    Ok(items)
}

pub async fn handle_news(service: &AnalysisService, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, EngineError> {
    let items = fetch_news(service, symbol, limit).await?;
    if items.is_empty() {
        tracing::warn!(symbol, "No news found");
    }
    Ok(items)
}
