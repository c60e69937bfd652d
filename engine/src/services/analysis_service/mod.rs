// engine/src/services/analysis_service/mod.rs
// AnalysisService owns the market data cache and the providers; each operation is
// implemented by a handler in a sibling module.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::{MarketData, NewsItem, TimeFrame};
use tokio::sync::RwLock;

use super::{AnalysisReport, HistoryView};
use crate::config::EngineSettings;
use crate::data::market_data::MarketDataStore;
use crate::data::provider::{NewsProvider, PriceHistoryProvider};
use crate::error::EngineError;

pub mod analyze;
pub mod history;
pub mod load_history;
pub mod news;

pub struct AnalysisService {
    market_data_store: Arc<RwLock<MarketDataStore>>,
    prices: Arc<dyn PriceHistoryProvider>,
    news: Arc<dyn NewsProvider>,
    settings: EngineSettings,
}

impl AnalysisService {
    pub fn new(
        market_data_store: Arc<RwLock<MarketDataStore>>,
        prices: Arc<dyn PriceHistoryProvider>,
        news: Arc<dyn NewsProvider>,
        settings: EngineSettings,
    ) -> Self {
        AnalysisService { market_data_store, prices, news, settings }
    }

    pub async fn load_history(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<MarketData, EngineError> {
        tracing::info!(symbol, %timeframe, %from, %to, "Received load history request, dispatching to handler.");
        load_history::handle_load_history(self, symbol, timeframe, from, to).await
    }

    pub async fn history(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        as_of: NaiveDate,
    ) -> Result<HistoryView, EngineError> {
        tracing::info!(symbol, %timeframe, %as_of, "Received history request, dispatching to handler.");
        history::handle_history(self, symbol, timeframe, as_of).await
    }

    pub async fn analyze(&self, symbol: &str, as_of: NaiveDate) -> Result<AnalysisReport, EngineError> {
        tracing::info!(symbol, %as_of, lookback_months = self.settings.lookback_months, "Received analyze request, dispatching to handler.");
        analyze::handle_analyze(self, symbol, as_of).await
    }

    pub async fn news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, EngineError> {
        tracing::info!(symbol, limit, "Received news request, dispatching to handler.");
        news::handle_news(self, symbol, limit).await
    }
}
