// Async service layer between the data providers and the indicator/signal core
pub mod analysis_service;

pub use analysis_service::AnalysisService;

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{IndicatorRow, NewsItem, PricePoint, SignalResult, TimeFrame};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub as_of: NaiveDate,
    pub rows: Vec<IndicatorRow>,
    pub signal: SignalResult,
    pub news: Vec<NewsItem>,
}

impl AnalysisReport {
    /// The row the signal was evaluated on.
    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    #[serde(flatten)]
    pub point: PricePoint,
    /// Change against the previous bar's close; `None` for the first bar on record.
    pub change_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub rows: Vec<HistoryRow>,
}
