// Handler for the recent price history listing
use chrono::NaiveDate;
use shared::models::TimeFrame;
use shared::utils::change_pct;

use super::load_history::cached_or_load;
use super::AnalysisService;
use crate::error::EngineError;
use crate::services::{HistoryRow, HistoryView};

pub async fn handle_history(
    service: &AnalysisService,
    symbol: &str,
    timeframe: TimeFrame,
    as_of: NaiveDate,
) -> Result<HistoryView, EngineError> {
    let settings = &service.settings;
    let data = cached_or_load(service, symbol, timeframe, settings.history_start, as_of).await?;

    // Change is taken against the bar before each listed one, so compute it over the full
    // series before keeping the tail.
    let mut rows: Vec<HistoryRow> = data
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| HistoryRow {
            point: point.clone(),
            change_pct: i
                .checked_sub(1)
                .and_then(|prev| change_pct(data.points[prev].close, point.close)),
        })
        .collect();
    let skip = rows.len().saturating_sub(settings.history_rows);
    rows.drain(..skip);

    tracing::debug!(symbol, %timeframe, shown = rows.len(), total = data.points.len(), "Prepared history view");
    Ok(HistoryView {
        symbol: symbol.to_string(),
        timeframe,
        rows,
    })
}
