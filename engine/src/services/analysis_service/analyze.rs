// Handler for the technical analysis of one symbol
use chrono::{Months, NaiveDate};
use shared::models::TimeFrame;

use super::load_history::cached_or_load;
use super::news::fetch_news;
use super::AnalysisService;
use crate::error::EngineError;
use crate::indicators::IndicatorEngine;
use crate::services::AnalysisReport;
use crate::signals::evaluate_series;

pub async fn handle_analyze(
    service: &AnalysisService,
    symbol: &str,
    as_of: NaiveDate,
) -> Result<AnalysisReport, EngineError> {
    let settings = &service.settings;
    let from = as_of
        .checked_sub_months(Months::new(settings.lookback_months))
        .ok_or_else(|| EngineError::ConfigError(format!("lookback of {} months is out of range", settings.lookback_months)))?;

    let history = cached_or_load(service, symbol, TimeFrame::Daily, from, as_of).await?;
    if history.points.len() < 60 {
        tracing::warn!(symbol, points = history.points.len(), "Short history, MA60 will be undefined");
    }

    let rows = IndicatorEngine::new(settings.rsi_zero_loss).compute(&history.points)?;
    let signal = evaluate_series(&rows)?;
    tracing::info!(
        symbol,
        date = %signal.date,
        trend = %signal.trend,
        crossover = %signal.crossover,
        score = signal.score,
        "Technical analysis complete"
    );

    // News is informational: a failing feed must not sink the analysis.
    let news = match fetch_news(service, symbol, settings.news_limit).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(symbol, error = %e, "News unavailable for report");
            Vec::new()
        }
    };

    Ok(AnalysisReport {
        symbol: symbol.to_string(),
        as_of,
        rows,
        signal,
        news,
    })
}
