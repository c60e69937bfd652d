use shared::models::{
    Crossover, IndicatorRow, Momentum, MomentumZone, Recommendation, SignalResult, Trend,
};

use crate::error::EngineError;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

// Undefined indicator values never satisfy a comparison.
fn above(value: f64, reference: Option<f64>) -> bool {
    reference.is_some_and(|r| value > r)
}

fn rsi_above(rsi: Option<f64>, threshold: f64) -> bool {
    rsi.is_some_and(|v| v > threshold)
}

fn rsi_below(rsi: Option<f64>, threshold: f64) -> bool {
    rsi.is_some_and(|v| v < threshold)
}

/// BULLISH only when the close is strictly above MA20.
pub fn classify_trend(row: &IndicatorRow) -> Trend {
    if above(row.close(), row.ma20) {
        Trend::Bullish
    } else {
        Trend::Bearish
    }
}

pub fn classify_momentum(row: &IndicatorRow) -> Momentum {
    let zone = if rsi_above(row.rsi14, RSI_OVERBOUGHT) {
        MomentumZone::Overbought
    } else if rsi_below(row.rsi14, RSI_OVERSOLD) {
        MomentumZone::Oversold
    } else {
        MomentumZone::Neutral
    };
    Momentum { zone, rsi: row.rsi14 }
}

/// Crosses take precedence over the plain DIF/DEA ordering.
pub fn classify_crossover(latest: &IndicatorRow, previous: &IndicatorRow) -> Crossover {
    if latest.dif > latest.dea && previous.dif <= previous.dea {
        Crossover::GoldenCross
    } else if latest.dif < latest.dea && previous.dif >= previous.dea {
        Crossover::DeathCross
    } else if latest.dif > latest.dea {
        Crossover::BullishMomentum
    } else {
        Crossover::BearishMomentum
    }
}

/// Additive technical score of a single row, in -1..=4.
pub fn score(row: &IndicatorRow) -> i32 {
    let mut score = 0;
    if above(row.close(), row.ma20) {
        score += 1;
    }
    if above(row.close(), row.ma60) {
        score += 1;
    }
    if rsi_below(row.rsi14, RSI_OVERSOLD) {
        score += 1;
    }
    if rsi_above(row.rsi14, RSI_OVERBOUGHT) {
        score -= 1;
    }
    if row.dif > row.dea {
        score += 1;
    }
    score
}

pub fn evaluate(latest: &IndicatorRow, previous: &IndicatorRow) -> SignalResult {
    let score = score(latest);
    SignalResult {
        date: latest.date(),
        trend: classify_trend(latest),
        momentum: classify_momentum(latest),
        crossover: classify_crossover(latest, previous),
        score,
        recommendation: Recommendation::from_score(score),
    }
}

/// Evaluates the last two rows of `rows`.
pub fn evaluate_series(rows: &[IndicatorRow]) -> Result<SignalResult, EngineError> {
    match rows {
        [.., previous, latest] => Ok(evaluate(latest, previous)),
        _ => Err(EngineError::InsufficientHistory { available: rows.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::PricePoint;

    fn row(close: f64, ma20: Option<f64>, ma60: Option<f64>, rsi14: Option<f64>, dif: f64, dea: f64) -> IndicatorRow {
        IndicatorRow {
            point: PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                open: close,
                close,
                high: close,
                low: close,
                volume: 0,
                turnover: 0.0,
            },
            ma5: None,
            ma20,
            ma60,
            rsi14,
            dif,
            dea,
            macd: 2.0 * (dif - dea),
        }
    }

    fn macd_row(dif: f64, dea: f64) -> IndicatorRow {
        row(100.0, Some(100.0), Some(100.0), Some(50.0), dif, dea)
    }

    #[test]
    fn golden_cross_wins_over_bullish_momentum() {
        let latest = macd_row(1.0, 0.5);
        let previous = macd_row(0.2, 0.5);
        assert_eq!(classify_crossover(&latest, &previous), Crossover::GoldenCross);
    }

    #[test]
    fn golden_cross_from_equality() {
        assert_eq!(classify_crossover(&macd_row(1.0, 0.5), &macd_row(0.5, 0.5)), Crossover::GoldenCross);
    }

    #[test]
    fn death_cross_and_momentum_states() {
        assert_eq!(classify_crossover(&macd_row(0.2, 0.5), &macd_row(1.0, 0.5)), Crossover::DeathCross);
        assert_eq!(classify_crossover(&macd_row(0.2, 0.5), &macd_row(0.5, 0.5)), Crossover::DeathCross);
        assert_eq!(classify_crossover(&macd_row(1.0, 0.5), &macd_row(0.9, 0.5)), Crossover::BullishMomentum);
        assert_eq!(classify_crossover(&macd_row(0.2, 0.5), &macd_row(0.1, 0.5)), Crossover::BearishMomentum);
        // Equal lines on both rows are neither a cross nor bullish
        assert_eq!(classify_crossover(&macd_row(0.5, 0.5), &macd_row(0.5, 0.5)), Crossover::BearishMomentum);
    }

    #[test]
    fn trend_ties_are_bearish() {
        assert_eq!(classify_trend(&row(100.0, Some(100.0), None, None, 0.0, 0.0)), Trend::Bearish);
        assert_eq!(classify_trend(&row(100.01, Some(100.0), None, None, 0.0, 0.0)), Trend::Bullish);
        assert_eq!(classify_trend(&row(100.0, None, None, None, 0.0, 0.0)), Trend::Bearish);
    }

    #[test]
    fn rsi_thresholds_are_strict() {
        let at = |rsi| classify_momentum(&row(1.0, None, None, rsi, 0.0, 0.0)).zone;
        assert_eq!(at(Some(70.0)), MomentumZone::Neutral);
        assert_eq!(at(Some(30.0)), MomentumZone::Neutral);
        assert_eq!(at(Some(70.1)), MomentumZone::Overbought);
        assert_eq!(at(Some(29.9)), MomentumZone::Oversold);
        assert_eq!(at(None), MomentumZone::Neutral);
    }

    #[test]
    fn bullish_row_scores_four() {
        let latest = row(105.0, Some(100.0), Some(90.0), Some(25.0), 1.0, 0.5);
        let result = evaluate(&latest, &latest.clone());
        assert_eq!(result.score, 4);
        assert_eq!(result.recommendation, Recommendation::Buy);
        assert_eq!(result.momentum, Momentum { zone: MomentumZone::Oversold, rsi: Some(25.0) });
        assert_eq!(result.trend, Trend::Bullish);
    }

    #[test]
    fn bearish_row_scores_minus_one() {
        let latest = row(95.0, Some(100.0), Some(110.0), Some(75.0), 0.2, 0.5);
        let result = evaluate(&latest, &latest.clone());
        assert_eq!(result.score, -1);
        assert_eq!(result.recommendation, Recommendation::Sell);
        assert_eq!(result.momentum.zone, MomentumZone::Overbought);
    }

    #[test]
    fn middle_scores_hold() {
        let latest = row(105.0, Some(100.0), Some(110.0), Some(50.0), 0.2, 0.5);
        assert_eq!(score(&latest), 1);
        assert_eq!(evaluate(&latest, &latest.clone()).recommendation, Recommendation::Hold);
    }

    #[test]
    fn crossover_transition_does_not_feed_score() {
        let latest = row(95.0, Some(100.0), Some(110.0), Some(50.0), 1.0, 0.5);
        let golden = evaluate(&latest, &macd_row(0.2, 0.5));
        let steady = evaluate(&latest, &macd_row(0.9, 0.5));
        assert_eq!(golden.crossover, Crossover::GoldenCross);
        assert_eq!(steady.crossover, Crossover::BullishMomentum);
        assert_eq!(golden.score, steady.score);
    }

    #[test]
    fn series_needs_two_rows() {
        let only = vec![macd_row(0.0, 0.0)];
        assert!(matches!(evaluate_series(&only), Err(EngineError::InsufficientHistory { available: 1 })));
        assert!(matches!(evaluate_series(&[]), Err(EngineError::InsufficientHistory { available: 0 })));

        let rows = vec![macd_row(0.2, 0.5), macd_row(1.0, 0.5)];
        assert_eq!(evaluate_series(&rows).unwrap().crossover, Crossover::GoldenCross);
    }
}
