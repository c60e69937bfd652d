use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One trading period of a price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub turnover: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub points: Vec<PricePoint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Daily,
    Weekly,
    Monthly,
}

impl TimeFrame {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Daily => "daily",
            TimeFrame::Weekly => "weekly",
            TimeFrame::Monthly => "monthly",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(TimeFrame::Daily),
            "weekly" | "week" | "w" => Ok(TimeFrame::Weekly),
            "monthly" | "month" | "m" => Ok(TimeFrame::Monthly),
            other => Err(format!("unknown timeframe '{}', expected daily, weekly or monthly", other)),
        }
    }
}

/// A price point augmented with the indicator values computed up to and including it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    #[serde(flatten)]
    pub point: PricePoint,
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub rsi14: Option<f64>,
    pub dif: f64,
    pub dea: f64,
    pub macd: f64,
}

impl IndicatorRow {
    pub fn date(&self) -> NaiveDate {
        self.point.date
    }

    pub fn close(&self) -> f64 {
        self.point.close
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => f.write_str("BULLISH"),
            Trend::Bearish => f.write_str("BEARISH"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MomentumZone {
    Overbought,
    Oversold,
    Neutral,
}

impl fmt::Display for MomentumZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MomentumZone::Overbought => f.write_str("OVERBOUGHT"),
            MomentumZone::Oversold => f.write_str("OVERSOLD"),
            MomentumZone::Neutral => f.write_str("NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    pub zone: MomentumZone,
    pub rsi: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Crossover {
    GoldenCross,
    DeathCross,
    BullishMomentum,
    BearishMomentum,
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crossover::GoldenCross => f.write_str("GOLDEN_CROSS"),
            Crossover::DeathCross => f.write_str("DEATH_CROSS"),
            Crossover::BullishMomentum => f.write_str("BULLISH_MOMENTUM"),
            Crossover::BearishMomentum => f.write_str("BEARISH_MOMENTUM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// Maps an aggregate technical score onto a recommendation.
    pub fn from_score(score: i32) -> Self {
        if score >= 3 {
            Recommendation::Buy
        } else if score <= 0 {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Buy => f.write_str("BUY / ACCUMULATE"),
            Recommendation::Sell => f.write_str("SELL / AVOID"),
            Recommendation::Hold => f.write_str("HOLD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub date: NaiveDate,
    pub trend: Trend,
    pub momentum: Momentum,
    pub crossover: Crossover,
    pub score: i32,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub published_at: NaiveDateTime,
    pub headline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsTone {
    Positive,
    Negative,
    Neutral,
}
