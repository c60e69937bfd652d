// In-memory cache of price histories, keyed by symbol and timeframe
use chrono::NaiveDate;
use shared::models::{PricePoint, TimeFrame};
use std::collections::HashMap;

pub struct MarketDataStore {
    data: HashMap<String, HashMap<TimeFrame, Vec<PricePoint>>>,
    // Inclusive date ranges fetched from a provider, sorted and non-overlapping
    loaded: HashMap<String, HashMap<TimeFrame, Vec<(NaiveDate, NaiveDate)>>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            data: HashMap::new(),
            loaded: HashMap::new(),
        }
    }

    /// Merges `new_points` into the cached series. A date that is already cached keeps the
    /// newly supplied point.
    pub fn add_points(&mut self, symbol: &str, timeframe: TimeFrame, new_points: Vec<PricePoint>) -> usize {
        let symbol_data = self.data.entry(symbol.to_string()).or_default();
        let series = symbol_data.entry(timeframe).or_default();

        let mut merged = new_points;
        merged.append(series);
        // Stable sort keeps the incoming point first among equal dates; dedup keeps the first.
        merged.sort_by_key(|p| p.date);
        merged.dedup_by_key(|p| p.date);
        *series = merged;
        series.len()
    }

    pub fn get_points(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Option<Vec<PricePoint>> {
        self.data
            .get(symbol)
            .and_then(|symbol_data| symbol_data.get(&timeframe))
            .map(|points| {
                points
                    .iter()
                    .filter(|p| from.map_or(true, |start| p.date >= start))
                    .filter(|p| to.map_or(true, |end| p.date <= end))
                    .cloned()
                    .collect()
            })
    }

    /// Records that every point of `[from, to]` has been fetched. Overlapping and
    /// adjacent ranges are merged.
    pub fn mark_loaded(&mut self, symbol: &str, timeframe: TimeFrame, from: NaiveDate, to: NaiveDate) {
        let ranges = self.loaded.entry(symbol.to_string()).or_default().entry(timeframe).or_default();
        ranges.push((from, to));
        ranges.sort_by_key(|&(start, _)| start);

        let mut merged: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(ranges.len());
        for &(start, end) in ranges.iter() {
            match merged.last_mut() {
                Some(last) if last.1.succ_opt().map_or(true, |next| start <= next) => {
                    last.1 = last.1.max(end);
                }
                _ => merged.push((start, end)),
            }
        }
        *ranges = merged;
    }

    /// Whether a single loaded range contains all of `[from, to]`.
    pub fn covers(&self, symbol: &str, timeframe: TimeFrame, from: NaiveDate, to: NaiveDate) -> bool {
        self.loaded
            .get(symbol)
            .and_then(|symbol_ranges| symbol_ranges.get(&timeframe))
            .is_some_and(|ranges| ranges.iter().any(|&(start, end)| start <= from && end >= to))
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}
