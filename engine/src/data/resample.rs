// Aggregates daily bars into weekly or monthly bars
use chrono::{Datelike, NaiveDate};
use shared::models::{PricePoint, TimeFrame};

fn bucket(date: NaiveDate, timeframe: TimeFrame) -> (i32, u32) {
    match timeframe {
        TimeFrame::Daily => (date.year(), date.ordinal()),
        TimeFrame::Weekly => {
            let week = date.iso_week();
            (week.year(), week.week())
        }
        TimeFrame::Monthly => (date.year(), date.month()),
    }
}

/// Input must be sorted by date. Each output bar is dated on the last trading day of its
/// bucket: first open, last close, highest high, lowest low, summed volume and turnover.
pub fn aggregate(daily: &[PricePoint], timeframe: TimeFrame) -> Vec<PricePoint> {
    if timeframe == TimeFrame::Daily {
        return daily.to_vec();
    }

    let mut bars: Vec<PricePoint> = Vec::new();
    let mut current_key = None;
    for point in daily {
        let key = bucket(point.date, timeframe);
        match bars.last_mut() {
            Some(bar) if current_key == Some(key) => {
                bar.date = point.date;
                bar.close = point.close;
                bar.high = bar.high.max(point.high);
                bar.low = bar.low.min(point.low);
                bar.volume += point.volume;
                bar.turnover += point.turnover;
            }
            _ => {
                bars.push(point.clone());
                current_key = Some(key);
            }
        }
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32, open: f64, close: f64, high: f64, low: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open,
            close,
            high,
            low,
            volume: 100,
            turnover: 1_000.0,
        }
    }

    #[test]
    fn test_weekly_bars() {
        // 2024-06-03 is a Monday; 2024-06-10 starts the next ISO week
        let daily = vec![
            day(2024, 6, 3, 10.0, 10.5, 10.8, 9.9),
            day(2024, 6, 4, 10.5, 11.0, 11.2, 10.4),
            day(2024, 6, 7, 11.0, 10.7, 11.5, 10.6),
            day(2024, 6, 10, 10.7, 10.9, 11.0, 10.5),
        ];
        let weekly = aggregate(&daily, TimeFrame::Weekly);
        assert_eq!(weekly.len(), 2);
        let first = &weekly[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
        assert_eq!((first.open, first.close, first.high, first.low), (10.0, 10.7, 11.5, 9.9));
        assert_eq!(first.volume, 300);
        assert_eq!(first.turnover, 3_000.0);
        assert_eq!(weekly[1], daily[3]);
    }

    #[test]
    fn test_monthly_bars_cross_year() {
        let daily = vec![
            day(2023, 12, 28, 5.0, 5.1, 5.2, 4.9),
            day(2023, 12, 29, 5.1, 5.3, 5.4, 5.0),
            day(2024, 1, 2, 5.3, 5.2, 5.5, 5.1),
        ];
        let monthly = aggregate(&daily, TimeFrame::Monthly);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].close, 5.3);
        assert_eq!(monthly[0].date, NaiveDate::from_ymd_opt(2023, 12, 29).unwrap());
        assert_eq!(monthly[1].open, 5.3);
    }

    #[test]
    fn test_daily_is_identity() {
        let daily = vec![day(2024, 1, 2, 1.0, 1.0, 1.0, 1.0)];
        assert_eq!(aggregate(&daily, TimeFrame::Daily), daily);
        assert!(aggregate(&[], TimeFrame::Weekly).is_empty());
    }
}
