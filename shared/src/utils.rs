// Formatting helpers shared by report rendering.
use crate::models::NewsTone;

const POSITIVE_KEYWORDS: [&str; 5] = ["涨", "利好", "增", "高", "红"];
const NEGATIVE_KEYWORDS: [&str; 6] = ["跌", "利空", "减", "低", "亏", "查"];

/// Formats a large quantity with Chinese magnitude units (万, 亿, 万亿).
pub fn format_magnitude(value: Option<f64>) -> String {
    let Some(num) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };
    let abs = num.abs();
    if abs >= 1e12 {
        format!("{:.2}万亿", num / 1e12)
    } else if abs >= 1e8 {
        format!("{:.2}亿", num / 1e8)
    } else if abs >= 1e4 {
        format!("{:.2}万", num / 1e4)
    } else {
        format!("{:.2}", num)
    }
}

/// Two-decimal rendering for indicator values that may not be defined yet.
pub fn format_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "N/A".to_string(),
    }
}

/// Percentage change of `close` relative to `previous_close`.
pub fn change_pct(previous_close: f64, close: f64) -> Option<f64> {
    if previous_close == 0.0 {
        return None;
    }
    Some((close - previous_close) / previous_close * 100.0)
}

/// Keyword based tone of a news headline. Positive keywords win over negative ones.
pub fn news_tone(headline: &str) -> NewsTone {
    if POSITIVE_KEYWORDS.iter().any(|k| headline.contains(k)) {
        NewsTone::Positive
    } else if NEGATIVE_KEYWORDS.iter().any(|k| headline.contains(k)) {
        NewsTone::Negative
    } else {
        NewsTone::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_magnitude_units() {
        assert_eq!(format_magnitude(Some(2.5e12)), "2.50万亿");
        assert_eq!(format_magnitude(Some(123_456_789.0)), "1.23亿");
        assert_eq!(format_magnitude(Some(56_789.0)), "5.68万");
        assert_eq!(format_magnitude(Some(999.5)), "999.50");
        assert_eq!(format_magnitude(Some(-3.0e8)), "-3.00亿");
    }

    #[test]
    fn test_format_magnitude_missing() {
        assert_eq!(format_magnitude(None), "N/A");
        assert_eq!(format_magnitude(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(Some(12.345)), "12.35");
        assert_eq!(format_decimal(None), "N/A");
    }

    #[test]
    fn test_change_pct() {
        let pct = change_pct(10.0, 11.0).unwrap();
        assert!((pct - 10.0).abs() < 1e-9);
        let pct = change_pct(20.0, 15.0).unwrap();
        assert!((pct + 25.0).abs() < 1e-9);
        assert_eq!(change_pct(0.0, 11.0), None);
    }

    #[test]
    fn test_news_tone() {
        assert_eq!(news_tone("公司业绩大涨"), NewsTone::Positive);
        assert_eq!(news_tone("股价下跌超5%"), NewsTone::Negative);
        assert_eq!(news_tone("召开股东大会"), NewsTone::Neutral);
    }
}
