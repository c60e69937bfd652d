use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::{NewsItem, PricePoint};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Number and date formats of the quote exports (plain decimals, ISO dates)
pub mod quote_format {
    use anyhow::{anyhow, Result};
    use chrono::{NaiveDate, NaiveDateTime};

    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim().replace(',', "");
        normalized
            .parse::<f64>()
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    // Volumes are whole shares/lots but some exports write them as "1234.0".
    pub fn parse_volume(s: &str) -> Result<u64> {
        let trimmed = s.trim();
        if let Ok(v) = trimmed.parse::<u64>() {
            return Ok(v);
        }
        let value = parse_decimal(trimmed)?;
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
            Ok(value as u64)
        } else {
            Err(anyhow!("Volume '{}' is not a non-negative whole number", s))
        }
    }

    // "2024-06-03", also accepting the compact "20240603"
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y%m%d"))
            .map_err(|e| anyhow!("Failed to parse date '{}': {}", s, e))
    }

    pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
        let trimmed = s.trim();
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
            .map_err(|e| anyhow!("Failed to parse datetime '{}': {}", s, e))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{Datelike, Timelike};

        #[test]
        fn test_parse_decimal() {
            assert_eq!(parse_decimal("12.34").unwrap(), 12.34);
            assert_eq!(parse_decimal(" 1,234.5 ").unwrap(), 1234.5);
            assert!(parse_decimal("abc").is_err());
        }

        #[test]
        fn test_parse_volume() {
            assert_eq!(parse_volume("125400").unwrap(), 125400);
            assert_eq!(parse_volume("125400.0").unwrap(), 125400);
            assert!(parse_volume("12.5").is_err());
            assert!(parse_volume("-3").is_err());
        }

        #[test]
        fn test_parse_date_formats() {
            let d = parse_date("2024-06-03").unwrap();
            assert_eq!((d.year(), d.month(), d.day()), (2024, 6, 3));
            assert_eq!(parse_date("20240603").unwrap(), d);
            assert!(parse_date("03/06/2024").is_err());
        }

        #[test]
        fn test_parse_datetime() {
            let dt = parse_datetime("2024-06-03 14:22:10").unwrap();
            assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 22, 10));
            assert_eq!(parse_datetime("2024-06-03 14:22").unwrap().second(), 0);
            assert!(parse_datetime("2024-06-03").is_err());
        }
    }
}

pub struct QuoteCsvParser;

impl QuoteCsvParser {
    // CSV Header: 日期,开盘,收盘,最高,最低,成交量,成交额[,振幅,涨跌幅,...]
    // Example Row: 2024-06-03,10.50,10.62,10.70,10.41,125400,132800000.00
    pub fn load_price_history(file_path: &Path) -> Result<Vec<PricePoint>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open CSV file '{}'", file_path.display()))?;
        Self::read_price_history(BufReader::new(file))
    }

    pub fn read_price_history<R: Read>(reader: R) -> Result<Vec<PricePoint>> {
        let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let mut points = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.with_context(|| format!("Error reading CSV record at line {}", line))?;
            let date = quote_format::parse_date(Self::required(&record, &headers, "日期", line)?)
                .map_err(|e| anyhow!("Error parsing '日期' at line {}: {}", line, e))?;
            let volume = quote_format::parse_volume(Self::required(&record, &headers, "成交量", line)?)
                .map_err(|e| anyhow!("Error parsing '成交量' at line {}: {}", line, e))?;
            let turnover = quote_format::parse_decimal(Self::required(&record, &headers, "成交额", line)?)
                .map_err(|e| anyhow!("Error parsing '成交额' at line {}: {}", line, e))?;
            if turnover < 0.0 {
                bail!("Negative '成交额' {} at line {}", turnover, line);
            }

            points.push(PricePoint {
                date,
                open: Self::price(&record, &headers, "开盘", line)?,
                close: Self::price(&record, &headers, "收盘", line)?,
                high: Self::price(&record, &headers, "最高", line)?,
                low: Self::price(&record, &headers, "最低", line)?,
                volume,
                turnover,
            });
        }
        Ok(points)
    }

    // CSV Header: 发布时间,新闻标题[,关键词,新闻内容,文章来源,新闻链接]
    pub fn load_news(file_path: &Path) -> Result<Vec<NewsItem>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open CSV file '{}'", file_path.display()))?;
        Self::read_news(BufReader::new(file))
    }

    pub fn read_news<R: Read>(reader: R) -> Result<Vec<NewsItem>> {
        let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let mut items = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.with_context(|| format!("Error reading CSV record at line {}", line))?;
            let published = Self::required(&record, &headers, "发布时间", line)?;
            let headline = Self::required(&record, &headers, "新闻标题", line)?;

            items.push(NewsItem {
                published_at: quote_format::parse_datetime(published)
                    .map_err(|e| anyhow!("Error parsing '发布时间' at line {}: {}", line, e))?,
                headline: headline.to_string(),
            });
        }
        Ok(items)
    }

    fn required<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str> {
        Self::get_field(record, headers, name)
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    fn price(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<f64> {
        let value = quote_format::parse_decimal(Self::required(record, headers, name, line)?)
            .map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", name, line, e))?;
        if !(value.is_finite() && value > 0.0) {
            bail!("Non-positive '{}' price {} at line {}", name, value, line);
        }
        Ok(value)
    }

    // Looks a field up by header name so column order does not matter.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}') == name)
            .and_then(|pos| record.get(pos))
    }
}
