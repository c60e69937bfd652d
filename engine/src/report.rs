// Plain-text rendering of analysis results for the binary
use std::fmt::Write;

use shared::models::{MomentumZone, NewsItem, NewsTone};
use shared::utils::{format_decimal, format_magnitude, news_tone};

use crate::services::{AnalysisReport, HistoryView};

const DISCLAIMER: &str = "Disclaimer: This is for reference only. Not financial advice.";

fn rule(out: &mut String, title: &str) {
    let _ = writeln!(out, "==== {} ====", title);
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.chars().count()))))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Left-aligned columns sized to the widest cell, measured in chars.
fn table(out: &mut String, title: &str, headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", format_line(headers.iter().copied(), &widths));
    let _ = writeln!(out, "{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    for row in rows {
        let _ = writeln!(out, "{}", format_line(row.iter().map(String::as_str), &widths));
    }
}

fn momentum_hint(zone: MomentumZone) -> &'static str {
    match zone {
        MomentumZone::Overbought => "OVERBOUGHT (Risk of Pullback)",
        MomentumZone::Oversold => "OVERSOLD (Potential Bounce)",
        MomentumZone::Neutral => "NEUTRAL",
    }
}

pub fn render_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let signal = &report.signal;
    rule(&mut out, &format!("Technical Analysis for {} ({})", report.symbol, signal.date));

    if let Some(latest) = report.latest() {
        let rows = vec![
            vec![
                "Close Price".to_string(),
                format!("{:.2}", latest.close()),
                format!("{} (vs MA20)", signal.trend),
            ],
            vec!["MA5".to_string(), format_decimal(latest.ma5), "Support/Resistance (Short)".to_string()],
            vec!["MA20".to_string(), format_decimal(latest.ma20), "Support/Resistance (Mid)".to_string()],
            vec!["MA60".to_string(), format_decimal(latest.ma60), "Support/Resistance (Long)".to_string()],
        ];
        table(&mut out, "Trend Indicators", &["Indicator", "Value", "Signal"], &rows);

        let _ = writeln!(
            out,
            "\nRSI (14): {} -> {}",
            format_decimal(signal.momentum.rsi),
            momentum_hint(signal.momentum.zone)
        );
        let _ = writeln!(
            out,
            "MACD (12,26,9): DIF={:.2}, DEA={:.2}, MACD={:.2}",
            latest.dif, latest.dea, latest.macd
        );
        let _ = writeln!(out, "Signal: {}", signal.crossover);
    }

    rule(&mut out, "Summary");
    let _ = writeln!(out, "Technical Score: {}/4 (Simple Model)", signal.score);
    let _ = writeln!(out, "Recommendation: {}", signal.recommendation);
    let _ = writeln!(out, "{}", DISCLAIMER);

    if !report.news.is_empty() {
        out.push('\n');
        out.push_str(&render_news(&report.symbol, &report.news));
    }
    out
}

pub fn render_history(view: &HistoryView) -> String {
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            let p = &row.point;
            vec![
                p.date.to_string(),
                format!("{:.2}", p.open),
                format!("{:.2}", p.close),
                format!("{:.2}", p.high),
                format!("{:.2}", p.low),
                format_magnitude(Some(p.volume as f64)),
                row.change_pct.map_or_else(|| "N/A".to_string(), |c| format!("{:+.2}", c)),
            ]
        })
        .collect();

    let mut out = String::new();
    table(
        &mut out,
        &format!("History for {} ({})", view.symbol, view.timeframe),
        &["Date", "Open", "Close", "High", "Low", "Volume", "Change %"],
        &rows,
    );
    out
}

pub fn render_news(symbol: &str, items: &[NewsItem]) -> String {
    if items.is_empty() {
        return format!("No news found for {}.\n", symbol);
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let marker = match news_tone(&item.headline) {
                NewsTone::Positive => "+",
                NewsTone::Negative => "-",
                NewsTone::Neutral => " ",
            };
            vec![
                item.published_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                marker.to_string(),
                item.headline.clone(),
            ]
        })
        .collect();

    let mut out = String::new();
    table(&mut out, &format!("Recent News for {}", symbol), &["Date", "Tone", "Title"], &rows);
    out
}
