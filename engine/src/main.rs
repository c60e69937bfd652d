// Engine main entry point
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::models::TimeFrame;
use tokio::sync::RwLock;
use tracing::{error, info};

use engine::config::EngineSettings;
use engine::data::market_data::MarketDataStore;
use engine::data::provider::CsvDataProvider;
use engine::logging::init_logging;
use engine::report;
use engine::services::AnalysisService;

#[derive(Parser, Debug)]
#[command(name = "ta-engine", about = "Technical analysis of daily stock price histories")]
struct Args {
    /// JSON settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the data directory from the settings
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON instead of text tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// MA/RSI/MACD analysis with a BUY/HOLD/SELL summary
    Analyze { symbol: String },
    /// Recent price bars
    History {
        symbol: String,
        #[arg(default_value = "daily")]
        period: TimeFrame,
    },
    /// Recent news headlines
    News {
        symbol: String,
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => EngineSettings::load(path).context("Failed to load settings")?,
        None => EngineSettings::default(),
    };
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }
    init_logging(settings.log_format);
    info!(data_dir = %settings.data_dir.display(), "Starting technical analysis engine");

    let provider = Arc::new(CsvDataProvider::new(settings.data_dir.clone()));
    let service = AnalysisService::new(
        Arc::new(RwLock::new(MarketDataStore::new())),
        provider.clone(),
        provider,
        settings,
    );
    let today = chrono::Local::now().date_naive();

    let output = match &args.command {
        Command::Analyze { symbol } => service.analyze(symbol, today).await.map(|r| {
            if args.json {
                serde_json::to_string_pretty(&r)
            } else {
                Ok(report::render_analysis(&r))
            }
        }),
        Command::History { symbol, period } => service.history(symbol, *period, today).await.map(|v| {
            if args.json {
                serde_json::to_string_pretty(&v)
            } else {
                Ok(report::render_history(&v))
            }
        }),
        Command::News { symbol, limit } => service.news(symbol, *limit).await.map(|items| {
            if args.json {
                serde_json::to_string_pretty(&items)
            } else {
                Ok(report::render_news(symbol, &items))
            }
        }),
    };

    match output {
        Ok(rendered) => {
            let text = rendered.context("Failed to serialize result")?;
            println!("{}", text.trim_end());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, command = ?args.command, "Command failed");
            Err(e).context("Command failed")
        }
    }
}
