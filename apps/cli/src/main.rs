mod config;
mod input;
mod quote_store;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use config::Config;
use quote_store::InMemoryQuoteStore;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use valuetrack_core::portfolio::performance::LogDiagnostics;
use valuetrack_core::quotes::QuoteHistoryResolver;
use valuetrack_core::{HistoryRequest, PortfolioHistoryService, PortfolioHistoryServiceTrait};

/// Historical portfolio value and time-weighted return from a transaction file.
#[derive(Parser, Debug)]
#[command(name = "valuetrack", version)]
struct Args {
    /// JSON array of buy/sell transactions
    #[arg(short, long)]
    transactions: PathBuf,

    /// JSON object of daily closes keyed by symbol
    #[arg(short, long)]
    prices: Option<PathBuf>,

    /// Earliest day to chart (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day to chart (YYYY-MM-DD), defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// IANA timezone for day keys, overrides VT_TIMEZONE
    #[arg(long)]
    timezone: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Output::Twr)]
    output: Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Cumulative TWR points
    Twr,
    /// Daily portfolio values
    Values,
    /// Values, cash flows, TWR and summary
    Full,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env()?;
    let args = Args::parse();

    let rendered = run(&args, &config).await?;
    println!("{}", rendered);
    Ok(())
}

fn init_tracing() {
    let log_format = std::env::var("VT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // logs go to stderr so stdout stays valid JSON
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

async fn run(args: &Args, config: &Config) -> anyhow::Result<String> {
    let mut config = config.clone();
    if let Some(timezone) = &args.timezone {
        config.timezone = Some(timezone.clone());
    }
    let settings = config.history_settings()?;

    let transactions = input::load_transactions(&args.transactions)?;
    let prices = match &args.prices {
        Some(path) => input::load_prices(path)?,
        None => Default::default(),
    };
    let store = InMemoryQuoteStore::new(prices);
    tracing::info!(
        "Loaded {} transactions and prices for {} symbols",
        transactions.len(),
        store.symbol_count()
    );

    let resolver = Arc::new(QuoteHistoryResolver::new(Arc::new(store)));
    let service =
        PortfolioHistoryService::new(settings, resolver)?.with_diagnostics(Arc::new(LogDiagnostics));

    let request = HistoryRequest {
        start_date: args.start,
        as_of: args.as_of,
        allow_live_fallback: None,
    };

    let rendered = match args.output {
        Output::Twr => {
            let points = service.calculate_twr_history(&transactions, &request).await?;
            serde_json::to_string_pretty(&points)?
        }
        Output::Values => {
            let values = service
                .calculate_value_history(&transactions, &request)
                .await?;
            serde_json::to_string_pretty(&values)?
        }
        Output::Full => {
            let history = service.calculate_history(&transactions, &request).await?;
            serde_json::to_string_pretty(&history)?
        }
    };
    Ok(rendered)
}
