//! Trade Simulator - Main Entry Point
//!
//! Runs one what-if trade simulation and prints the result panel.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trade_simulator::common::channels::SessionStatus;
use trade_simulator::config::load_config;
use trade_simulator::{
    MarketDataClient, SimulationSession, TradeRequest, TradeResult, TradeSimulator,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Stock symbol, e.g. INFY or TCS.BO
    #[arg(short, long)]
    symbol: String,

    /// Buy date (YYYY-MM-DD)
    #[arg(long)]
    buy_date: NaiveDate,

    /// Sell date (YYYY-MM-DD)
    #[arg(long)]
    sell_date: NaiveDate,

    /// Number of shares
    #[arg(short, long)]
    quantity: u32,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the result as JSON instead of the panel
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting trade simulator");
    info!("Configuration file: {}", args.config);

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config))?;
    let client = MarketDataClient::new(&config)?;
    let simulator = TradeSimulator::from_client(client, &config);
    let session = SimulationSession::new(Arc::new(simulator));

    let request = TradeRequest::new(args.symbol, args.buy_date, args.sell_date, args.quantity)?;
    if session.submit(request).is_none() {
        bail!("submission was rejected");
    }

    match session.settled().await.status {
        SessionStatus::Ready(result) if args.json => {
            println!("{}", serde_json::to_string_pretty(result.as_ref())?);
        }
        SessionStatus::Ready(result) => print!("{}", render_panel(&result)),
        SessionStatus::Failed(message) => {
            println!("Sorry, {}", message);
            std::process::exit(1);
        }
        SessionStatus::Idle | SessionStatus::Loading => bail!("simulation did not complete"),
    }

    Ok(())
}

/// Whole-rupee amount with sign
fn rupees(amount: f64) -> String {
    // `+ 0.0` turns a negative zero into zero
    let rounded = amount.round() + 0.0;
    if rounded < 0.0 {
        format!("-₹{}", -rounded)
    } else {
        format!("₹{}", rounded)
    }
}

/// Share price to two decimals
fn share_price(price: f64) -> String {
    format!("₹{:.2}", price)
}

fn render_panel(result: &TradeResult) -> String {
    let outcome = result.outcome.rounded();
    let mut lines = vec![
        format!("{} ({} days held)", result.symbol, outcome.holding_days),
        format!("Buy price:        {}", share_price(result.buy_price)),
        format!("Sell price:       {}", share_price(result.sell_price)),
        format!("Gross P&L:        {}", rupees(outcome.gross)),
        format!("Tax ({}):       {}", outcome.regime, rupees(outcome.tax)),
        format!("Net P&L:          {}", rupees(outcome.net)),
        format!("Dividends:        {}", rupees(result.total_dividends.get())),
        format!("Net total:        {}", rupees(result.net_total)),
        format!("Absolute return:  {:.2}%", result.absolute_return_pct),
        format!("CAGR:             {:.2}%", result.cagr * 100.0),
        format!(
            "Buffett verdict:  {}",
            if result.beat_benchmark_cagr {
                "beat the benchmark"
            } else {
                "did not beat the benchmark"
            }
        ),
        format!("Volatility:       {}", result.volatility),
        format!("Market mood:      {}", result.market_mood.get()),
        format!("Personality:      {}", result.personality),
    ];

    for reward in &result.rewards {
        lines.push(format!("That's {} {}", reward.units, reward.reward));
    }
    if let Some(reason) = result.total_dividends.reason() {
        lines.push(format!("(dividends unavailable: {})", reason));
    }
    if let Some(reason) = result.market_mood.reason() {
        lines.push(format!("(market mood unavailable: {})", reason));
    }

    lines.join("\n") + "\n"
}
