//! Paper-trading entry point
//!
//! Replays a seeded random-walk minute feed through the strategy engine and
//! prints the orders the session produced. Live connectivity plugs in behind
//! the same gateway trait.

use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sweep_fade::engine::{Engine, Event};
use sweep_fade::execution::PaperGateway;
use sweep_fade::strategy::Trader;
use sweep_fade::types::Bar;
use sweep_fade::StrategyConfig;

#[derive(Parser, Debug)]
#[command(name = "sweep-fade", about = "Session sweep-and-fade strategy, paper mode")]
struct Args {
    /// Path to a JSON strategy config (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulated trading days
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Seed for the synthetic price walk
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Starting account equity
    #[arg(long, default_value_t = 100_000.0)]
    equity: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sweep_fade=info")),
        )
        .init();

    let config = match &args.config {
        Some(path) => StrategyConfig::from_file(path)?,
        None => StrategyConfig::default(),
    };
    info!(
        "starting paper run: {} days on {} (seed {})",
        args.days, config.symbol, args.seed
    );

    let symbol = config.symbol.clone();
    let gateway = PaperGateway::new(args.equity);
    let trader = Trader::new(config, gateway);
    let engine = Engine::new(trader);

    let (tx, rx) = mpsc::channel(1024);
    let feed = tokio::spawn(synthetic_feed(tx, symbol, args.days, args.seed));

    let trader = engine.run(rx).await;
    feed.await?;

    let orders = trader.gateway().orders();
    info!("paper run complete: {} orders submitted", orders.len());
    for order in orders {
        println!(
            "{} {:?} {:+.2} stop={:?} limit={:?}",
            order.symbol, order.order_type, order.quantity, order.stop_price, order.limit_price
        );
    }
    Ok(())
}

/// Seeded random-walk minute bars, one daily reset per simulated day
async fn synthetic_feed(tx: mpsc::Sender<Event>, symbol: String, days: u32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price: f64 = 1.1000;
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for day in 0..days {
        if tx.send(Event::DailyReset).await.is_err() {
            return;
        }
        for minute in 0..(24 * 60) {
            let open = price;
            price += rng.gen_range(-0.0004..0.0004);
            let close = price;
            let high = open.max(close) + rng.gen_range(0.0..0.0002);
            let low = open.min(close) - rng.gen_range(0.0..0.0002);
            let bar = Bar {
                symbol: symbol.clone(),
                timestamp: start + Duration::days(day as i64) + Duration::minutes(minute as i64),
                open,
                high,
                low,
                close,
            };
            if tx.send(Event::Tick(bar)).await.is_err() {
                return;
            }
        }
    }
}
