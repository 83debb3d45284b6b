use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chart_shell::{
    config::{AppConfig, load_config_path},
    session::ChartSession,
    settings::{FileStore, load_settings},
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use kline_mock::{
    generator::{generate_depth, generate_trades},
    io::{CsvFileSink, DataSink},
    models::{interval::Interval, period::ChartPeriod},
    providers::{BarsRequest, DataProvider, mock::MockProvider},
    stats::{TrailingWindow, market_stats, window_stats},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Mock K-line chart shell")]
struct Cli {
    /// Path to the config file (chart_shell.toml). Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pins the generator seed, overriding config and environment.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a series and print a summary, optionally exporting it as CSV
    Generate {
        /// Toolbar period (1m, 5m, 15m, 30m, 1h, 4h, 1d, 1w)
        #[arg(long, conflicts_with_all = ["days", "interval"])]
        period: Option<ChartPeriod>,

        /// Duration in days, used with --interval
        #[arg(long, requires = "interval")]
        days: Option<f64>,

        /// Bar interval (1m, 5m, 15m, 30m, 1h, 4h, 1d), used with --days
        #[arg(long, requires = "days")]
        interval: Option<Interval>,

        /// Directory to write kline_data.csv into
        #[arg(long, value_name = "DIR")]
        csv: Option<PathBuf>,
    },

    /// Print market stats and a trailing window at a reference time
    Stats {
        #[arg(long, default_value = "1h")]
        period: ChartPeriod,

        /// Reference timestamp (ms). Defaults to the latest bar.
        #[arg(long)]
        at: Option<i64>,
    },

    /// Print a mock order book around a price
    Depth {
        #[arg(long)]
        price: Option<f64>,
    },

    /// Print mock recent trades around a price
    Trades {
        #[arg(long)]
        price: Option<f64>,

        #[arg(long, default_value = "20")]
        count: usize,
    },

    /// Print the stored chart settings
    Settings,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut cfg = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => {
            let cfg = AppConfig::from_env_defaults()?;
            cfg.validate()?;
            cfg
        }
    };
    if let Some(seed) = cli.seed {
        cfg.generator.seed = Some(seed);
    }
    Ok(cfg)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    match cli.command {
        Commands::Generate {
            period,
            days,
            interval,
            csv,
        } => {
            let request = match (period, days, interval) {
                (Some(period), _, _) => BarsRequest::from(period),
                (None, Some(duration_days), Some(interval)) => BarsRequest {
                    duration_days,
                    interval,
                    respace_ms: None,
                },
                _ => BarsRequest::from(cfg.session.initial_period),
            };
            let provider = MockProvider::new(cfg.generator.clone());
            let series = provider.fetch_bars(request).await?;

            println!(
                "{} {}: {} bars",
                series.symbol,
                series.interval,
                series.len()
            );
            if let (Some(first), Some(last)) = (series.bars.first(), series.latest()) {
                println!("from {} to {}", first.timestamp, last.timestamp);
            }
            if let Some(stats) = market_stats(&series) {
                print_json(&stats)?;
            }

            if let Some(dir) = csv {
                let path = CsvFileSink::new(dir).write(&series).await?;
                info!(path = %path.display(), "CSV written");
            }
        }
        Commands::Stats { period, at } => {
            let mut session = ChartSession::new(&cfg, Default::default())?;
            session.select_period(period)?;
            let series = session.series();
            let Some(latest) = series.latest() else {
                bail!("{period} produced an empty series");
            };
            let reference = at.unwrap_or(latest.timestamp);

            if let Some(stats) = session.market_stats() {
                print_json(&stats)?;
            }
            for window in [TrailingWindow::Hour, TrailingWindow::Day, TrailingWindow::Week] {
                match window_stats(series, reference, window.minutes()) {
                    Some(stats) => println!(
                        "{:>3} @ {reference}: high {:.2} low {:.2} volume {}",
                        window.label(),
                        stats.max,
                        stats.min,
                        stats.volume
                    ),
                    None => println!("{:>3} @ {reference}: no data", window.label()),
                }
            }
        }
        Commands::Depth { price } => {
            let price = price.unwrap_or(cfg.generator.start_price);
            let depth = generate_depth(price, &mut cfg.generator.rng());
            print_json(&depth)?;
        }
        Commands::Trades { price, count } => {
            let price = price.unwrap_or(cfg.generator.start_price);
            let trades = generate_trades(price, count, Utc::now(), &mut cfg.generator.rng());
            print_json(&trades)?;
        }
        Commands::Settings => {
            let store = FileStore::new(&cfg.settings.path);
            let settings = load_settings(&store);
            print_json(&settings)
                .with_context(|| format!("render settings from {}", store.path().display()))?;
        }
    }

    Ok(())
}
