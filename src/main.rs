//! Phoenix decision engine CLI.
//!
//! Runs the timed demo over synthetic signals, replays recorded signals from
//! a file, or prints the effective configuration.

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use phoenix_engine::simulation::{
    load_signals, replay_signals, DemoConfig, DemoRunner, SignalGenerator,
};
use phoenix_engine::trading::{
    DEFAULT_MAX_POSITION_FRACTION, DEFAULT_RISK_TOLERANCE, SIMULATED_GAIN, SUCCESS_THRESHOLD,
    TRADE_THRESHOLD,
};
use phoenix_engine::{DecisionEngine, EngineConfig, TradingMode};

/// Phoenix decision engine CLI.
#[derive(Parser)]
#[command(name = "phoenix")]
#[command(about = "Score market signals and turn confident ones into sized trades", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "PHOENIX_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Engine parameters shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
struct EngineArgs {
    /// Capital in USD
    #[arg(short, long, default_value = "1000", env = "PHOENIX_CAPITAL")]
    capital: Decimal,

    /// Risk tolerance (0.0 to 1.0)
    #[arg(short, long, default_value_t = DEFAULT_RISK_TOLERANCE, env = "PHOENIX_RISK_TOLERANCE")]
    risk_tolerance: f64,

    /// Max position size in USD (defaults to 10% of capital)
    #[arg(long, env = "PHOENIX_MAX_POSITION")]
    max_position: Option<Decimal>,

    /// Trading mode label (demo, live)
    #[arg(short, long, default_value = "demo", env = "PHOENIX_MODE")]
    mode: TradingMode,
}

impl EngineArgs {
    fn to_config(&self) -> Result<EngineConfig> {
        let max_position = self
            .max_position
            .unwrap_or(self.capital * DEFAULT_MAX_POSITION_FRACTION);

        Ok(EngineConfig::new(
            self.capital,
            self.risk_tolerance,
            max_position,
            self.mode,
        )?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timed demo over synthetic signals
    Demo {
        #[command(flatten)]
        engine: EngineArgs,

        /// Demo length in seconds
        #[arg(short, long, default_value = "30")]
        duration: u64,

        /// Seconds between signals
        #[arg(short, long, default_value = "2")]
        tick: u64,

        /// Seconds between metrics lines
        #[arg(long, default_value = "10")]
        metrics_interval: u64,

        /// Seed for reproducible signals
        #[arg(long, env = "PHOENIX_SEED")]
        seed: Option<u64>,

        /// Comma-separated token symbols to sample (defaults to the meme-coin set)
        #[arg(long, value_delimiter = ',', env = "PHOENIX_TOKENS")]
        tokens: Vec<String>,
    },

    /// Replay signals from a JSON array or JSON Lines file
    Replay {
        /// Path to the signal file
        file: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Demo {
            engine,
            duration,
            tick,
            metrics_interval,
            seed,
            tokens,
        } => {
            let config = engine.to_config()?;
            let generator = SignalGenerator::with_tokens(tokens, seed);
            info!(
                capital = %config.capital,
                duration = duration,
                seed = ?seed,
                tokens = ?generator.tokens(),
                "Starting demo"
            );

            let demo_config = DemoConfig {
                duration: Duration::from_secs(duration),
                tick_interval: Duration::from_secs(tick),
                metrics_interval: Duration::from_secs(metrics_interval),
            };

            let mut runner = DemoRunner::new(DecisionEngine::new(config), generator, demo_config)?;

            // Register shutdown handler
            let shutdown = runner.shutdown_signal();
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                info!("Shutdown signal received");
                shutdown.store(true, Ordering::SeqCst);
            });

            println!("Press Ctrl+C to stop.");
            let report = runner.run().await;
            println!("{}", report);
        }

        Commands::Replay { file, engine, json } => {
            let config = engine.to_config()?;
            let signals = load_signals(&file)?;
            info!(file = %file.display(), count = signals.len(), "Loaded signals");

            let mut engine = DecisionEngine::new(config);
            let report = replay_signals(&mut engine, &signals);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }

        Commands::Config { engine } => {
            let config = engine.to_config()?;

            println!("\n=== Engine Configuration ===\n");
            println!("  Capital:          ${:.2}", config.capital);
            println!("  Risk Tolerance:   {:.1}%", config.risk_tolerance * 100.0);
            println!("  Max Position:     ${:.2}", config.max_position_size);
            println!("  Mode:             {}", config.trading_mode);

            println!("\nDecision Rules:");
            println!("  Trade Above:      {:.0}% confidence", TRADE_THRESHOLD * 100.0);
            println!("  Success Above:    {:.0}% confidence", SUCCESS_THRESHOLD * 100.0);
            println!("  Simulated Gain:   {}%", SIMULATED_GAIN * Decimal::from(100));
        }
    }

    Ok(())
}
