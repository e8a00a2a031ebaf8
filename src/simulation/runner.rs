//! Timed demo loop: ticks synthetic signals through the engine and reports
//! metrics on a fixed cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info};

use crate::metrics::SessionSummary;
use crate::models::{EngineMetrics, TradingSignal};
use crate::trading::{DecisionEngine, EngineConfig};

use super::SignalGenerator;

/// Demo loop timing.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// How long the demo runs
    pub duration: Duration,

    /// Time between generated signals
    pub tick_interval: Duration,

    /// Time between metrics lines
    pub metrics_interval: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(30),
            tick_interval: Duration::from_secs(2),
            metrics_interval: Duration::from_secs(10),
        }
    }
}

/// Drives a decision engine with generated signals for a fixed duration.
pub struct DemoRunner {
    engine: DecisionEngine,
    generator: SignalGenerator,
    config: DemoConfig,
    trades: Vec<TradingSignal>,
    signals_processed: u64,
    shutdown: Arc<AtomicBool>,
}

impl DemoRunner {
    /// Create a runner. Intervals must be non-zero.
    pub fn new(engine: DecisionEngine, generator: SignalGenerator, config: DemoConfig) -> Result<Self> {
        ensure!(!config.tick_interval.is_zero(), "tick interval must be non-zero");
        ensure!(!config.metrics_interval.is_zero(), "metrics interval must be non-zero");

        Ok(Self {
            engine,
            generator,
            config,
            trades: Vec::new(),
            signals_processed: 0,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get shutdown signal for external control.
    pub fn shutdown_signal(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Run the demo to completion or until shutdown is requested.
    ///
    /// The engine is activated on entry and deactivated on exit.
    pub async fn run(&mut self) -> DemoReport {
        let started_at = Utc::now();
        self.engine.activate();
        print_banner(self.engine.config());

        info!(
            duration_secs = self.config.duration.as_secs_f64(),
            tick_secs = self.config.tick_interval.as_secs_f64(),
            "Starting demo loop"
        );

        let mut trading_interval = interval(self.config.tick_interval);
        trading_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut metrics_interval = interval(self.config.metrics_interval);
        // First tick completes immediately; metrics start one interval in
        metrics_interval.tick().await;

        let deadline = sleep(self.config.duration);
        tokio::pin!(deadline);

        while !self.shutdown.load(Ordering::SeqCst) {
            tokio::select! {
                biased;

                _ = &mut deadline => break,

                _ = trading_interval.tick() => self.tick(),

                _ = metrics_interval.tick() => {
                    println!("METRICS: {}", self.engine.get_metrics());
                }
            }
        }

        self.engine.deactivate();
        let metrics = self.engine.get_metrics();

        DemoReport {
            started_at,
            finished_at: Utc::now(),
            config: self.engine.config().clone(),
            signals_processed: self.signals_processed,
            summary: SessionSummary::calculate(&self.trades),
            trades: self.trades.clone(),
            metrics,
        }
    }

    /// Single iteration of the demo loop.
    fn tick(&mut self) {
        let signal = self.generator.next_signal();
        self.signals_processed += 1;
        debug!(token = %signal.token, strength = signal.signal_strength, "Demo tick");

        if let Some(trade) = self.engine.process_signal(&signal) {
            println!(
                "Executed: {} {:.2} {} @ ${:.4} (confidence {:.1}%)",
                trade.action,
                trade.amount,
                trade.token,
                trade.price,
                trade.confidence * 100.0
            );
            self.trades.push(trade);
        }
    }
}

fn print_banner(config: &EngineConfig) {
    println!("\n=== Phoenix Decision Engine ===");
    println!("Capital:         ${:.2}", config.capital);
    println!("Mode:            {}", config.trading_mode);
    println!("Risk Tolerance:  {:.1}%", config.risk_tolerance * 100.0);
    println!("Max Position:    ${:.2}\n", config.max_position_size);
}

/// Outcome of a demo run.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config: EngineConfig,
    pub signals_processed: u64,
    pub metrics: EngineMetrics,
    pub trades: Vec<TradingSignal>,
    pub summary: SessionSummary,
}

impl std::fmt::Display for DemoReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n{:=^50}", " DEMO RESULTS ")?;
        writeln!(
            f,
            "Ran: {} to {}",
            self.started_at.format("%H:%M:%S"),
            self.finished_at.format("%H:%M:%S")
        )?;
        writeln!(f, "Mode: {}", self.config.trading_mode)?;
        writeln!(f)?;
        writeln!(f, "Signals:     {}", self.signals_processed)?;
        writeln!(f, "Trades:      {}", self.metrics.total_trades)?;
        writeln!(
            f,
            "Successful:  {} ({} below the success bar)",
            self.metrics.successful_trades,
            self.metrics.unsuccessful_trades()
        )?;
        writeln!(f, "Win Rate:    {:.1}%", self.metrics.win_rate * 100.0)?;
        writeln!(f, "Total P&L:   ${:.2}", self.metrics.total_pnl)?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f, "{:=^50}", "")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn runner(config: DemoConfig) -> DemoRunner {
        let engine = DecisionEngine::new(EngineConfig::with_capital(dec!(1000)).unwrap());
        DemoRunner::new(engine, SignalGenerator::from_seed(11), config).unwrap()
    }

    fn short_config() -> DemoConfig {
        DemoConfig {
            duration: Duration::from_millis(120),
            tick_interval: Duration::from_millis(10),
            metrics_interval: Duration::from_millis(50),
        }
    }

    #[test]
    fn test_rejects_zero_interval() {
        let engine = DecisionEngine::new(EngineConfig::with_capital(dec!(1000)).unwrap());
        let config = DemoConfig {
            tick_interval: Duration::ZERO,
            ..Default::default()
        };

        assert!(DemoRunner::new(engine, SignalGenerator::from_seed(1), config).is_err());
    }

    #[test]
    fn test_short_run_deactivates() {
        let mut runner = runner(short_config());

        let report = tokio_test::block_on(runner.run());

        assert!(!runner.engine().is_active());
        assert!(report.signals_processed > 0);
        assert_eq!(report.metrics, runner.engine().get_metrics());
        assert_eq!(report.trades.len() as u64, report.metrics.total_trades);
        assert_eq!(report.summary.trade_count, report.trades.len());
        assert!(report.metrics.successful_trades <= report.metrics.total_trades);
        assert!(report.finished_at >= report.started_at);
    }

    #[tokio::test]
    async fn test_shutdown_stops_early() {
        let config = DemoConfig {
            duration: Duration::from_secs(3600),
            ..short_config()
        };
        let mut runner = runner(config);
        runner.shutdown_signal().store(true, Ordering::SeqCst);

        let report = runner.run().await;

        assert_eq!(report.signals_processed, 0);
        assert!(!runner.engine().is_active());
    }

    #[test]
    fn test_report_display() {
        let mut runner = runner(short_config());
        let report = tokio_test::block_on(runner.run());

        let text = report.to_string();
        assert!(text.contains("DEMO RESULTS"));
        assert!(text.contains("Win Rate:"));
        assert!(text.contains("below the success bar"));
        assert!(text.contains("--- Session ---"));
    }
}
