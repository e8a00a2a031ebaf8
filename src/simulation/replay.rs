//! Replay recorded market signals from a file through the engine.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::metrics::SessionSummary;
use crate::models::{EngineMetrics, MarketSignal, TradingSignal};
use crate::trading::DecisionEngine;

/// Load signals from a JSON array or a JSON Lines file.
pub fn load_signals(path: &Path) -> Result<Vec<MarketSignal>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read signal file {}", path.display()))?;

    parse_signals(&data).with_context(|| format!("Failed to parse signals in {}", path.display()))
}

fn parse_signals(data: &str) -> Result<Vec<MarketSignal>> {
    if data.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(data)?);
    }

    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<MarketSignal>(line).with_context(|| format!("Invalid signal on line {}", i + 1))
        })
        .collect()
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Signals read from the source
    pub signals: usize,

    /// Signals refused by validation
    pub rejected: usize,

    pub trades: Vec<TradingSignal>,
    pub metrics: EngineMetrics,
    pub summary: SessionSummary,
}

/// Feed signals through the validated decision path in order.
///
/// The engine is active for the replay and left in the state it was in
/// before; invalid signals are logged and skipped.
pub fn replay_signals(engine: &mut DecisionEngine, signals: &[MarketSignal]) -> ReplayReport {
    let was_active = engine.is_active();
    engine.activate();

    let mut trades = Vec::new();
    let mut rejected = 0;

    for signal in signals {
        match engine.process_validated_signal(signal) {
            Ok(Some(trade)) => trades.push(trade),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Signal rejected");
                rejected += 1;
            }
        }
    }

    if !was_active {
        engine.deactivate();
    }

    info!(
        signals = signals.len(),
        trades = trades.len(),
        rejected = rejected,
        "Replay finished"
    );

    ReplayReport {
        signals: signals.len(),
        rejected,
        summary: SessionSummary::calculate(&trades),
        trades,
        metrics: engine.get_metrics(),
    }
}

impl std::fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n{:=^50}", " REPLAY RESULTS ")?;
        writeln!(f, "Signals:     {} ({} rejected)", self.signals, self.rejected)?;
        writeln!(f, "Metrics:     {}", self.metrics)?;
        writeln!(
            f,
            "Outcome:     {} successful / {} unsuccessful",
            self.metrics.successful_trades,
            self.metrics.unsuccessful_trades()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f, "{:=^50}", "")?;
        Ok(())
    }
}
