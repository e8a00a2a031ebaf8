//! Running performance counters owned by a decision engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifetime metrics of a single engine instance.
///
/// Only the engine's decision path mutates these; callers get copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineMetrics {
    /// Number of trading signals emitted
    pub total_trades: u64,

    /// Trades whose confidence cleared the success bar
    pub successful_trades: u64,

    /// Simulated cumulative P&L in quote currency
    pub total_pnl: Decimal,

    /// successful_trades / total_trades, 0.0 before the first trade
    pub win_rate: f64,

    /// Reserved. Never updated by the engine.
    pub avg_trade_duration_secs: f64,

    /// Reserved. Never updated by the engine.
    pub current_positions: u32,
}

impl EngineMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            successful_trades: 0,
            total_pnl: Decimal::ZERO,
            win_rate: 0.0,
            avg_trade_duration_secs: 0.0,
            current_positions: 0,
        }
    }

    /// Count one emitted trade, crediting `pnl` when it was successful.
    ///
    /// P&L saturates at the `Decimal` bounds instead of overflowing.
    pub(crate) fn record_trade(&mut self, successful: bool, pnl: Decimal) {
        self.total_trades += 1;
        if successful {
            self.successful_trades += 1;
            self.total_pnl = self.total_pnl.saturating_add(pnl);
        }
        self.win_rate = if self.total_trades > 0 {
            self.successful_trades as f64 / self.total_trades as f64
        } else {
            0.0
        };
    }

    /// Trades that did not clear the success bar.
    pub fn unsuccessful_trades(&self) -> u64 {
        self.total_trades - self.successful_trades
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EngineMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trades: {} | Win Rate: {:.1}% | P&L: ${:.2}",
            self.total_trades,
            self.win_rate * 100.0,
            self.total_pnl
        )
    }
}
