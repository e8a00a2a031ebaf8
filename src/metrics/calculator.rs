//! Descriptive statistics over the trades a session produced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::models::{TradeAction, TradingSignal};

/// Summary of a batch of trading signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub trade_count: usize,
    pub buy_count: usize,
    pub sell_count: usize,

    /// Mean confidence of emitted trades
    pub mean_confidence: f64,

    /// Sample standard deviation of confidence, 0.0 with fewer than 2 trades
    pub confidence_std_dev: f64,

    /// Mean trade amount
    pub mean_amount: Decimal,

    /// Sum of all trade amounts, saturating at `Decimal::MAX`
    pub total_notional: Decimal,

    /// Largest single trade amount
    pub largest_amount: Decimal,
}

impl SessionSummary {
    fn empty() -> Self {
        Self {
            trade_count: 0,
            buy_count: 0,
            sell_count: 0,
            mean_confidence: 0.0,
            confidence_std_dev: 0.0,
            mean_amount: Decimal::ZERO,
            total_notional: Decimal::ZERO,
            largest_amount: Decimal::ZERO,
        }
    }

    /// Calculate the summary for a list of trades.
    pub fn calculate(trades: &[TradingSignal]) -> Self {
        if trades.is_empty() {
            return Self::empty();
        }

        let buy_count = trades.iter().filter(|t| t.action == TradeAction::Buy).count();
        let sell_count = trades.iter().filter(|t| t.action == TradeAction::Sell).count();

        let confidences: Vec<f64> = trades.iter().map(|t| t.confidence).collect();
        let mean_confidence = confidences.clone().mean();
        let confidence_std_dev = if confidences.len() < 2 {
            0.0
        } else {
            confidences.std_dev()
        };

        let total_notional = trades
            .iter()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount));
        let mean_amount = total_notional / Decimal::from(trades.len() as u64);
        let largest_amount = trades
            .iter()
            .map(|t| t.amount)
            .max()
            .unwrap_or(Decimal::ZERO);

        Self {
            trade_count: trades.len(),
            buy_count,
            sell_count,
            mean_confidence,
            confidence_std_dev,
            mean_amount,
            total_notional,
            largest_amount,
        }
    }

    /// Share of trades that were buys (0.0 to 1.0).
    pub fn buy_ratio(&self) -> f64 {
        if self.trade_count == 0 {
            return 0.0;
        }
        self.buy_count as f64 / self.trade_count as f64
    }
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Session ---")?;
        writeln!(
            f,
            "Trades:      {} ({} buy / {} sell, {:.1}% buys)",
            self.trade_count,
            self.buy_count,
            self.sell_count,
            self.buy_ratio() * 100.0
        )?;
        writeln!(
            f,
            "Confidence:  {:.1}% avg (σ {:.1}%)",
            self.mean_confidence * 100.0,
            self.confidence_std_dev * 100.0
        )?;
        writeln!(f, "Avg Size:    ${:.2}", self.mean_amount)?;
        writeln!(f, "Largest:     ${:.2}", self.largest_amount)?;
        write!(f, "Notional:    ${:.2}", self.total_notional)
    }
}
