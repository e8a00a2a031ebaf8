//! Market signals coming into the engine and trading signals coming out.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Action attached to a trading signal.
///
/// `Hold` is part of the vocabulary but the decision path only ever picks
/// `Buy` or `Sell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One market observation for a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSignal {
    /// Token symbol (e.g. "BONK")
    pub token: String,

    /// Last traded price
    pub price: Decimal,

    /// Traded volume over the tick
    pub volume: Decimal,

    /// When the observation was taken
    pub timestamp: DateTime<Utc>,

    /// Directional bias in [0, 1]: 0 bearish, 0.5 neutral, 1 bullish
    pub signal_strength: f64,
}

impl MarketSignal {
    /// Build a signal stamped with the current time.
    pub fn new(
        token: impl Into<String>,
        price: Decimal,
        volume: Decimal,
        signal_strength: f64,
    ) -> Self {
        Self {
            token: token.into(),
            price,
            volume,
            timestamp: Utc::now(),
            signal_strength,
        }
    }

    /// Check the signal for values the engine's formulas were not built for.
    ///
    /// Returns the first problem found, if any.
    pub fn validation_error(&self) -> Option<String> {
        if !self.signal_strength.is_finite() {
            return Some(format!("signal strength {} is not finite", self.signal_strength));
        }
        if !(0.0..=1.0).contains(&self.signal_strength) {
            return Some(format!(
                "signal strength {} is outside [0, 1]",
                self.signal_strength
            ));
        }
        if self.price <= Decimal::ZERO {
            return Some(format!("price {} must be positive", self.price));
        }
        if self.volume < Decimal::ZERO {
            return Some(format!("volume {} must not be negative", self.volume));
        }
        None
    }
}

/// A sized trading decision produced from a qualifying market signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub action: TradeAction,

    pub token: String,

    /// Position size in quote currency
    pub amount: Decimal,

    /// Price carried over from the market signal
    pub price: Decimal,

    /// Confidence score in [0, 1]
    pub confidence: f64,

    /// When the decision was made
    pub timestamp: DateTime<Utc>,
}
