//! Position sizing: scale the configured maximum by confidence and by how
//! directionally extreme the signal is.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::models::MarketSignal;

use super::EngineConfig;

/// Signal strength treated as perfectly stable.
const NEUTRAL_STRENGTH: f64 = 0.5;

/// 1.0 at neutral strength, falling linearly to 0.5 at either extreme.
///
/// Extreme signals are treated as more volatile and get smaller positions,
/// regardless of the buy/sell direction chosen from the same value.
pub fn volatility_adjustment(signal_strength: f64) -> f64 {
    1.0 - (signal_strength - NEUTRAL_STRENGTH).abs()
}

/// Calculator for trade amounts.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    max_position_size: Decimal,
}

impl PositionSizer {
    /// Create a sizer bounded by the config's max position size.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_position_size: config.max_position_size,
        }
    }

    /// Calculate the amount for a qualifying signal.
    ///
    /// amount = max_position_size * confidence * volatility_adjustment
    ///
    /// No floor or extra cap is applied. A multiplier that cannot be
    /// represented as a decimal yields zero.
    pub fn calculate_size(&self, signal: &MarketSignal, confidence: f64) -> Decimal {
        let multiplier = confidence * volatility_adjustment(signal.signal_strength);

        Decimal::from_f64(multiplier)
            .and_then(|m| self.max_position_size.checked_mul(m))
            .unwrap_or(Decimal::ZERO)
    }
}
