//! Confidence scoring for incoming market signals.
//!
//! confidence = min(volume_factor * signal_strength * risk_tolerance, 1.0)
//!
//! where volume_factor = min(volume / REFERENCE_VOLUME, 1.0). Volume stands in
//! for liquidity and saturates at the reference scale, so the score never
//! exceeds what strength and risk tolerance allow.

use rust_decimal::prelude::ToPrimitive;

use crate::models::MarketSignal;

use super::EngineConfig;

/// Volume at which the liquidity factor saturates.
pub const REFERENCE_VOLUME: f64 = 1_000_000.0;

/// Liquidity factor in [0, 1] for non-negative volume.
pub fn volume_factor(signal: &MarketSignal) -> f64 {
    let volume = signal.volume.to_f64().unwrap_or(0.0);
    (volume / REFERENCE_VOLUME).min(1.0)
}

/// Score a signal against the engine's risk appetite.
///
/// A non-finite product (NaN or infinite strength) is returned as-is
/// instead of being capped, so it never clears a confidence threshold.
pub fn score(signal: &MarketSignal, config: &EngineConfig) -> f64 {
    let strength_factor = signal.signal_strength;
    let risk_factor = config.risk_tolerance;

    let raw = volume_factor(signal) * strength_factor * risk_factor;
    if !raw.is_finite() {
        return raw;
    }
    raw.min(1.0)
}
