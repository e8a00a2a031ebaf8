//! Data models for market signals, trading decisions and engine metrics.

mod metrics;
mod signal;

pub use metrics::EngineMetrics;
pub use signal::{MarketSignal, TradeAction, TradingSignal};
