//! Phoenix decision engine.
//!
//! Scores market signals with a confidence heuristic, sizes qualifying
//! signals into trades and keeps running performance metrics.
//!
//! - `trading`: config, scoring, position sizing and the decision engine
//! - `models`: market signals, trading signals, engine metrics
//! - `metrics`: session statistics over emitted trades
//! - `simulation`: synthetic signal source, timed demo loop, file replay

pub mod metrics;
pub mod models;
pub mod simulation;
pub mod trading;

pub use models::{EngineMetrics, MarketSignal, TradeAction, TradingSignal};
pub use trading::{DecisionEngine, EngineConfig, EngineError, TradingMode};
