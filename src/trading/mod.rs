//! Trading core: configuration, confidence scoring, position sizing and the
//! decision engine.

mod config;
mod engine;
mod error;
mod position_sizer;
pub mod scoring;

pub use config::{EngineConfig, TradingMode, DEFAULT_MAX_POSITION_FRACTION, DEFAULT_RISK_TOLERANCE};
pub use engine::{decide_action, DecisionEngine, SIMULATED_GAIN, SUCCESS_THRESHOLD, TRADE_THRESHOLD};
pub use error::EngineError;
pub use position_sizer::{volatility_adjustment, PositionSizer};
pub use scoring::score;
