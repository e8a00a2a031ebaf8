//! Errors surfaced by the trading core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid signal for {token}: {reason}")]
    InvalidSignal { token: String, reason: String },
}
