//! Engine configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::EngineError;

/// Risk tolerance used when only capital is given.
pub const DEFAULT_RISK_TOLERANCE: f64 = 0.85;

/// Share of capital allowed in a single position when only capital is given.
pub const DEFAULT_MAX_POSITION_FRACTION: Decimal = dec!(0.1);

/// Label for how the engine is being run. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradingMode {
    Demo,
    Live,
}

impl TradingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingMode::Demo => "DEMO",
            TradingMode::Live => "LIVE",
        }
    }
}

impl std::fmt::Display for TradingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TradingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "live" => Ok(Self::Live),
            other => Err(format!("unknown trading mode '{}' (expected demo or live)", other)),
        }
    }
}

/// Static parameters fixed when an engine is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Total capital in quote currency
    pub capital: Decimal,

    /// Appetite for risk (0.0 to 1.0), scales every confidence score
    pub risk_tolerance: f64,

    /// Largest amount a single trade may be sized at
    pub max_position_size: Decimal,

    pub trading_mode: TradingMode,
}

impl EngineConfig {
    /// Create a validated configuration.
    ///
    /// `max_position_size` is taken as given; it is not checked against
    /// `capital`.
    pub fn new(
        capital: Decimal,
        risk_tolerance: f64,
        max_position_size: Decimal,
        trading_mode: TradingMode,
    ) -> Result<Self, EngineError> {
        if capital <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "capital",
                reason: format!("must be positive, got {}", capital),
            });
        }

        if !risk_tolerance.is_finite() || !(0.0..=1.0).contains(&risk_tolerance) {
            return Err(EngineError::InvalidConfig {
                field: "risk_tolerance",
                reason: format!("must be within [0, 1], got {}", risk_tolerance),
            });
        }

        if max_position_size <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "max_position_size",
                reason: format!("must be positive, got {}", max_position_size),
            });
        }

        Ok(Self {
            capital,
            risk_tolerance,
            max_position_size,
            trading_mode,
        })
    }

    /// Demo configuration for the given capital: 85% risk tolerance and a
    /// position cap of 10% of capital.
    pub fn with_capital(capital: Decimal) -> Result<Self, EngineError> {
        Self::new(
            capital,
            DEFAULT_RISK_TOLERANCE,
            capital * DEFAULT_MAX_POSITION_FRACTION,
            TradingMode::Demo,
        )
    }
}
