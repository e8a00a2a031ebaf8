//! Decision engine: turns market signals into sized trading signals and
//! keeps the running metrics.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::models::{EngineMetrics, MarketSignal, TradeAction, TradingSignal};

use super::scoring::score;
use super::{EngineConfig, EngineError, PositionSizer};

/// Confidence a signal must exceed to become a trade.
pub const TRADE_THRESHOLD: f64 = 0.7;

/// Confidence a trade must exceed to count as successful.
pub const SUCCESS_THRESHOLD: f64 = 0.8;

/// Simulated return credited to successful trades.
pub const SIMULATED_GAIN: Decimal = dec!(0.02);

/// Signal strength a signal must exceed to be read as a buy.
const BUY_STRENGTH: f64 = 0.5;

/// Direction for a qualifying signal. Exactly neutral strength sells.
pub fn decide_action(signal_strength: f64) -> TradeAction {
    if signal_strength > BUY_STRENGTH {
        TradeAction::Buy
    } else {
        TradeAction::Sell
    }
}

/// Stateful engine with an inactive/active lifecycle.
///
/// Signals are processed one at a time; every method runs to completion
/// without suspending.
#[derive(Debug)]
pub struct DecisionEngine {
    config: EngineConfig,
    position_sizer: PositionSizer,
    metrics: EngineMetrics,
    active: bool,
}

impl DecisionEngine {
    /// Create an inactive engine with zeroed metrics.
    pub fn new(config: EngineConfig) -> Self {
        let position_sizer = PositionSizer::new(&config);

        Self {
            config,
            position_sizer,
            metrics: EngineMetrics::new(),
            active: false,
        }
    }

    /// Start accepting signals. No-op when already active.
    pub fn activate(&mut self) {
        if self.active {
            debug!("Engine already active");
            return;
        }

        self.active = true;
        info!(
            capital = %self.config.capital,
            mode = %self.config.trading_mode,
            risk_tolerance = self.config.risk_tolerance,
            max_position = %self.config.max_position_size,
            "Engine activated"
        );
    }

    /// Stop accepting signals. Metrics are kept and stay readable.
    pub fn deactivate(&mut self) {
        let was_active = self.active;
        self.active = false;

        if was_active {
            info!(
                total_trades = self.metrics.total_trades,
                win_rate = self.metrics.win_rate,
                total_pnl = %self.metrics.total_pnl,
                "Engine deactivated"
            );
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decide on a single market signal.
    ///
    /// Returns `None` while inactive, when confidence is not finite or when
    /// it does not exceed [`TRADE_THRESHOLD`]; none of these touch the
    /// metrics. Inputs are
    /// used as-is, see [`Self::process_validated_signal`] for a checked
    /// variant.
    pub fn process_signal(&mut self, signal: &MarketSignal) -> Option<TradingSignal> {
        if !self.active {
            return None;
        }

        let confidence = score(signal, &self.config);
        if !confidence.is_finite() || confidence <= TRADE_THRESHOLD {
            return None;
        }

        let action = decide_action(signal.signal_strength);
        let amount = self.position_sizer.calculate_size(signal, confidence);

        let successful = confidence > SUCCESS_THRESHOLD;
        self.metrics.record_trade(successful, amount * SIMULATED_GAIN);

        info!(
            action = %action,
            token = %signal.token,
            price = %signal.price,
            amount = %amount,
            confidence = confidence,
            "Trade signal"
        );

        Some(TradingSignal {
            action,
            token: signal.token.clone(),
            amount,
            price: signal.price,
            confidence,
            timestamp: Utc::now(),
        })
    }

    /// Like [`Self::process_signal`], but rejects signals whose values fall
    /// outside what the scoring formulas expect.
    ///
    /// A rejected signal leaves the metrics untouched.
    pub fn process_validated_signal(
        &mut self,
        signal: &MarketSignal,
    ) -> Result<Option<TradingSignal>, EngineError> {
        if let Some(reason) = signal.validation_error() {
            return Err(EngineError::InvalidSignal {
                token: signal.token.clone(),
                reason,
            });
        }

        Ok(self.process_signal(signal))
    }

    /// Snapshot of the current metrics.
    pub fn get_metrics(&self) -> EngineMetrics {
        self.metrics.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trading::TradingMode;

    fn engine(risk_tolerance: f64) -> DecisionEngine {
        let config = EngineConfig::new(dec!(1000), risk_tolerance, dec!(100), TradingMode::Demo)
            .unwrap();
        DecisionEngine::new(config)
    }

    fn active_engine(risk_tolerance: f64) -> DecisionEngine {
        let mut engine = engine(risk_tolerance);
        engine.activate();
        engine
    }

    fn signal(volume: Decimal, strength: f64) -> MarketSignal {
        MarketSignal::new("POPCAT", dec!(0.0375), volume, strength)
    }

    #[test]
    fn test_starts_inactive() {
        let mut engine = engine(0.85);
        assert!(!engine.is_active());

        let result = engine.process_signal(&signal(dec!(2000000), 0.99));
        assert!(result.is_none());
        assert_eq!(engine.get_metrics(), EngineMetrics::new());
    }

    #[test]
    fn test_buy_scenario() {
        let mut engine = active_engine(0.85);

        let trade = engine
            .process_signal(&signal(dec!(2000000), 0.9))
            .expect("confidence 0.765 should trade");

        assert_eq!(trade.action, TradeAction::Buy);
        assert_eq!(trade.token, "POPCAT");
        assert_eq!(trade.price, dec!(0.0375));
        assert!((trade.confidence - 0.765).abs() < 1e-9);
        assert!((trade.amount - dec!(45.9)).abs() < dec!(0.000001));

        let metrics = engine.get_metrics();
        assert_eq!(metrics.total_trades, 1);
        assert_eq!(metrics.successful_trades, 0);
        assert_eq!(metrics.total_pnl, Decimal::ZERO);
        assert_eq!(metrics.win_rate, 0.0);
    }

    #[test]
    fn test_low_confidence_no_trade() {
        let mut engine = active_engine(0.85);

        assert!(engine.process_signal(&signal(dec!(100000), 0.2)).is_none());
        assert_eq!(engine.get_metrics(), EngineMetrics::new());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut engine = active_engine(1.0);

        assert!(engine.process_signal(&signal(dec!(1000000), 0.7)).is_none());
        assert_eq!(engine.get_metrics().total_trades, 0);

        let trade = engine.process_signal(&signal(dec!(1000000), 0.70000001));
        assert!(trade.is_some());
        assert_eq!(engine.get_metrics().total_trades, 1);
    }

    #[test]
    fn test_non_finite_strength_never_trades() {
        let mut engine = active_engine(0.85);

        assert!(engine.process_signal(&signal(dec!(2000000), f64::NAN)).is_none());
        assert!(engine.process_signal(&signal(dec!(2000000), f64::INFINITY)).is_none());
        assert!(engine.process_signal(&signal(Decimal::ZERO, f64::INFINITY)).is_none());
        assert_eq!(engine.get_metrics(), EngineMetrics::new());
    }

    #[test]
    fn test_huge_positions_saturate_pnl() {
        let config =
            EngineConfig::new(Decimal::MAX, 1.0, Decimal::MAX, TradingMode::Demo).unwrap();
        let mut engine = DecisionEngine::new(config);
        engine.activate();

        for _ in 0..200 {
            let trade = engine.process_signal(&signal(dec!(1000000), 0.9)).unwrap();
            assert!(trade.amount > Decimal::ZERO);
        }

        let metrics = engine.get_metrics();
        assert_eq!(metrics.total_trades, 200);
        assert_eq!(metrics.successful_trades, 200);
        assert_eq!(metrics.total_pnl, Decimal::MAX);
    }

    #[test]
    fn test_neutral_strength_sells() {
        assert_eq!(decide_action(0.5), TradeAction::Sell);
        assert_eq!(decide_action(0.5000001), TradeAction::Buy);
        assert_eq!(decide_action(0.1), TradeAction::Sell);

        // With strength capped at 1 a neutral signal scores at most 0.5
        let mut engine = active_engine(1.0);
        assert!(engine.process_signal(&signal(dec!(1000000), 0.5)).is_none());
    }

    #[test]
    fn test_successful_trade_credits_pnl() {
        let mut engine = active_engine(1.0);

        let trade = engine.process_signal(&signal(dec!(1500000), 0.82)).unwrap();
        // 100 * 0.82 * (1 - 0.32)
        assert!((trade.amount - dec!(55.76)).abs() < dec!(0.000001));

        let metrics = engine.get_metrics();
        assert_eq!(metrics.successful_trades, 1);
        assert_eq!(metrics.total_pnl, trade.amount * dec!(0.02));
        assert_eq!(metrics.win_rate, 1.0);
    }

    #[test]
    fn test_mixed_sequence() {
        let mut engine = active_engine(1.0);

        for strength in [0.75, 0.78, 0.9] {
            assert!(engine.process_signal(&signal(dec!(1000000), strength)).is_some());
        }

        let metrics = engine.get_metrics();
        assert_eq!(metrics.total_trades, 3);
        assert_eq!(metrics.successful_trades, 1);
        assert!((metrics.win_rate - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_deactivate_keeps_metrics() {
        let mut engine = active_engine(1.0);
        engine.process_signal(&signal(dec!(1000000), 0.9)).unwrap();
        let before = engine.get_metrics();

        engine.deactivate();
        assert!(!engine.is_active());
        assert_eq!(engine.get_metrics(), before);

        assert!(engine.process_signal(&signal(dec!(1000000), 0.9)).is_none());
        assert_eq!(engine.get_metrics(), before);

        // Re-activation continues from the same counters
        engine.activate();
        engine.process_signal(&signal(dec!(1000000), 0.9)).unwrap();
        assert_eq!(engine.get_metrics().total_trades, 2);
    }

    #[test]
    fn test_activate_twice_is_noop() {
        let mut engine = active_engine(1.0);
        engine.process_signal(&signal(dec!(1000000), 0.9)).unwrap();

        engine.activate();
        assert!(engine.is_active());
        assert_eq!(engine.get_metrics().total_trades, 1);
    }

    #[test]
    fn test_deactivate_when_inactive() {
        let mut engine = engine(0.85);
        engine.deactivate();
        assert!(!engine.is_active());
        assert_eq!(engine.get_metrics(), EngineMetrics::new());
    }

    #[test]
    fn test_get_metrics_is_idempotent() {
        let mut engine = active_engine(1.0);
        engine.process_signal(&signal(dec!(1000000), 0.85)).unwrap();

        assert_eq!(engine.get_metrics(), engine.get_metrics());
    }

    #[test]
    fn test_validated_path_rejects_without_side_effects() {
        let mut engine = active_engine(1.0);

        let err = engine
            .process_validated_signal(&signal(dec!(1000000), 1.7))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidSignal { ref token, .. } if token == "POPCAT"));
        assert_eq!(engine.get_metrics(), EngineMetrics::new());

        let negative_volume = signal(dec!(-10), 0.9);
        assert!(engine.process_validated_signal(&negative_volume).is_err());

        let ok = engine.process_validated_signal(&signal(dec!(1000000), 0.9)).unwrap();
        assert!(ok.is_some());
        assert_eq!(engine.get_metrics().total_trades, 1);
    }

    #[test]
    fn test_unvalidated_path_accepts_out_of_range() {
        let mut engine = active_engine(1.0);

        // Strength above 1 still flows through the arithmetic
        let trade = engine.process_signal(&signal(dec!(1000000), 1.2)).unwrap();
        assert_eq!(trade.action, TradeAction::Buy);
        assert_eq!(trade.confidence, 1.0);
        assert!((trade.amount - dec!(30)).abs() < dec!(0.000001));
    }
}
