//! Synthetic market signals for the demo loop.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::MarketSignal;

/// Tokens sampled when none are given.
pub const DEFAULT_TOKENS: &[&str] = &["BONK", "WIF", "POPCAT", "MOODENG", "PNUT"];

const MIN_PRICE: f64 = 0.001;
const PRICE_SPAN: f64 = 0.1;
const MIN_VOLUME: f64 = 500_000.0;
const VOLUME_SPAN: f64 = 2_000_000.0;

/// Random signal source.
///
/// price is uniform in [0.001, 0.101), volume in [500k, 2.5M) and strength
/// in [0, 1). Seeded generators are reproducible.
#[derive(Debug)]
pub struct SignalGenerator {
    rng: StdRng,
    tokens: Vec<String>,
}

impl SignalGenerator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy(), default_tokens())
    }

    /// Reproducible generator.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), default_tokens())
    }

    /// Sample from a custom token list; an empty list falls back to the defaults.
    pub fn with_tokens(tokens: Vec<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tokens = if tokens.is_empty() { default_tokens() } else { tokens };
        Self::with_rng(rng, tokens)
    }

    fn with_rng(rng: StdRng, tokens: Vec<String>) -> Self {
        Self { rng, tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Draw the next signal, stamped with the current time.
    pub fn next_signal(&mut self) -> MarketSignal {
        let token = self
            .tokens
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();

        let price = MIN_PRICE + self.rng.gen::<f64>() * PRICE_SPAN;
        let volume = MIN_VOLUME + self.rng.gen::<f64>() * VOLUME_SPAN;
        let signal_strength = self.rng.gen::<f64>();

        MarketSignal::new(
            token,
            Decimal::from_f64(price).unwrap_or(dec!(0.001)).round_dp(6),
            Decimal::from_f64(volume).unwrap_or(dec!(500000)).round_dp(2),
            signal_strength,
        )
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SignalGenerator {
    type Item = MarketSignal;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_signal())
    }
}

fn default_tokens() -> Vec<String> {
    DEFAULT_TOKENS.iter().map(|t| t.to_string()).collect()
}
