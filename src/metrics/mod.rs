//! Session reporting over emitted trades.

mod calculator;

pub use calculator::SessionSummary;
