//! Drivers around the engine: synthetic signal generation, the timed demo
//! loop and file replay.

mod generator;
mod replay;
mod runner;

pub use generator::{SignalGenerator, DEFAULT_TOKENS};
pub use replay::{load_signals, replay_signals, ReplayReport};
pub use runner::{DemoConfig, DemoReport, DemoRunner};
