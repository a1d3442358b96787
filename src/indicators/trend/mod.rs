//! Trend indicators: EMA, SMA

pub mod ema;

pub use ema::*;
