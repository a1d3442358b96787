//! Confluence: technical-indicator signal engine.
//!
//! Computes RSI, EMA, MACD, Bollinger Bands and volume ratio over a price
//! window, tallies per-indicator buy/sell votes and emits graded signals when
//! enough indicators agree.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod notifications;
pub mod services;
pub mod signals;

pub use error::{ConfigError, FeedError, NotifyError};
pub use models::{Condition, IndicatorSnapshot, PriceWindow, Signal, SignalResult, SignalType, Strength};
pub use signals::engine::SignalEngine;
