//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{
    BollingerBandsIndicator, IndicatorSnapshot, MacdIndicator, PriceWindow, VolumeIndicator,
};
pub use signal::{Condition, Signal, SignalResult, SignalType, Strength};
