//! EMA (Exponential Moving Average) and SMA indicators

use crate::common::math::{self, round2};

pub const SHORT_EMA_PERIOD: usize = 5;
pub const LONG_EMA_PERIOD: usize = 20;

/// Arithmetic mean of the last `period` prices
pub fn calculate_sma(prices: &[f64], period: usize) -> Option<f64> {
    math::sma(prices, period)
}

/// Calculate EMA for a specific period, rounded to 2 decimals
///
/// Seeded with the SMA of the first `period` prices, then smoothed forward
/// with `k = 2 / (period + 1)`.
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    math::ema(prices, period).map(round2)
}
