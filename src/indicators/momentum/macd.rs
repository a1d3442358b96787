//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math::round2;
use crate::indicators::trend::calculate_ema;
use crate::models::indicators::MacdIndicator;

pub const DEFAULT_MACD_FAST: usize = 12;
pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal_period) of the MACD series
/// Histogram = MACD - Signal
///
/// The MACD series is rebuilt from scratch for every prefix of `prices`
/// ending at index `slow_period - 1` or later, so the output matches a full
/// recomputation on each call.
pub fn calculate_macd(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdIndicator> {
    if slow_period == 0 || prices.len() < slow_period + signal_period {
        return None;
    }

    let fast_ema = calculate_ema(prices, fast_period)?;
    let slow_ema = calculate_ema(prices, slow_period)?;
    let macd_line = fast_ema - slow_ema;

    let mut macd_values = Vec::with_capacity(prices.len() + 1 - slow_period);
    for end in slow_period..=prices.len() {
        let prefix = &prices[..end];
        let fast = calculate_ema(prefix, fast_period)?;
        let slow = calculate_ema(prefix, slow_period)?;
        macd_values.push(fast - slow);
    }

    let signal_line = calculate_ema(&macd_values, signal_period)?;
    let histogram = macd_line - signal_line;

    Some(MacdIndicator {
        macd: round2(macd_line),
        signal: round2(signal_line),
        histogram: round2(histogram),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(prices: &[f64]) -> Option<MacdIndicator> {
    calculate_macd(prices, DEFAULT_MACD_FAST, DEFAULT_MACD_SLOW, DEFAULT_MACD_SIGNAL)
}
