//! RSI (Relative Strength Index) indicator

use crate::common::math::{average, round2};

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Calculate RSI with Wilder smoothing
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// The first averages cover the first `period` deltas; every later delta is
/// folded in as `avg = (avg * (period - 1) + new) / period`.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);

    for pair in prices.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let mut avg_gain = average(&gains[..period]);
    let mut avg_loss = average(&losses[..period]);

    let smoothing = period as f64;
    for i in period..gains.len() {
        avg_gain = (avg_gain * (smoothing - 1.0) + gains[i]) / smoothing;
        avg_loss = (avg_loss * (smoothing - 1.0) + losses[i]) / smoothing;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(round2(100.0 - (100.0 / (1.0 + rs))))
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(prices: &[f64]) -> Option<f64> {
    calculate_rsi(prices, DEFAULT_RSI_PERIOD)
}
