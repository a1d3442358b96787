//! Bollinger Bands indicator

use crate::common::math::{self, round2};
use crate::models::indicators::BollingerBandsIndicator;

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_STD_DEV: f64 = 2.0;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
///
/// The standard deviation is the population deviation of the same slice.
pub fn calculate_bollinger_bands(
    prices: &[f64],
    period: usize,
    std_dev: f64,
) -> Option<BollingerBandsIndicator> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let window = &prices[prices.len() - period..];
    let middle = math::average(window);
    let sd = math::standard_deviation(window, Some(middle));

    Some(BollingerBandsIndicator {
        upper: round2(middle + std_dev * sd),
        middle: round2(middle),
        lower: round2(middle - std_dev * sd),
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(prices: &[f64]) -> Option<BollingerBandsIndicator> {
    calculate_bollinger_bands(prices, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_STD_DEV)
}
