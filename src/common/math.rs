//! Numeric helpers shared by the indicator library.

/// Arithmetic mean. The mean of an empty slice is 0.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (denominator N).
///
/// Uses `mean` when the caller already has it, otherwise computes it.
pub fn standard_deviation(values: &[f64], mean: Option<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let avg = mean.unwrap_or_else(|| average(values));
    let squared_diffs: Vec<f64> = values.iter().map(|v| (v - avg).powi(2)).collect();
    average(&squared_diffs).sqrt()
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of the last `period` values, or `None` when there are fewer.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(average(&values[values.len() - period..]))
}

/// Unrounded EMA seeded with the SMA of the first `period` values.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let seed = average(&values[..period]);
    Some(
        values[period..]
            .iter()
            .fold(seed, |prev, &value| ema_from_previous(value, prev, period)),
    )
}

/// One smoothing step: `value * k + prev * (1 - k)` with `k = 2 / (period + 1)`.
pub fn ema_from_previous(value: f64, prev: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + prev * (1.0 - k)
}
