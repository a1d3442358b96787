//! Volume-to-average ratio

use crate::common::math::{average, round2};
use crate::models::indicators::VolumeIndicator;

pub const DEFAULT_VOLUME_PERIOD: usize = 20;

/// Compare the latest volume against the mean of the last `period` volumes.
///
/// Returns `None` when the window is too short or the average volume is zero,
/// since the ratio is undefined in that case.
pub fn analyze_volume(volumes: &[f64], period: usize) -> Option<VolumeIndicator> {
    if period == 0 || volumes.len() < period {
        return None;
    }

    let avg_volume = average(&volumes[volumes.len() - period..]);
    let current = *volumes.last()?;
    let ratio = current / avg_volume;
    if !ratio.is_finite() {
        return None;
    }

    Some(VolumeIndicator {
        current,
        average: round2(avg_volume),
        ratio: round2(ratio),
        is_above_average: ratio > 1.0,
    })
}

/// Analyze volume with the default 20-bar average
pub fn analyze_volume_default(volumes: &[f64]) -> Option<VolumeIndicator> {
    analyze_volume(volumes, DEFAULT_VOLUME_PERIOD)
}
