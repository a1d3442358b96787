use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One evaluation window as delivered by a market feed.
///
/// `prices` and `volumes` are chronological, oldest first. `timestamp` is the
/// evaluation time, not a per-candle time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceWindow {
    pub asset: Option<String>,
    pub prices: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<f64>>,
    pub timestamp: DateTime<Utc>,
}

impl PriceWindow {
    pub fn new(asset: impl Into<String>, prices: Vec<f64>, timestamp: DateTime<Utc>) -> Self {
        Self {
            asset: Some(asset.into()),
            prices,
            volumes: None,
            timestamp,
        }
    }

    pub fn with_volumes(mut self, volumes: Vec<f64>) -> Self {
        self.volumes = Some(volumes);
        self
    }

    /// Latest known price (last element of the window).
    pub fn current_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeIndicator {
    pub current: f64,
    pub average: f64,
    pub ratio: f64,
    pub is_above_average: bool,
}

/// Latest values of every enabled indicator, recomputed each cycle.
///
/// A `None` field means the indicator is disabled or the window was too short.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_short: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_long: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerBandsIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<VolumeIndicator>,
}

impl IndicatorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.rsi = Some(rsi);
        self
    }

    pub fn with_emas(mut self, short: f64, long: f64) -> Self {
        self.ema_short = Some(short);
        self.ema_long = Some(long);
        self
    }

    pub fn with_bollinger(mut self, bands: BollingerBandsIndicator) -> Self {
        self.bollinger = Some(bands);
        self
    }

    pub fn with_macd(mut self, macd: MacdIndicator) -> Self {
        self.macd = Some(macd);
        self
    }

    pub fn with_volume(mut self, volume: VolumeIndicator) -> Self {
        self.volume = Some(volume);
        self
    }
}
