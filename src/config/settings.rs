//! Trading configuration owned by the signal engine

use serde::{Deserialize, Serialize};

use crate::models::signal::Strength;

/// Which of the five indicators take part in voting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveIndicators {
    pub rsi: bool,
    pub ema: bool,
    pub bollinger: bool,
    pub macd: bool,
    pub volume: bool,
}

impl ActiveIndicators {
    pub fn all() -> Self {
        Self {
            rsi: true,
            ema: true,
            bollinger: true,
            macd: true,
            volume: true,
        }
    }

    pub fn none() -> Self {
        Self {
            rsi: false,
            ema: false,
            bollinger: false,
            macd: false,
            volume: false,
        }
    }
}

impl Default for ActiveIndicators {
    fn default() -> Self {
        Self::all()
    }
}

/// Alert channel toggles. Read by alert dispatch, never by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertToggles {
    pub sound: bool,
    pub notification: bool,
    pub email: bool,
    pub telegram: bool,
}

impl Default for AlertToggles {
    fn default() -> Self {
        Self {
            sound: true,
            notification: true,
            email: false,
            telegram: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub timeframe: String,
    pub asset: String,
    /// Minimum window length accepted by `analyze_market`
    pub candles: usize,
    pub signal_timing: String,
    pub min_strength: Strength,
    pub active_indicators: ActiveIndicators,
    pub alerts: AlertToggles,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            timeframe: "1m".to_string(),
            asset: "EURUSD".to_string(),
            candles: 5,
            signal_timing: "instant".to_string(),
            min_strength: Strength::Medium,
            active_indicators: ActiveIndicators::default(),
            alerts: AlertToggles::default(),
        }
    }
}

impl EngineSettings {
    /// Shallow merge: every present field replaces the current one whole.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(timeframe) = update.timeframe {
            self.timeframe = timeframe;
        }
        if let Some(asset) = update.asset {
            self.asset = asset;
        }
        if let Some(candles) = update.candles {
            self.candles = candles;
        }
        if let Some(signal_timing) = update.signal_timing {
            self.signal_timing = signal_timing;
        }
        if let Some(min_strength) = update.min_strength {
            self.min_strength = min_strength;
        }
        if let Some(active_indicators) = update.active_indicators {
            self.active_indicators = active_indicators;
        }
        if let Some(alerts) = update.alerts {
            self.alerts = alerts;
        }
    }
}

/// Partial settings, typically deserialized from host input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    pub timeframe: Option<String>,
    pub asset: Option<String>,
    pub candles: Option<usize>,
    pub signal_timing: Option<String>,
    pub min_strength: Option<Strength>,
    pub active_indicators: Option<ActiveIndicators>,
    pub alerts: Option<AlertToggles>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self == &SettingsUpdate::default()
    }
}
