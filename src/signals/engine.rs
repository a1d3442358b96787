//! Signal engine: indicator computation, voting and the in-memory signal log.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::settings::{EngineSettings, SettingsUpdate};
use crate::indicators::{
    analyze_volume, calculate_bollinger_bands, calculate_ema, calculate_macd_default,
    calculate_rsi, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_STD_DEV, DEFAULT_RSI_PERIOD,
    DEFAULT_VOLUME_PERIOD, LONG_EMA_PERIOD, SHORT_EMA_PERIOD,
};
use crate::models::indicators::{IndicatorSnapshot, PriceWindow};
use crate::models::signal::{Condition, Signal, SignalResult, SignalType, Strength};
use crate::signals::aggregation::{Aggregator, SignalConditions};
use crate::signals::thresholds::IndicatorThresholds;

/// Owns the trading configuration, the last indicator snapshot and the
/// signal log. One engine per asset stream; nothing is global.
#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    settings: EngineSettings,
    thresholds: IndicatorThresholds,
    indicators: IndicatorSnapshot,
    signals: Vec<Signal>,
    current: Option<usize>,
}

impl SignalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Shallow-merge `update` into the configuration. Takes effect on the next cycle.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
        debug!(settings = ?self.settings, "Engine settings updated");
    }

    /// Indicator values from the most recent cycle
    pub fn indicators(&self) -> &IndicatorSnapshot {
        &self.indicators
    }

    /// Run one evaluation cycle.
    ///
    /// Returns the emitted signal, or `None` when the window is too short or
    /// not enough indicators agree.
    pub fn analyze_market(&mut self, window: &PriceWindow) -> Option<Signal> {
        if window.prices.len() < self.settings.candles {
            warn!(
                asset = ?window.asset,
                received = window.prices.len(),
                required = self.settings.candles,
                "Insufficient data for analysis"
            );
            return None;
        }

        self.indicators = self.calculate_indicators(&window.prices, window.volumes.as_deref());
        let conditions = self.analyze_indicators(&self.indicators, window.current_price());

        let threshold = self.settings.min_strength.threshold();
        debug!(
            buy_votes = conditions.buy.len(),
            sell_votes = conditions.sell.len(),
            threshold,
            "Votes tallied"
        );

        let SignalConditions { buy, sell } = conditions;
        if buy.len() >= threshold {
            Some(self.create_signal(SignalType::Buy, buy, Some(window.timestamp), window.asset.clone()))
        } else if sell.len() >= threshold {
            Some(self.create_signal(SignalType::Sell, sell, Some(window.timestamp), window.asset.clone()))
        } else {
            None
        }
    }

    /// Compute every enabled indicator over the full window.
    ///
    /// The volume indicator is skipped when no volumes are supplied.
    pub fn calculate_indicators(&self, prices: &[f64], volumes: Option<&[f64]>) -> IndicatorSnapshot {
        let active = &self.settings.active_indicators;
        let mut snapshot = IndicatorSnapshot::new();

        if active.rsi {
            snapshot.rsi = calculate_rsi(prices, DEFAULT_RSI_PERIOD);
        }

        if active.ema {
            snapshot.ema_short = calculate_ema(prices, SHORT_EMA_PERIOD);
            snapshot.ema_long = calculate_ema(prices, LONG_EMA_PERIOD);
        }

        if active.bollinger {
            snapshot.bollinger =
                calculate_bollinger_bands(prices, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_STD_DEV);
        }

        if active.macd {
            snapshot.macd = calculate_macd_default(prices);
        }

        if active.volume {
            snapshot.volume = volumes.and_then(|v| analyze_volume(v, DEFAULT_VOLUME_PERIOD));
        }

        snapshot
    }

    /// Apply the directional rules to a snapshot.
    ///
    /// `current_price` is the latest price of the window and drives the
    /// Bollinger rule; with no price that rule does not vote.
    pub fn analyze_indicators(
        &self,
        snapshot: &IndicatorSnapshot,
        current_price: Option<f64>,
    ) -> SignalConditions {
        Aggregator::analyze(
            snapshot,
            current_price,
            &self.settings.active_indicators,
            &self.thresholds,
        )
    }

    /// Materialize a signal, append it to the log and make it current.
    ///
    /// A missing `asset` falls back to the configured asset and a missing
    /// `timestamp` to now.
    pub fn create_signal(
        &mut self,
        signal_type: SignalType,
        conditions: Vec<Condition>,
        timestamp: Option<DateTime<Utc>>,
        asset: Option<String>,
    ) -> Signal {
        let timestamp = timestamp.unwrap_or_else(Utc::now);
        let signal = Signal {
            id: generate_signal_id(timestamp),
            signal_type,
            asset: asset.unwrap_or_else(|| self.settings.asset.clone()),
            timeframe: self.settings.timeframe.clone(),
            timestamp,
            strength: Strength::from_condition_count(conditions.len()),
            conditions,
            result: None,
            profit_loss: None,
        };

        info!(
            id = %signal.id,
            signal_type = %signal.signal_type,
            asset = %signal.asset,
            strength = %signal.strength,
            conditions = signal.conditions.len(),
            "Signal created"
        );

        self.signals.push(signal.clone());
        self.current = Some(self.signals.len() - 1);
        signal
    }

    /// Record the outcome of a signal.
    ///
    /// Unknown ids are ignored. An outcome is written once; later calls for
    /// the same id leave the first outcome in place.
    pub fn update_signal_result(&mut self, id: &str, result: SignalResult, profit_loss: f64) {
        match self.signals.iter_mut().find(|s| s.id == id) {
            Some(signal) if signal.result.is_none() => {
                signal.result = Some(result);
                signal.profit_loss = Some(profit_loss);
                debug!(id, result = result.as_str(), profit_loss, "Signal result recorded");
            }
            Some(_) => {
                debug!(id, "Signal already resolved, keeping first result");
            }
            None => {
                debug!(id, "No signal with this id, result ignored");
            }
        }
    }

    pub fn get_all_signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn get_current_signal(&self) -> Option<&Signal> {
        self.current.and_then(|idx| self.signals.get(idx))
    }

    /// Drop the whole log and the current-signal pointer
    pub fn clear_signals(&mut self) {
        self.signals.clear();
        self.current = None;
    }
}

fn generate_signal_id(timestamp: DateTime<Utc>) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("signal_{}_{:06}", timestamp.timestamp_millis(), suffix)
}
