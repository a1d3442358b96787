//! Per-indicator directional rules and vote aggregation

use serde::{Deserialize, Serialize};

use crate::config::settings::ActiveIndicators;
use crate::indicators::registry::IndicatorKind;
use crate::models::indicators::{
    BollingerBandsIndicator, IndicatorSnapshot, MacdIndicator, VolumeIndicator,
};
use crate::models::signal::Condition;
use crate::signals::thresholds::IndicatorThresholds;

/// Buy and sell vote sets for one evaluation cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalConditions {
    pub buy: Vec<Condition>,
    pub sell: Vec<Condition>,
}

impl SignalConditions {
    pub fn is_empty(&self) -> bool {
        self.buy.is_empty() && self.sell.is_empty()
    }

    fn push(&mut self, vote: Vote) {
        match vote {
            Vote::Buy(condition) => self.buy.push(condition),
            Vote::Sell(condition) => self.sell.push(condition),
            Vote::Neutral => {}
        }
    }
}

enum Vote {
    Buy(Condition),
    Sell(Condition),
    Neutral,
}

/// Turns an indicator snapshot into buy/sell vote sets
pub struct Aggregator;

impl Aggregator {
    /// Evaluate every enabled indicator against the snapshot.
    ///
    /// Conditions are appended in evaluation order (RSI, EMA, Bollinger,
    /// MACD, Volume). Volume never votes alone: it is appended to a set only
    /// when that set already holds a directional vote.
    pub fn analyze(
        snapshot: &IndicatorSnapshot,
        current_price: Option<f64>,
        active: &ActiveIndicators,
        thresholds: &IndicatorThresholds,
    ) -> SignalConditions {
        let mut conditions = SignalConditions::default();

        for kind in IndicatorKind::enabled(active) {
            match kind {
                IndicatorKind::Rsi => {
                    if let Some(rsi) = snapshot.rsi {
                        conditions.push(Self::analyze_rsi(rsi, thresholds));
                    }
                }
                IndicatorKind::Ema => {
                    if let (Some(short), Some(long)) = (snapshot.ema_short, snapshot.ema_long) {
                        conditions.push(Self::analyze_ema(short, long));
                    }
                }
                IndicatorKind::Bollinger => {
                    if let (Some(bands), Some(price)) = (snapshot.bollinger.as_ref(), current_price) {
                        conditions.push(Self::analyze_bollinger(price, bands));
                    }
                }
                IndicatorKind::Macd => {
                    if let Some(macd) = snapshot.macd.as_ref() {
                        conditions.push(Self::analyze_macd(macd));
                    }
                }
                IndicatorKind::Volume => {
                    if let Some(volume) = snapshot.volume.as_ref() {
                        Self::amplify_with_volume(&mut conditions, volume, thresholds);
                    }
                }
            }
        }

        conditions
    }

    fn analyze_rsi(rsi: f64, thresholds: &IndicatorThresholds) -> Vote {
        if rsi < thresholds.rsi_oversold {
            Vote::Buy(Condition::new(
                IndicatorKind::Rsi,
                format!("RSI < {} ({})", thresholds.rsi_oversold, rsi),
            ))
        } else if rsi > thresholds.rsi_overbought {
            Vote::Sell(Condition::new(
                IndicatorKind::Rsi,
                format!("RSI > {} ({})", thresholds.rsi_overbought, rsi),
            ))
        } else {
            Vote::Neutral
        }
    }

    fn analyze_ema(short: f64, long: f64) -> Vote {
        if short > long {
            Vote::Buy(Condition::new(
                IndicatorKind::Ema,
                format!("EMA 5 > EMA 20 ({} > {})", short, long),
            ))
        } else if short < long {
            Vote::Sell(Condition::new(
                IndicatorKind::Ema,
                format!("EMA 5 < EMA 20 ({} < {})", short, long),
            ))
        } else {
            Vote::Neutral
        }
    }

    fn analyze_bollinger(price: f64, bands: &BollingerBandsIndicator) -> Vote {
        if price <= bands.lower {
            Vote::Buy(Condition::new(
                IndicatorKind::Bollinger,
                format!("Price at/below lower band ({} <= {})", price, bands.lower),
            ))
        } else if price >= bands.upper {
            Vote::Sell(Condition::new(
                IndicatorKind::Bollinger,
                format!("Price at/above upper band ({} >= {})", price, bands.upper),
            ))
        } else {
            Vote::Neutral
        }
    }

    fn analyze_macd(macd: &MacdIndicator) -> Vote {
        if macd.macd > macd.signal && macd.histogram > 0.0 {
            Vote::Buy(Condition::new(
                IndicatorKind::Macd,
                format!("MACD bullish crossover ({} > {})", macd.macd, macd.signal),
            ))
        } else if macd.macd < macd.signal && macd.histogram < 0.0 {
            Vote::Sell(Condition::new(
                IndicatorKind::Macd,
                format!("MACD bearish crossover ({} < {})", macd.macd, macd.signal),
            ))
        } else {
            Vote::Neutral
        }
    }

    fn amplify_with_volume(
        conditions: &mut SignalConditions,
        volume: &VolumeIndicator,
        thresholds: &IndicatorThresholds,
    ) {
        if volume.ratio <= thresholds.volume_significant {
            return;
        }

        let condition = Condition::new(
            IndicatorKind::Volume,
            format!("High volume ({}x average)", volume.ratio),
        );
        if !conditions.buy.is_empty() {
            conditions.buy.push(condition.clone());
        }
        if !conditions.sell.is_empty() {
            conditions.sell.push(condition);
        }
    }
}
