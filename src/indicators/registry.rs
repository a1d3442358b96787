//! Indicator registry: the fixed set of voting indicators

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::settings::ActiveIndicators;

/// The indicators that can vote in an evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "EMA")]
    Ema,
    Bollinger,
    #[serde(rename = "MACD")]
    Macd,
    Volume,
}

impl IndicatorKind {
    /// All indicators in evaluation order. Conditions are appended in this order.
    pub const EVALUATION_ORDER: [IndicatorKind; 5] = [
        IndicatorKind::Rsi,
        IndicatorKind::Ema,
        IndicatorKind::Bollinger,
        IndicatorKind::Macd,
        IndicatorKind::Volume,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Ema => "EMA",
            IndicatorKind::Bollinger => "Bollinger",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Volume => "Volume",
        }
    }

    pub fn is_enabled(&self, active: &ActiveIndicators) -> bool {
        match self {
            IndicatorKind::Rsi => active.rsi,
            IndicatorKind::Ema => active.ema,
            IndicatorKind::Bollinger => active.bollinger,
            IndicatorKind::Macd => active.macd,
            IndicatorKind::Volume => active.volume,
        }
    }

    /// Enabled indicators, in evaluation order
    pub fn enabled(active: &ActiveIndicators) -> Vec<IndicatorKind> {
        Self::EVALUATION_ORDER
            .iter()
            .copied()
            .filter(|kind| kind.is_enabled(active))
            .collect()
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
