//! Fixed directional thresholds for the voting indicators

/// RSI zones and the volume spike ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorThresholds {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub volume_significant: f64,
}

impl IndicatorThresholds {
    pub const RSI_OVERSOLD: f64 = 30.0;
    pub const RSI_OVERBOUGHT: f64 = 70.0;
    pub const VOLUME_SIGNIFICANT: f64 = 1.5;
}

impl Default for IndicatorThresholds {
    fn default() -> Self {
        Self {
            rsi_oversold: Self::RSI_OVERSOLD,
            rsi_overbought: Self::RSI_OVERBOUGHT,
            volume_significant: Self::VOLUME_SIGNIFICANT,
        }
    }
}
