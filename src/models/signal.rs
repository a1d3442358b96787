use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicators::registry::IndicatorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Buy,
    Sell,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Buy => "buy",
            SignalType::Sell => "sell",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative grade of a signal, ordered `Weak < Medium < Strong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    /// Minimum number of agreeing conditions required to emit at this grade.
    pub fn threshold(&self) -> usize {
        match self {
            Strength::Weak => 2,
            Strength::Medium => 3,
            Strength::Strong => 4,
        }
    }

    /// Grade of a signal backed by `count` conditions.
    pub fn from_condition_count(count: usize) -> Self {
        if count >= Strength::Strong.threshold() {
            Strength::Strong
        } else if count >= Strength::Medium.threshold() {
            Strength::Medium
        } else {
            Strength::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weak" => Ok(Strength::Weak),
            "medium" => Ok(Strength::Medium),
            "strong" => Ok(Strength::Strong),
            other => Err(format!("unknown strength '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalResult {
    Profit,
    Loss,
}

impl SignalResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalResult::Profit => "profit",
            SignalResult::Loss => "loss",
        }
    }
}

/// A vote cast by one indicator, with a human-readable justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub indicator: IndicatorKind,
    pub description: String,
}

impl Condition {
    pub fn new(indicator: IndicatorKind, description: impl Into<String>) -> Self {
        Self {
            indicator,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub asset: String,
    pub timeframe: String,
    pub timestamp: DateTime<Utc>,
    pub conditions: Vec<Condition>,
    pub strength: Strength,
    pub result: Option<SignalResult>,
    pub profit_loss: Option<f64>,
}

impl Signal {
    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    /// Descriptions of the conditions backing this signal, in evaluation order.
    pub fn matched_indicators(&self) -> Vec<String> {
        self.conditions.iter().map(|c| c.description.clone()).collect()
    }
}
