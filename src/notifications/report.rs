use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::signal::{Signal, SignalResult, SignalType, Strength};

/// Aggregate performance over a set of signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub total: usize,
    pub successful: usize,
    /// Percentage of profitable signals, one decimal
    pub success_rate: f64,
    pub buy_count: usize,
    pub sell_count: usize,
    pub strong_count: usize,
    pub medium_count: usize,
    pub weak_count: usize,
}

impl DailyReport {
    pub fn from_signals(signals: &[Signal], date: NaiveDate) -> Self {
        let total = signals.len();
        let successful = signals
            .iter()
            .filter(|s| s.result == Some(SignalResult::Profit))
            .count();
        let success_rate = if total == 0 {
            0.0
        } else {
            (successful as f64 / total as f64 * 1000.0).round() / 10.0
        };

        let count_type = |t: SignalType| signals.iter().filter(|s| s.signal_type == t).count();
        let count_strength = |g: Strength| signals.iter().filter(|s| s.strength == g).count();

        Self {
            date,
            total,
            successful,
            success_rate,
            buy_count: count_type(SignalType::Buy),
            sell_count: count_type(SignalType::Sell),
            strong_count: count_strength(Strength::Strong),
            medium_count: count_strength(Strength::Medium),
            weak_count: count_strength(Strength::Weak),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Plain-text body shared by the text-based channels.
    pub fn render_text(&self) -> String {
        format!(
            "Daily signal report {}\n\n\
             Total signals: {}\n\
             Successful: {}\n\
             Success rate: {:.1}%\n\n\
             Buy: {}\nSell: {}\n\n\
             Strong: {}\nMedium: {}\nWeak: {}\n",
            self.date,
            self.total,
            self.successful,
            self.success_rate,
            self.buy_count,
            self.sell_count,
            self.strong_count,
            self.medium_count,
            self.weak_count,
        )
    }
}
