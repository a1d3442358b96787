//! Alert delivery: the channel interface, the flattened alert payload and the
//! fan-out dispatcher.

pub mod console;
pub mod dispatcher;
pub mod email;
pub mod report;
pub mod telegram;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::models::signal::{Signal, SignalType, Strength};

pub use console::{ConsoleNotifier, SoundNotifier};
pub use dispatcher::AlertDispatcher;
pub use email::EmailNotifier;
pub use report::DailyReport;
pub use telegram::TelegramNotifier;

/// A signal flattened for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub signal_id: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub asset: String,
    pub timeframe: String,
    /// `HH:MM:SS`, UTC
    pub time: String,
    pub strength: Strength,
    pub matched_indicators: Vec<String>,
}

impl AlertPayload {
    pub fn from_signal(signal: &Signal) -> Self {
        Self {
            signal_id: signal.id.clone(),
            signal_type: signal.signal_type,
            asset: signal.asset.clone(),
            timeframe: signal.timeframe.clone(),
            time: signal.timestamp.format("%H:%M:%S").to_string(),
            strength: signal.strength,
            matched_indicators: signal.matched_indicators(),
        }
    }

    /// One-line summary, e.g. `BUY EURUSD 1m (strong)`
    pub fn headline(&self) -> String {
        format!(
            "{} {} {} ({})",
            self.signal_type.as_str().to_uppercase(),
            self.asset,
            self.timeframe,
            self.strength
        )
    }
}

/// A destination for signal alerts and daily reports.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the channel has everything it needs to deliver.
    fn is_configured(&self) -> bool;

    async fn send_signal_alert(&self, payload: &AlertPayload) -> Result<(), NotifyError>;

    async fn send_daily_report(&self, report: &DailyReport) -> Result<(), NotifyError>;
}
