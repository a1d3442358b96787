//! Fan-out of alerts to every enabled channel

use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::config::settings::AlertToggles;
use crate::config::store::StoredSettings;
use crate::error::NotifyError;
use crate::notifications::{
    AlertChannel, AlertPayload, ConsoleNotifier, DailyReport, EmailNotifier, SoundNotifier,
    TelegramNotifier,
};

/// Total delivery attempts per channel, first try included
const MAX_ATTEMPTS: usize = 3;

fn retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(200))
        .with_max_delay(Duration::from_secs(2))
        .with_max_times(MAX_ATTEMPTS - 1)
}

/// Sends each alert to every enabled channel on its own task.
///
/// Delivery is fire-and-forget: failures are logged, never surfaced to the
/// evaluation loop.
#[derive(Clone, Default)]
pub struct AlertDispatcher {
    channels: Vec<Arc<dyn AlertChannel>>,
}

impl AlertDispatcher {
    pub fn new(channels: Vec<Arc<dyn AlertChannel>>) -> Self {
        Self { channels }
    }

    /// Build the channel set selected by `toggles`, using stored credentials.
    pub fn from_settings(toggles: &AlertToggles, stored: &StoredSettings) -> Self {
        let mut channels: Vec<Arc<dyn AlertChannel>> = Vec::new();

        if toggles.sound {
            channels.push(Arc::new(SoundNotifier));
        }
        if toggles.notification {
            channels.push(Arc::new(ConsoleNotifier));
        }
        if toggles.email {
            channels.push(Arc::new(EmailNotifier::new(stored.email.clone())));
        }
        if toggles.telegram {
            channels.push(Arc::new(TelegramNotifier::new(stored.telegram.clone())));
        }

        Self { channels }
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Spawn one delivery task per ready channel.
    ///
    /// Enabled channels missing credentials are logged and skipped. The
    /// returned handles may be dropped.
    pub fn dispatch(&self, payload: AlertPayload) -> Vec<JoinHandle<Result<(), NotifyError>>> {
        let payload = Arc::new(payload);

        self.ready_channels()
            .map(|channel| {
                let payload = payload.clone();
                tokio::spawn(async move {
                    let name = channel.name();
                    let result = (|| async { channel.send_signal_alert(&payload).await })
                        .retry(retry_policy())
                        .when(NotifyError::is_transient)
                        .notify(|err, delay| {
                            warn!(channel = name, error = %err, ?delay, "Alert delivery failed, retrying")
                        })
                        .await;
                    log_outcome(name, &payload.signal_id, &result);
                    result
                })
            })
            .collect()
    }

    /// Spawn one report task per ready channel. Empty reports are not sent.
    pub fn dispatch_report(&self, report: DailyReport) -> Vec<JoinHandle<Result<(), NotifyError>>> {
        if report.is_empty() {
            debug!(date = %report.date, "No signals to report");
            return Vec::new();
        }

        let report = Arc::new(report);

        self.ready_channels()
            .map(|channel| {
                let report = report.clone();
                tokio::spawn(async move {
                    let name = channel.name();
                    let result = (|| async { channel.send_daily_report(&report).await })
                        .retry(retry_policy())
                        .when(NotifyError::is_transient)
                        .await;
                    if let Err(e) = &result {
                        error!(channel = name, error = %e, "Daily report delivery failed");
                    }
                    result
                })
            })
            .collect()
    }

    fn ready_channels(&self) -> impl Iterator<Item = Arc<dyn AlertChannel>> + '_ {
        self.channels.iter().filter_map(|channel| {
            if channel.is_configured() {
                Some(channel.clone())
            } else {
                error!(channel = channel.name(), "Alert channel enabled but not configured, skipping");
                None
            }
        })
    }
}

fn log_outcome(channel: &str, signal_id: &str, result: &Result<(), NotifyError>) {
    match result {
        Ok(()) => debug!(channel, signal_id, "Alert delivered"),
        Err(e) => error!(channel, signal_id, error = %e, "Alert delivery failed"),
    }
}
