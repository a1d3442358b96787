//! Local channels: log-line notification and terminal bell

use std::io::Write;

use async_trait::async_trait;
use tracing::info;

use crate::error::NotifyError;
use crate::notifications::{AlertChannel, AlertPayload, DailyReport};

/// On-screen notification as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

#[async_trait]
impl AlertChannel for ConsoleNotifier {
    fn name(&self) -> &'static str {
        "notification"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn send_signal_alert(&self, payload: &AlertPayload) -> Result<(), NotifyError> {
        info!(
            id = %payload.signal_id,
            time = %payload.time,
            indicators = ?payload.matched_indicators,
            "{}",
            payload.headline()
        );
        Ok(())
    }

    async fn send_daily_report(&self, report: &DailyReport) -> Result<(), NotifyError> {
        info!(
            date = %report.date,
            total = report.total,
            successful = report.successful,
            success_rate = report.success_rate,
            "Daily report"
        );
        Ok(())
    }
}

/// Audible alert: rings the terminal bell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoundNotifier;

#[async_trait]
impl AlertChannel for SoundNotifier {
    fn name(&self) -> &'static str {
        "sound"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn send_signal_alert(&self, _payload: &AlertPayload) -> Result<(), NotifyError> {
        let mut stdout = std::io::stdout();
        // A closed terminal is not a delivery failure.
        let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        Ok(())
    }

    async fn send_daily_report(&self, _report: &DailyReport) -> Result<(), NotifyError> {
        Ok(())
    }
}
