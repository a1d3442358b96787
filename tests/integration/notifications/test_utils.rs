use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use confluence::config::{EmailCredentials, TelegramCredentials};
use confluence::indicators::registry::IndicatorKind;
use confluence::models::{Condition, SignalType};
use confluence::notifications::{AlertChannel, AlertPayload, DailyReport};
use confluence::{NotifyError, SignalEngine};
use tokio::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BOT_TOKEN: &str = "123456:test-token";
pub const CHAT_ID: &str = "-1001234";

pub fn telegram_credentials() -> TelegramCredentials {
    TelegramCredentials {
        bot_token: BOT_TOKEN.to_string(),
        chat_id: CHAT_ID.to_string(),
    }
}

pub fn email_credentials() -> EmailCredentials {
    EmailCredentials {
        service_id: "service_abc".to_string(),
        template_id: "template_xyz".to_string(),
        user_id: "user_123".to_string(),
        recipient_email: "trader@example.com".to_string(),
    }
}

pub fn telegram_path() -> String {
    format!("/bot{}/sendMessage", BOT_TOKEN)
}

/// Payload of a strong buy with three matched indicators.
pub fn sample_payload() -> AlertPayload {
    let mut engine = SignalEngine::new();
    let signal = engine.create_signal(
        SignalType::Buy,
        vec![
            Condition::new(IndicatorKind::Rsi, "RSI < 30 (24.5)"),
            Condition::new(IndicatorKind::Ema, "EMA 5 > EMA 20 (1.1012 > 1.1003)"),
            Condition::new(IndicatorKind::Macd, "MACD bullish crossover (0.0004 > 0.0001)"),
            Condition::new(IndicatorKind::Volume, "High volume (2.1x average)"),
        ],
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 5).unwrap()),
        None,
    );
    AlertPayload::from_signal(&signal)
}

pub fn sample_report() -> DailyReport {
    DailyReport {
        date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        total: 4,
        successful: 3,
        success_rate: 75.0,
        buy_count: 3,
        sell_count: 1,
        strong_count: 1,
        medium_count: 2,
        weak_count: 1,
    }
}

pub async fn mock_telegram_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(telegram_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": true, "result": {"message_id": 1}})),
        )
        .mount(server)
        .await;
}

/// Channel that records what it was asked to deliver.
#[allow(dead_code)]
pub struct RecordingChannel {
    pub name: &'static str,
    pub configured: bool,
    pub reject: bool,
    pub attempts: AtomicUsize,
    pub alerts: Mutex<Vec<AlertPayload>>,
    pub reports: Mutex<Vec<DailyReport>>,
}

impl RecordingChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            configured: true,
            reject: false,
            attempts: AtomicUsize::new(0),
            alerts: Mutex::new(Vec::new()),
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured(name: &'static str) -> Self {
        Self {
            configured: false,
            ..Self::new(name)
        }
    }

    pub fn rejecting(name: &'static str) -> Self {
        Self {
            reject: true,
            ..Self::new(name)
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send_signal_alert(&self, payload: &AlertPayload) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(NotifyError::Rejected {
                channel: self.name,
                reason: "refused".to_string(),
            });
        }
        self.alerts.lock().await.push(payload.clone());
        Ok(())
    }

    async fn send_daily_report(&self, report: &DailyReport) -> Result<(), NotifyError> {
        self.reports.lock().await.push(report.clone());
        Ok(())
    }
}
