//! Telegram Bot API channel

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::get_telegram_api_url;
use crate::config::store::TelegramCredentials;
use crate::error::NotifyError;
use crate::models::signal::{SignalType, Strength};
use crate::notifications::{AlertChannel, AlertPayload, DailyReport};

const CHANNEL: &str = "telegram";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    credentials: Option<TelegramCredentials>,
}

impl TelegramNotifier {
    pub fn new(credentials: Option<TelegramCredentials>) -> Self {
        Self::with_api_url(credentials, get_telegram_api_url())
    }

    pub fn with_api_url(credentials: Option<TelegramCredentials>, api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials: credentials.filter(TelegramCredentials::is_complete),
        }
    }

    /// Send an HTML-formatted message to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(NotifyError::NotConfigured(CHANNEL))?;

        let url = format!("{}/bot{}/sendMessage", self.api_url, credentials.bot_token);
        let body = SendMessageRequest {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response: SendMessageResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if response.ok {
            debug!(chat_id = %credentials.chat_id, "Telegram message delivered");
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                channel: CHANNEL,
                reason: response
                    .description
                    .unwrap_or_else(|| "ok=false".to_string()),
            })
        }
    }
}

fn strength_marker(strength: Strength) -> &'static str {
    match strength {
        Strength::Weak => "🔴",
        Strength::Medium => "🟡",
        Strength::Strong => "🟢",
    }
}

fn format_signal_message(payload: &AlertPayload) -> String {
    let direction = match payload.signal_type {
        SignalType::Buy => "🔼 BUY",
        SignalType::Sell => "🔽 SELL",
    };

    let mut message = format!("<b>{} signal</b>\n\n", direction);
    message.push_str(&format!("<b>Asset:</b> {}\n", payload.asset));
    message.push_str(&format!("<b>Timeframe:</b> {}\n", payload.timeframe));
    message.push_str(&format!("<b>Time:</b> {}\n", payload.time));
    message.push_str(&format!(
        "<b>Strength:</b> {} {}\n\n",
        strength_marker(payload.strength),
        payload.strength
    ));
    message.push_str("<b>Matched indicators:</b>\n");
    for indicator in &payload.matched_indicators {
        message.push_str(&format!("✅ {}\n", escape_html(indicator)));
    }
    message
}

fn format_report_message(report: &DailyReport) -> String {
    format!(
        "<b>📊 Daily signal report {}</b>\n\n\
         <b>Total signals:</b> {}\n\
         <b>Successful:</b> {}\n\
         <b>Success rate:</b> {:.1}%\n\n\
         <b>Direction:</b>\n🔼 Buy: {}\n🔽 Sell: {}\n\n\
         <b>Strength:</b>\n🟢 Strong: {}\n🟡 Medium: {}\n🔴 Weak: {}\n",
        report.date,
        report.total,
        report.successful,
        report.success_rate,
        report.buy_count,
        report.sell_count,
        report.strong_count,
        report.medium_count,
        report.weak_count,
    )
}

// Condition descriptions carry `<` and `>`.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[async_trait]
impl AlertChannel for TelegramNotifier {
    fn name(&self) -> &'static str {
        CHANNEL
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn send_signal_alert(&self, payload: &AlertPayload) -> Result<(), NotifyError> {
        self.send_message(&format_signal_message(payload)).await
    }

    async fn send_daily_report(&self, report: &DailyReport) -> Result<(), NotifyError> {
        self.send_message(&format_report_message(report)).await
    }
}
