//! EmailJS REST channel

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::config::get_emailjs_api_url;
use crate::config::store::EmailCredentials;
use crate::error::NotifyError;
use crate::notifications::{AlertChannel, AlertPayload, DailyReport};

const CHANNEL: &str = "email";

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

pub struct EmailNotifier {
    client: reqwest::Client,
    api_url: String,
    credentials: Option<EmailCredentials>,
}

impl EmailNotifier {
    pub fn new(credentials: Option<EmailCredentials>) -> Self {
        Self::with_api_url(credentials, get_emailjs_api_url())
    }

    pub fn with_api_url(credentials: Option<EmailCredentials>, api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials: credentials.filter(EmailCredentials::is_complete),
        }
    }

    pub async fn send_email(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(NotifyError::NotConfigured(CHANNEL))?;

        let body = SendEmailRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.user_id,
            template_params: TemplateParams {
                to_email: &credentials.recipient_email,
                subject,
                message,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/v1.0/email/send", self.api_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(recipient = %credentials.recipient_email, "Email delivered");
            Ok(())
        } else {
            let reason = response.text().await.unwrap_or_default();
            Err(NotifyError::Rejected {
                channel: CHANNEL,
                reason: format!("{}: {}", status, reason),
            })
        }
    }
}

#[async_trait]
impl AlertChannel for EmailNotifier {
    fn name(&self) -> &'static str {
        CHANNEL
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn send_signal_alert(&self, payload: &AlertPayload) -> Result<(), NotifyError> {
        let subject = format!(
            "New {} signal: {} ({})",
            payload.signal_type, payload.asset, payload.timeframe
        );

        let mut message = format!(
            "A new {} signal was detected:\n\n\
             Asset: {}\nTimeframe: {}\nTime: {}\nStrength: {}\n\n\
             Matched indicators:\n",
            payload.signal_type, payload.asset, payload.timeframe, payload.time, payload.strength
        );
        for indicator in &payload.matched_indicators {
            message.push_str(&format!("- {}\n", indicator));
        }

        self.send_email(&subject, &message).await
    }

    async fn send_daily_report(&self, report: &DailyReport) -> Result<(), NotifyError> {
        let subject = format!("Daily trading signal report - {}", report.date);
        self.send_email(&subject, &report.render_text()).await
    }
}
