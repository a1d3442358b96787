//! Integration tests for alert delivery against mocked Telegram and EmailJS APIs

#[path = "notifications/test_utils.rs"]
mod test_utils;

use std::sync::Arc;

use confluence::config::{AlertToggles, StoredSettings};
use confluence::notifications::{
    AlertChannel, AlertDispatcher, DailyReport, EmailNotifier, TelegramNotifier,
};
use confluence::NotifyError;
use serde_json::Value;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use test_utils::*;

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("wiremock requests")
        .iter()
        .map(|req| serde_json::from_slice(&req.body).expect("json body"))
        .collect()
}

#[tokio::test]
async fn telegram_alert_is_posted_as_html() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(telegram_path()))
        .and(body_partial_json(serde_json::json!({
            "chat_id": CHAT_ID,
            "parse_mode": "HTML"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_api_url(Some(telegram_credentials()), server.uri());
    assert!(notifier.is_configured());
    notifier
        .send_signal_alert(&sample_payload())
        .await
        .expect("alert delivered");

    let bodies = request_bodies(&server).await;
    let text = bodies[0]["text"].as_str().unwrap();
    assert!(text.contains("BUY signal"));
    assert!(text.contains("<b>Asset:</b> EURUSD"));
    assert!(text.contains("<b>Time:</b> 14:30:05"));
    assert!(text.contains("strong"));
    assert!(text.contains("RSI &lt; 30 (24.5)"));
    assert!(text.contains("EMA 5 &gt; EMA 20"));
}

#[tokio::test]
async fn telegram_rejection_carries_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(telegram_path()))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_api_url(Some(telegram_credentials()), server.uri());
    let err = notifier.send_message("hello").await.unwrap_err();

    match err {
        NotifyError::Rejected { channel, reason } => {
            assert_eq!(channel, "telegram");
            assert_eq!(reason, "Bad Request: chat not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn telegram_without_credentials_sends_nothing() {
    let server = MockServer::start().await;
    let mut creds = telegram_credentials();
    creds.chat_id.clear();

    let notifier = TelegramNotifier::with_api_url(Some(creds), server.uri());
    assert!(!notifier.is_configured());

    let err = notifier.send_message("hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::NotConfigured("telegram")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn telegram_daily_report() {
    let server = MockServer::start().await;
    mock_telegram_ok(&server).await;

    let notifier = TelegramNotifier::with_api_url(Some(telegram_credentials()), server.uri());
    notifier
        .send_daily_report(&sample_report())
        .await
        .expect("report delivered");

    let bodies = request_bodies(&server).await;
    let text = bodies[0]["text"].as_str().unwrap();
    assert!(text.contains("Daily signal report 2024-05-01"));
    assert!(text.contains("<b>Success rate:</b> 75.0%"));
}

#[tokio::test]
async fn email_alert_posts_template_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .and(body_partial_json(serde_json::json!({
            "service_id": "service_abc",
            "template_id": "template_xyz",
            "user_id": "user_123",
            "template_params": {"to_email": "trader@example.com"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = EmailNotifier::with_api_url(Some(email_credentials()), server.uri());
    notifier
        .send_signal_alert(&sample_payload())
        .await
        .expect("email delivered");

    let bodies = request_bodies(&server).await;
    let params = &bodies[0]["template_params"];
    assert_eq!(params["subject"], "New buy signal: EURUSD (1m)");
    let message = params["message"].as_str().unwrap();
    assert!(message.contains("Strength: strong"));
    assert!(message.contains("- RSI < 30 (24.5)"));
}

#[tokio::test]
async fn email_non_200_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(400).set_body_string("The user ID is invalid"))
        .mount(&server)
        .await;

    let notifier = EmailNotifier::with_api_url(Some(email_credentials()), server.uri());
    let err = notifier
        .send_daily_report(&sample_report())
        .await
        .unwrap_err();

    match err {
        NotifyError::Rejected { channel, reason } => {
            assert_eq!(channel, "email");
            assert!(reason.starts_with("400"));
            assert!(reason.contains("The user ID is invalid"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn dispatcher_skips_unconfigured_channels() {
    let ready = Arc::new(RecordingChannel::new("ready"));
    let missing = Arc::new(RecordingChannel::unconfigured("missing"));
    let dispatcher = AlertDispatcher::new(vec![ready.clone(), missing.clone()]);

    let handles = dispatcher.dispatch(sample_payload());
    assert_eq!(handles.len(), 1);
    for handle in handles {
        handle.await.unwrap().expect("delivered");
    }

    assert_eq!(ready.alerts.lock().await.len(), 1);
    assert_eq!(missing.attempts(), 0);
}

#[tokio::test]
async fn dispatcher_does_not_retry_rejections() {
    let rejecting = Arc::new(RecordingChannel::rejecting("rejecting"));
    let dispatcher = AlertDispatcher::new(vec![rejecting.clone()]);

    for handle in dispatcher.dispatch(sample_payload()) {
        assert!(handle.await.unwrap().is_err());
    }
    assert_eq!(rejecting.attempts(), 1);
}

#[tokio::test]
async fn dispatcher_retries_transport_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(telegram_path()))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .expect(3)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_api_url(Some(telegram_credentials()), server.uri());
    let dispatcher = AlertDispatcher::new(vec![Arc::new(notifier)]);

    for handle in dispatcher.dispatch(sample_payload()) {
        let err = handle.await.unwrap().unwrap_err();
        assert!(err.is_transient());
    }
}

#[tokio::test]
async fn dispatcher_skips_empty_reports() {
    let channel = Arc::new(RecordingChannel::new("ready"));
    let dispatcher = AlertDispatcher::new(vec![channel.clone()]);

    let empty = DailyReport::from_signals(&[], chrono::Utc::now().date_naive());
    assert!(dispatcher.dispatch_report(empty).is_empty());

    for handle in dispatcher.dispatch_report(sample_report()) {
        handle.await.unwrap().expect("report delivered");
    }
    assert_eq!(channel.reports.lock().await.len(), 1);
}

#[tokio::test]
async fn dispatcher_from_toggles() {
    let toggles = AlertToggles {
        sound: false,
        notification: true,
        email: true,
        telegram: true,
    };
    let stored = StoredSettings {
        telegram: Some(telegram_credentials()),
        ..StoredSettings::default()
    };

    let dispatcher = AlertDispatcher::from_settings(&toggles, &stored);
    assert_eq!(dispatcher.channel_names(), vec!["notification", "email", "telegram"]);

    let defaults = AlertDispatcher::from_settings(&AlertToggles::default(), &stored);
    assert_eq!(defaults.channel_names(), vec!["sound", "notification"]);
}
