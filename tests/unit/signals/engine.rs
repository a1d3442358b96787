//! Unit tests for signal engine

use chrono::{TimeZone, Utc};
use confluence::config::{ActiveIndicators, EngineSettings, SettingsUpdate};
use confluence::indicators::registry::IndicatorKind;
use confluence::models::{Condition, PriceWindow, SignalResult, SignalType, Strength};
use confluence::signals::engine::SignalEngine;

fn conditions(count: usize) -> Vec<Condition> {
    IndicatorKind::EVALUATION_ORDER
        .iter()
        .take(count)
        .map(|kind| Condition::new(*kind, format!("{} agrees", kind)))
        .collect()
}

#[test]
fn test_new_engine_is_empty() {
    let engine = SignalEngine::new();
    assert!(engine.get_all_signals().is_empty());
    assert!(engine.get_current_signal().is_none());
    assert_eq!(engine.settings(), &EngineSettings::default());
}

#[test]
fn test_analyze_short_window_returns_none() {
    let mut engine = SignalEngine::new();
    let window = PriceWindow::new("EURUSD", vec![1.1, 1.2, 1.3], Utc::now());
    assert!(engine.analyze_market(&window).is_none());
    assert!(engine.get_all_signals().is_empty());
}

#[test]
fn test_create_signal_fills_defaults() {
    let mut engine = SignalEngine::new();
    let signal = engine.create_signal(SignalType::Buy, conditions(3), None, None);

    assert_eq!(signal.asset, "EURUSD");
    assert_eq!(signal.timeframe, "1m");
    assert_eq!(signal.strength, Strength::Medium);
    assert!(signal.result.is_none());
    assert!(signal.profit_loss.is_none());
    assert!(signal.id.starts_with("signal_"));
    assert_eq!(engine.get_current_signal(), Some(&signal));
}

#[test]
fn test_signal_id_embeds_timestamp() {
    let mut engine = SignalEngine::new();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let signal = engine.create_signal(SignalType::Sell, conditions(2), Some(at), Some("GBPUSD".into()));

    let prefix = format!("signal_{}_", at.timestamp_millis());
    assert!(signal.id.starts_with(&prefix));
    assert_eq!(signal.asset, "GBPUSD");
    assert_eq!(signal.timestamp, at);
}

#[test]
fn test_strength_from_condition_count() {
    let mut engine = SignalEngine::new();
    let grades: Vec<Strength> = (2..=5)
        .map(|n| engine.create_signal(SignalType::Buy, conditions(n), None, None).strength)
        .collect();
    assert_eq!(
        grades,
        vec![Strength::Weak, Strength::Medium, Strength::Strong, Strength::Strong]
    );
}

#[test]
fn test_current_signal_tracks_latest() {
    let mut engine = SignalEngine::new();
    engine.create_signal(SignalType::Buy, conditions(2), None, None);
    let second = engine.create_signal(SignalType::Sell, conditions(4), None, None);

    assert_eq!(engine.get_all_signals().len(), 2);
    assert_eq!(engine.get_current_signal().map(|s| s.id.as_str()), Some(second.id.as_str()));
}

#[test]
fn test_update_signal_result() {
    let mut engine = SignalEngine::new();
    let signal = engine.create_signal(SignalType::Buy, conditions(3), None, None);

    engine.update_signal_result(&signal.id, SignalResult::Profit, 1.0);

    let stored = &engine.get_all_signals()[0];
    assert_eq!(stored.result, Some(SignalResult::Profit));
    assert_eq!(stored.profit_loss, Some(1.0));
    assert!(stored.is_resolved());
}

#[test]
fn test_update_signal_result_keeps_first_outcome() {
    let mut engine = SignalEngine::new();
    let signal = engine.create_signal(SignalType::Buy, conditions(3), None, None);

    engine.update_signal_result(&signal.id, SignalResult::Profit, 1.0);
    engine.update_signal_result(&signal.id, SignalResult::Loss, -1.0);

    let stored = &engine.get_all_signals()[0];
    assert_eq!(stored.result, Some(SignalResult::Profit));
    assert_eq!(stored.profit_loss, Some(1.0));
}

#[test]
fn test_update_unknown_signal_is_noop() {
    let mut engine = SignalEngine::new();
    engine.create_signal(SignalType::Buy, conditions(3), None, None);
    let before = engine.get_all_signals().to_vec();

    engine.update_signal_result("signal_0_000000", SignalResult::Loss, -1.0);

    assert_eq!(engine.get_all_signals(), before.as_slice());
}

#[test]
fn test_clear_signals() {
    let mut engine = SignalEngine::new();
    engine.create_signal(SignalType::Buy, conditions(3), None, None);
    engine.clear_signals();

    assert!(engine.get_all_signals().is_empty());
    assert!(engine.get_current_signal().is_none());
}

#[test]
fn test_update_settings_is_shallow_merge() {
    let mut engine = SignalEngine::new();
    engine.update_settings(SettingsUpdate {
        asset: Some("BTCUSD".to_string()),
        min_strength: Some(Strength::Strong),
        active_indicators: Some(ActiveIndicators {
            volume: false,
            ..ActiveIndicators::all()
        }),
        ..SettingsUpdate::default()
    });

    let settings = engine.settings();
    assert_eq!(settings.asset, "BTCUSD");
    assert_eq!(settings.min_strength, Strength::Strong);
    assert!(!settings.active_indicators.volume);
    assert!(settings.active_indicators.rsi);
    assert_eq!(settings.timeframe, "1m");
    assert_eq!(settings.candles, 5);
}

#[test]
fn test_calculate_indicators_respects_toggles_and_volumes() {
    let mut engine = SignalEngine::new();
    let prices: Vec<f64> = (0..40).map(|i| 1.1 + i as f64 * 0.001).collect();

    let snapshot = engine.calculate_indicators(&prices, None);
    assert!(snapshot.rsi.is_some());
    assert!(snapshot.ema_short.is_some() && snapshot.ema_long.is_some());
    assert!(snapshot.bollinger.is_some());
    assert!(snapshot.macd.is_some());
    assert!(snapshot.volume.is_none());

    engine.update_settings(SettingsUpdate {
        active_indicators: Some(ActiveIndicators {
            rsi: true,
            ..ActiveIndicators::none()
        }),
        ..SettingsUpdate::default()
    });
    let volumes = vec![100.0; 40];
    let snapshot = engine.calculate_indicators(&prices, Some(&volumes));
    assert!(snapshot.rsi.is_some());
    assert!(snapshot.macd.is_none());
    assert!(snapshot.volume.is_none());
}

#[test]
fn test_short_window_yields_partial_snapshot() {
    let engine = SignalEngine::new();
    let prices: Vec<f64> = (0..10).map(|i| 1.1 + i as f64 * 0.001).collect();
    let snapshot = engine.calculate_indicators(&prices, None);

    assert!(snapshot.rsi.is_none());
    assert!(snapshot.ema_short.is_some());
    assert!(snapshot.ema_long.is_none());
    assert!(snapshot.bollinger.is_none());
    assert!(snapshot.macd.is_none());
}
