//! Unit tests for engine settings

use confluence::config::{ActiveIndicators, AlertToggles, EngineSettings, SettingsUpdate};
use confluence::models::Strength;

#[test]
fn test_defaults() {
    let settings = EngineSettings::default();
    assert_eq!(settings.timeframe, "1m");
    assert_eq!(settings.asset, "EURUSD");
    assert_eq!(settings.candles, 5);
    assert_eq!(settings.signal_timing, "instant");
    assert_eq!(settings.min_strength, Strength::Medium);
    assert_eq!(settings.active_indicators, ActiveIndicators::all());
    assert!(settings.alerts.sound && settings.alerts.notification);
    assert!(!settings.alerts.email && !settings.alerts.telegram);
}

#[test]
fn test_empty_update_changes_nothing() {
    let mut settings = EngineSettings::default();
    let update = SettingsUpdate::default();
    assert!(update.is_empty());
    settings.apply(update);
    assert_eq!(settings, EngineSettings::default());
}

#[test]
fn test_nested_groups_replaced_whole() {
    let mut settings = EngineSettings::default();
    settings.apply(SettingsUpdate {
        alerts: Some(AlertToggles {
            sound: false,
            notification: false,
            email: true,
            telegram: false,
        }),
        ..SettingsUpdate::default()
    });
    assert!(!settings.alerts.sound);
    assert!(settings.alerts.email);
}

#[test]
fn test_update_from_partial_json() {
    let update: SettingsUpdate =
        serde_json::from_str(r#"{"timeframe":"5m","min_strength":"strong","candles":30}"#).unwrap();
    assert!(!update.is_empty());

    let mut settings = EngineSettings::default();
    settings.apply(update);
    assert_eq!(settings.timeframe, "5m");
    assert_eq!(settings.min_strength, Strength::Strong);
    assert_eq!(settings.candles, 30);
    assert_eq!(settings.asset, "EURUSD");
}

#[test]
fn test_strength_parsing() {
    assert_eq!(" Medium ".parse::<Strength>(), Ok(Strength::Medium));
    assert!("extreme".parse::<Strength>().is_err());
}
