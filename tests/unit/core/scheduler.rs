//! Unit tests for cadence and outcome resolution

use std::sync::Arc;
use std::time::Duration;

use confluence::core::scheduler::{
    schedule_outcome, timeframe_to_duration, OutcomeResolver, SimulatedOutcome,
};
use confluence::indicators::registry::IndicatorKind;
use confluence::models::{Condition, SignalResult, SignalType};
use confluence::signals::engine::SignalEngine;
use tokio::sync::RwLock;

#[test]
fn test_timeframe_to_duration() {
    assert_eq!(timeframe_to_duration("15s"), Duration::from_secs(15));
    assert_eq!(timeframe_to_duration("30s"), Duration::from_secs(30));
    assert_eq!(timeframe_to_duration("1m"), Duration::from_secs(60));
    assert_eq!(timeframe_to_duration("5m"), Duration::from_secs(300));
    assert_eq!(timeframe_to_duration("4h"), Duration::from_secs(4 * 3600));
    assert_eq!(timeframe_to_duration("2d"), Duration::from_secs(2 * 86_400));
}

#[test]
fn test_unparseable_timeframe_is_one_minute() {
    for tf in ["", "m", "0m", "5w", "abc", "1.5h"] {
        assert_eq!(timeframe_to_duration(tf), Duration::from_secs(60), "timeframe {tf:?}");
    }
}

#[test]
fn test_simulated_outcome_extremes() {
    let mut engine = SignalEngine::new();
    let signal = engine.create_signal(
        SignalType::Buy,
        vec![Condition::new(IndicatorKind::Rsi, "RSI < 30 (20)")],
        None,
        None,
    );

    let win = SimulatedOutcome { win_probability: 1.0 }.resolve(&signal);
    assert_eq!(win.result, SignalResult::Profit);
    assert_eq!(win.profit_loss, 1.0);

    let loss = SimulatedOutcome { win_probability: 0.0 }.resolve(&signal);
    assert_eq!(loss.result, SignalResult::Loss);
    assert_eq!(loss.profit_loss, -1.0);

    assert_eq!(SimulatedOutcome::default().win_probability, 0.6);
}

#[tokio::test]
async fn test_schedule_outcome_updates_engine() {
    let mut engine = SignalEngine::new();
    let signal = engine.create_signal(
        SignalType::Sell,
        vec![
            Condition::new(IndicatorKind::Rsi, "RSI > 70 (80)"),
            Condition::new(IndicatorKind::Ema, "EMA 5 < EMA 20 (1.09 < 1.1)"),
        ],
        None,
        None,
    );
    let engine = Arc::new(RwLock::new(engine));

    schedule_outcome(
        engine.clone(),
        Arc::new(SimulatedOutcome { win_probability: 0.0 }),
        signal.clone(),
        Duration::from_millis(10),
    )
    .await
    .unwrap();

    let engine = engine.read().await;
    let stored = &engine.get_all_signals()[0];
    assert_eq!(stored.result, Some(SignalResult::Loss));
    assert_eq!(stored.profit_loss, Some(-1.0));
}
