//! Cycle cadence and delayed outcome resolution

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::signal::{Signal, SignalResult};
use crate::signals::engine::SignalEngine;

pub const DEFAULT_CYCLE_PERIOD: Duration = Duration::from_secs(60);
pub const DEFAULT_OUTCOME_DELAY: Duration = Duration::from_secs(60);

/// Convert a timeframe label (`15s`, `1m`, `4h`, `1d`, ...) to its duration.
///
/// Anything unparseable maps to one minute.
pub fn timeframe_to_duration(timeframe: &str) -> Duration {
    let tf = timeframe.trim();
    let split = tf.find(|c: char| !c.is_ascii_digit()).unwrap_or(tf.len());
    let (value, unit) = tf.split_at(split);

    let value: u64 = match value.parse() {
        Ok(v) if v > 0 => v,
        _ => return DEFAULT_CYCLE_PERIOD,
    };

    match unit {
        "s" => Duration::from_secs(value),
        "m" => Duration::from_secs(value * 60),
        "h" => Duration::from_secs(value * 60 * 60),
        "d" => Duration::from_secs(value * 24 * 60 * 60),
        _ => DEFAULT_CYCLE_PERIOD,
    }
}

/// Result and profit/loss assigned to a finished signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub result: SignalResult,
    pub profit_loss: f64,
}

/// Decides how an emitted signal played out.
pub trait OutcomeResolver: Send + Sync {
    fn resolve(&self, signal: &Signal) -> Outcome;
}

/// Coin-flip outcomes: profit with `win_probability`, P/L of ±1.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedOutcome {
    pub win_probability: f64,
}

impl Default for SimulatedOutcome {
    fn default() -> Self {
        Self { win_probability: 0.6 }
    }
}

impl OutcomeResolver for SimulatedOutcome {
    fn resolve(&self, _signal: &Signal) -> Outcome {
        if rand::thread_rng().gen_bool(self.win_probability.clamp(0.0, 1.0)) {
            Outcome {
                result: SignalResult::Profit,
                profit_loss: 1.0,
            }
        } else {
            Outcome {
                result: SignalResult::Loss,
                profit_loss: -1.0,
            }
        }
    }
}

/// Resolve `signal` after `delay` and record the outcome on the engine.
pub fn schedule_outcome(
    engine: Arc<RwLock<SignalEngine>>,
    resolver: Arc<dyn OutcomeResolver>,
    signal: Signal,
    delay: Duration,
) -> JoinHandle<()> {
    debug!(id = %signal.id, ?delay, "Outcome resolution scheduled");

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let outcome = resolver.resolve(&signal);
        engine
            .write()
            .await
            .update_signal_result(&signal.id, outcome.result, outcome.profit_loss);
        info!(
            id = %signal.id,
            result = outcome.result.as_str(),
            profit_loss = outcome.profit_loss,
            "Signal resolved"
        );
    })
}
