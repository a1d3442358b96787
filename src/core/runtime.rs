//! Evaluation loop driving the signal engine on the timeframe cadence

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::config::settings::SettingsUpdate;
use crate::config::store::StoredSettings;
use crate::core::scheduler::{
    schedule_outcome, timeframe_to_duration, OutcomeResolver, SimulatedOutcome,
    DEFAULT_OUTCOME_DELAY,
};
use crate::error::FeedError;
use crate::models::signal::Signal;
use crate::notifications::{AlertDispatcher, AlertPayload, DailyReport};
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::SignalEngine;

struct CycleContext {
    engine: Arc<RwLock<SignalEngine>>,
    provider: Arc<dyn MarketDataProvider>,
    stored: StoredSettings,
    dispatcher: Option<AlertDispatcher>,
    resolver: Arc<dyn OutcomeResolver>,
    outcome_delay: Duration,
}

impl CycleContext {
    async fn dispatcher(&self) -> AlertDispatcher {
        match &self.dispatcher {
            Some(dispatcher) => dispatcher.clone(),
            None => {
                let alerts = self.engine.read().await.settings().alerts;
                AlertDispatcher::from_settings(&alerts, &self.stored)
            }
        }
    }

    async fn run_cycle(&self) -> Result<Option<Signal>, FeedError> {
        let (asset, timeframe, candles) = {
            let engine = self.engine.read().await;
            let settings = engine.settings();
            (settings.asset.clone(), settings.timeframe.clone(), settings.candles)
        };

        let dispatcher = self.dispatcher().await;
        let window = self.provider.get_window(&asset, &timeframe, candles).await?;

        // Logging, dispatch and outcome scheduling share one critical section.
        let mut engine = self.engine.write().await;
        let signal = engine.analyze_market(&window);
        if let Some(signal) = &signal {
            dispatcher.dispatch(AlertPayload::from_signal(signal));
            schedule_outcome(
                self.engine.clone(),
                self.resolver.clone(),
                signal.clone(),
                self.outcome_delay,
            );
        }
        drop(engine);

        Ok(signal)
    }
}

/// Runs one cycle immediately on start, then one per timeframe period.
///
/// Emitted signals are dispatched to the enabled alert channels and scheduled
/// for outcome resolution.
pub struct AnalysisRuntime {
    context: Arc<CycleContext>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl AnalysisRuntime {
    pub fn new(
        engine: SignalEngine,
        provider: Arc<dyn MarketDataProvider>,
        stored: StoredSettings,
    ) -> Self {
        Self {
            context: Arc::new(CycleContext {
                engine: Arc::new(RwLock::new(engine)),
                provider,
                stored,
                dispatcher: None,
                resolver: Arc::new(SimulatedOutcome::default()),
                outcome_delay: DEFAULT_OUTCOME_DELAY,
            }),
            handle: Arc::new(RwLock::new(None)),
        }
    }

    fn context_mut(&mut self) -> Option<&mut CycleContext> {
        Arc::get_mut(&mut self.context)
    }

    /// Use a fixed channel set instead of the engine's alert toggles
    pub fn with_dispatcher(mut self, dispatcher: AlertDispatcher) -> Self {
        if let Some(ctx) = self.context_mut() {
            ctx.dispatcher = Some(dispatcher);
        }
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn OutcomeResolver>) -> Self {
        if let Some(ctx) = self.context_mut() {
            ctx.resolver = resolver;
        }
        self
    }

    pub fn with_outcome_delay(mut self, delay: Duration) -> Self {
        if let Some(ctx) = self.context_mut() {
            ctx.outcome_delay = delay;
        }
        self
    }

    pub fn engine(&self) -> Arc<RwLock<SignalEngine>> {
        self.context.engine.clone()
    }

    /// Run a single evaluation cycle outside the loop.
    pub async fn run_cycle(&self) -> Result<Option<Signal>, FeedError> {
        self.context.run_cycle().await
    }

    /// Start the loop. A running loop is restarted.
    pub async fn start(&self) {
        let mut slot = self.handle.write().await;
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let (asset, timeframe) = {
            let engine = self.context.engine.read().await;
            (engine.settings().asset.clone(), engine.settings().timeframe.clone())
        };
        let period = timeframe_to_duration(&timeframe);

        if let Err(e) = self.context.provider.subscribe(&asset).await {
            error!(asset = %asset, error = %e, "Feed subscription failed");
        }

        let context = self.context.clone();
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = context.run_cycle().await {
                    error!(error = %e, "Analysis cycle failed");
                }
            }
        }));

        info!(
            asset = %asset,
            timeframe = %timeframe,
            period_secs = period.as_secs(),
            feed = self.context.provider.name(),
            "Analysis started"
        );
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("Analysis stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Apply a settings update; a running loop restarts on the new cadence.
    pub async fn update_settings(&self, update: SettingsUpdate) {
        self.context.engine.write().await.update_settings(update);
        if self.is_running().await {
            self.start().await;
        }
    }

    /// Report over today's signals, sent to every ready channel.
    pub async fn send_daily_report(&self) -> DailyReport {
        let today = Utc::now().date_naive();
        let todays: Vec<Signal> = self
            .context
            .engine
            .read()
            .await
            .get_all_signals()
            .iter()
            .filter(|s| s.timestamp.date_naive() == today)
            .cloned()
            .collect();

        let report = DailyReport::from_signals(&todays, today);
        self.context.dispatcher().await.dispatch_report(report.clone());
        report
    }
}
