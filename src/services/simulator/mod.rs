//! Simulated market feed: a trending random walk for demos and tests

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::FeedError;
use crate::models::indicators::PriceWindow;
use crate::services::market_data::MarketDataProvider;

pub const BASE_PRICE: f64 = 1.1;
pub const VOLATILITY: f64 = 0.0005;
/// Fraction of the distance to the base price recovered on each tick
pub const MEAN_REVERSION: f64 = 0.01;
const TREND_WALL_CLOCK: Duration = Duration::from_secs(10);

struct WalkState {
    rng: StdRng,
    price: f64,
    trend: i8,
    trend_ticks: u32,
    max_trend_ticks: u32,
    trend_started: Instant,
}

impl WalkState {
    fn new(mut rng: StdRng) -> Self {
        let max_trend_ticks = rng.gen_range(10..30);
        Self {
            rng,
            price: BASE_PRICE,
            trend: 0,
            trend_ticks: 0,
            max_trend_ticks,
            trend_started: Instant::now(),
        }
    }

    fn change_trend(&mut self) {
        self.trend = self.rng.gen_range(-1..=1);
        self.trend_ticks = 0;
        self.max_trend_ticks = self.rng.gen_range(10..30);
        self.trend_started = Instant::now();
    }

    fn next_price(&mut self) -> f64 {
        self.trend_ticks += 1;
        if self.trend_ticks >= self.max_trend_ticks || self.trend_started.elapsed() >= TREND_WALL_CLOCK {
            self.change_trend();
        }

        let random_change = (self.rng.gen::<f64>() - 0.5) * VOLATILITY;
        let trend_change = f64::from(self.trend) * (VOLATILITY / 2.0);
        let reversion = (BASE_PRICE - self.price) * MEAN_REVERSION;

        self.price += random_change + trend_change + reversion;
        round5(self.price)
    }

    fn next_volume(&mut self) -> f64 {
        let base = 10.0 + self.rng.gen::<f64>() * 90.0;
        let trend_multiplier = 1.0 + f64::from(self.trend.abs()) * self.rng.gen::<f64>();
        (base * trend_multiplier).floor()
    }
}

fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

/// Random-walk price generator. Every window request advances the walk.
pub struct SimulatedMarketData {
    state: Mutex<WalkState>,
}

impl SimulatedMarketData {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic walk for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            state: Mutex::new(WalkState::new(rng)),
        }
    }

    /// Advance the walk by `count` ticks, returning prices and volumes.
    pub async fn generate(&self, count: usize) -> (Vec<f64>, Vec<f64>) {
        let mut state = self.state.lock().await;
        let mut prices = Vec::with_capacity(count);
        let mut volumes = Vec::with_capacity(count);
        for _ in 0..count {
            prices.push(state.next_price());
            volumes.push(state.next_volume());
        }
        (prices, volumes)
    }

    pub async fn trend(&self) -> i8 {
        self.state.lock().await.trend
    }
}

impl Default for SimulatedMarketData {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for SimulatedMarketData {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn get_window(
        &self,
        asset: &str,
        timeframe: &str,
        count: usize,
    ) -> Result<PriceWindow, FeedError> {
        let (prices, volumes) = self.generate(count).await;
        debug!(asset, timeframe, count, "Generated simulated window");
        Ok(PriceWindow::new(asset, prices, Utc::now()).with_volumes(volumes))
    }

    async fn get_latest_price(&self, _asset: &str) -> Result<f64, FeedError> {
        Ok(round5(self.state.lock().await.price))
    }

    async fn subscribe(&self, asset: &str) -> Result<(), FeedError> {
        debug!(asset, "Simulated feed needs no subscription");
        Ok(())
    }
}
