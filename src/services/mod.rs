//! Market data feeds

pub mod market_data;
pub mod pocket_option;
pub mod simulator;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::store::{DataSource, StoredSettings};
use crate::error::FeedError;
use crate::models::indicators::PriceWindow;

pub use market_data::MarketDataProvider;
pub use pocket_option::LiveMarketData;
pub use simulator::SimulatedMarketData;

/// Wraps a primary feed and answers from the simulator whenever it fails.
pub struct FallbackMarketData {
    primary: Arc<dyn MarketDataProvider>,
    fallback: Arc<dyn MarketDataProvider>,
}

impl FallbackMarketData {
    pub fn new(primary: Arc<dyn MarketDataProvider>, fallback: Arc<dyn MarketDataProvider>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl MarketDataProvider for FallbackMarketData {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn get_window(
        &self,
        asset: &str,
        timeframe: &str,
        count: usize,
    ) -> Result<PriceWindow, FeedError> {
        match self.primary.get_window(asset, timeframe, count).await {
            Ok(window) => Ok(window),
            Err(e) => {
                warn!(
                    feed = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "Primary feed failed, using fallback"
                );
                self.fallback.get_window(asset, timeframe, count).await
            }
        }
    }

    async fn get_latest_price(&self, asset: &str) -> Result<f64, FeedError> {
        match self.primary.get_latest_price(asset).await {
            Ok(price) => Ok(price),
            Err(e) => {
                warn!(feed = self.primary.name(), error = %e, "Latest price unavailable, using fallback");
                self.fallback.get_latest_price(asset).await
            }
        }
    }

    async fn subscribe(&self, asset: &str) -> Result<(), FeedError> {
        if let Err(e) = self.primary.subscribe(asset).await {
            warn!(feed = self.primary.name(), error = %e, "Subscription failed, relying on fallback");
        }
        self.fallback.subscribe(asset).await
    }
}

/// Build the feed selected in the settings store.
///
/// The live feed is always paired with the simulator as fallback.
pub fn provider_for(stored: &StoredSettings) -> Arc<dyn MarketDataProvider> {
    match stored.data_source {
        DataSource::Simulated => Arc::new(SimulatedMarketData::new()),
        DataSource::Live => {
            let live = LiveMarketData::new(stored.session_token.as_deref());
            if live.session_id().is_none() {
                warn!("Live feed selected without a session token");
            }
            info!("Using live market data with simulated fallback");
            Arc::new(FallbackMarketData::new(
                Arc::new(live),
                Arc::new(SimulatedMarketData::new()),
            ))
        }
    }
}
