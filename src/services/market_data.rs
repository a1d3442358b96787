//! Market data provider interface

use async_trait::async_trait;

use crate::error::FeedError;
use crate::models::indicators::PriceWindow;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// The most recent `count` closes (and volumes) for `asset`, oldest first
    async fn get_window(
        &self,
        asset: &str,
        timeframe: &str,
        count: usize,
    ) -> Result<PriceWindow, FeedError>;

    /// Get the latest price for an asset
    async fn get_latest_price(&self, asset: &str) -> Result<f64, FeedError>;

    async fn subscribe(&self, asset: &str) -> Result<(), FeedError>;
}
