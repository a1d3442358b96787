//! Live market data over the broker's REST and WebSocket APIs

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, TimeZone, Utc};
use futures_util::StreamExt;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{get_pocket_option_api_url, get_pocket_option_ws_url};
use crate::core::scheduler::timeframe_to_duration;
use crate::error::FeedError;
use crate::models::indicators::PriceWindow;
use crate::services::market_data::MarketDataProvider;

use super::messages::{CandlesRequest, CandlesResponse, Quote, UserInfoResponse};
use super::session::normalize_session_token;

/// Quotes kept per asset
pub const MAX_BUFFERED_QUOTES: usize = 100;

type QuoteBuffers = Arc<RwLock<HashMap<String, VecDeque<Quote>>>>;

pub struct LiveMarketData {
    client: reqwest::Client,
    api_url: String,
    ws_url: String,
    session_id: Option<String>,
    quotes: QuoteBuffers,
    stream: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl LiveMarketData {
    pub fn new(session_token: Option<&str>) -> Self {
        Self::with_endpoints(session_token, get_pocket_option_api_url(), get_pocket_option_ws_url())
    }

    pub fn with_endpoints(
        session_token: Option<&str>,
        api_url: impl Into<String>,
        ws_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ws_url: ws_url.into().trim_end_matches('/').to_string(),
            session_id: session_token.and_then(normalize_session_token),
            quotes: Arc::new(RwLock::new(HashMap::new())),
            stream: Arc::new(RwLock::new(None)),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn require_session(&self) -> Result<&str, FeedError> {
        self.session_id.as_deref().ok_or(FeedError::MissingSession)
    }

    /// Check the session against the user-info endpoint.
    pub async fn validate_session(&self) -> Result<(), FeedError> {
        let session = self.require_session()?;
        if !(10..=100).contains(&session.len()) {
            warn!(length = session.len(), "Session token length looks wrong");
        }

        let response = self
            .client
            .get(format!("{}/v1/user/info", self.api_url))
            .bearer_auth(session)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Session validation refused");
            return Err(FeedError::InvalidSession);
        }

        let info: UserInfoResponse = response.json().await?;
        if info.success {
            debug!("Session validated");
            Ok(())
        } else {
            Err(FeedError::InvalidSession)
        }
    }

    /// Backfill the last `count` candles of `asset` over REST.
    pub async fn fetch_history(
        &self,
        asset: &str,
        timeframe: &str,
        count: usize,
    ) -> Result<PriceWindow, FeedError> {
        let session = self.require_session()?;

        let end = Utc::now();
        let span = timeframe_to_duration(timeframe).as_secs() as i64 * count as i64;
        let request = CandlesRequest {
            asset,
            timeframe: normalize_timeframe(timeframe),
            start_time: end.timestamp() - span,
            end_time: end.timestamp(),
            count,
        };

        let data: CandlesResponse = self
            .client
            .post(format!("{}/v1/candles", self.api_url))
            .bearer_auth(session)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let candles = match data.candles {
            Some(candles) if data.success && !candles.is_empty() => candles,
            _ => return Err(FeedError::NoData(asset.to_string())),
        };

        let timestamp = candles
            .last()
            .and_then(|c| Utc.timestamp_opt(c.timestamp, 0).single())
            .unwrap_or(end);
        let prices = candles.iter().map(|c| c.close).collect();
        let volumes = candles.iter().map(|c| c.volume.unwrap_or(0.0)).collect();

        debug!(asset, timeframe, received = candles.len(), "Fetched historical candles");
        Ok(PriceWindow::new(asset, prices, timestamp).with_volumes(volumes))
    }

    /// Validate the session and start streaming quotes into the buffers.
    pub async fn connect(&self) -> Result<(), FeedError> {
        if self.is_connected().await {
            return Ok(());
        }

        self.validate_session().await?;
        let session = self.require_session()?;

        let mut url = Url::parse(&format!("{}/v1/quotes", self.ws_url))?;
        url.query_pairs_mut().append_pair("token", session);

        let (ws_stream, _) = connect_async(url.as_str()).await?;
        let (_write, mut read) = ws_stream.split();
        info!(ws_url = %self.ws_url, "Quote stream connected");

        let quotes = self.quotes.clone();
        let handle = tokio::spawn(async move {
            while let Some(msg) = read.next().await {
                match msg {
                    Ok(Message::Text(text)) => match serde_json::from_str::<Quote>(&text) {
                        Ok(quote) => record_quote(&quotes, quote).await,
                        Err(e) => debug!(error = %e, "Ignoring unrecognised stream message"),
                    },
                    Ok(Message::Close(_)) => {
                        info!("Quote stream closed by server");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Quote stream error");
                        break;
                    }
                    _ => {}
                }
            }
        });

        *self.stream.write().await = Some(handle);
        Ok(())
    }

    pub async fn disconnect(&self) {
        if let Some(handle) = self.stream.write().await.take() {
            handle.abort();
            info!("Quote stream disconnected");
        }
    }

    pub async fn is_connected(&self) -> bool {
        match self.stream.read().await.as_ref() {
            Some(handle) => !handle.is_finished(),
            None => false,
        }
    }

    /// Buffer a quote as if it arrived on the stream
    pub async fn push_quote(&self, quote: Quote) {
        record_quote(&self.quotes, quote).await;
    }

    pub async fn buffered(&self, asset: &str) -> Vec<Quote> {
        self.quotes
            .read()
            .await
            .get(asset)
            .map(|q| q.iter().cloned().collect())
            .unwrap_or_default()
    }
}

async fn record_quote(buffers: &QuoteBuffers, quote: Quote) {
    let mut buffers = buffers.write().await;
    let buffer = buffers.entry(quote.asset.clone()).or_default();
    buffer.push_back(quote);
    while buffer.len() > MAX_BUFFERED_QUOTES {
        buffer.pop_front();
    }
}

/// Map a timeframe onto the API's `<n><unit>` form; unknown units become `1m`.
pub fn normalize_timeframe(timeframe: &str) -> String {
    let tf = timeframe.trim();
    let split = tf.find(|c: char| !c.is_ascii_digit()).unwrap_or(tf.len());
    let (value, unit) = tf.split_at(split);
    match (value.parse::<u32>(), unit) {
        (Ok(n), "s" | "m" | "h" | "d") if n > 0 => format!("{}{}", n, unit),
        _ => "1m".to_string(),
    }
}

#[async_trait]
impl MarketDataProvider for LiveMarketData {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn get_window(
        &self,
        asset: &str,
        timeframe: &str,
        count: usize,
    ) -> Result<PriceWindow, FeedError> {
        {
            let buffers = self.quotes.read().await;
            if let Some(buffer) = buffers.get(asset).filter(|b| b.len() >= count && count > 0) {
                let recent: Vec<&Quote> = buffer.iter().skip(buffer.len() - count).collect();
                let timestamp = recent
                    .last()
                    .and_then(|q| q.timestamp)
                    .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms))
                    .unwrap_or_else(Utc::now);
                let prices = recent.iter().map(|q| q.price).collect();
                let volumes = recent.iter().map(|q| q.volume.unwrap_or(0.0)).collect();
                return Ok(PriceWindow::new(asset, prices, timestamp).with_volumes(volumes));
            }
        }

        (|| async { self.fetch_history(asset, timeframe, count).await })
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(250))
                    .with_max_times(2),
            )
            .when(FeedError::is_transient)
            .notify(|err, delay| warn!(asset, error = %err, ?delay, "Candle backfill failed, retrying"))
            .await
    }

    async fn get_latest_price(&self, asset: &str) -> Result<f64, FeedError> {
        let buffered = self
            .quotes
            .read()
            .await
            .get(asset)
            .and_then(|b| b.back())
            .map(|q| q.price);

        match buffered {
            Some(price) => Ok(price),
            None => self
                .fetch_history(asset, "1m", 1)
                .await?
                .current_price()
                .ok_or_else(|| FeedError::NoData(asset.to_string())),
        }
    }

    async fn subscribe(&self, asset: &str) -> Result<(), FeedError> {
        debug!(asset, "Subscribing to live quotes");
        self.connect().await
    }
}
