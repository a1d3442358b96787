//! REST and WebSocket payloads of the live feed

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UserInfoResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CandlesRequest<'a> {
    pub asset: &'a str,
    pub timeframe: String,
    /// Unix seconds
    pub start_time: i64,
    pub end_time: i64,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct CandlesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub candles: Option<Vec<CandleData>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandleData {
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
    /// Unix seconds
    pub timestamp: i64,
}

/// One streamed quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub asset: String,
    pub price: f64,
    #[serde(default)]
    pub volume: Option<f64>,
    /// Unix milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,
}
