//! Live broker feed

pub mod messages;
pub mod provider;
pub mod session;

pub use messages::Quote;
pub use provider::{normalize_timeframe, LiveMarketData, MAX_BUFFERED_QUOTES};
pub use session::normalize_session_token;
