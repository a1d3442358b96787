//! Environment-driven configuration and the durable settings store.

pub mod settings;
pub mod store;

pub use settings::{ActiveIndicators, AlertToggles, EngineSettings, SettingsUpdate};
pub use store::{DataSource, EmailCredentials, SettingsStore, StoredSettings, TelegramCredentials};

use std::env;
use std::path::PathBuf;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_POCKET_OPTION_API_URL: &str = "https://api.pocketoption.com";
pub const DEFAULT_POCKET_OPTION_WS_URL: &str = "wss://ws.pocketoption.com";

/// Deployment environment (`APP_ENV`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Location of the persisted settings file
pub fn get_state_path() -> PathBuf {
    env::var("CONFLUENCE_STATE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("confluence_state.json"))
}

pub fn get_telegram_api_url() -> String {
    env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_TELEGRAM_API_URL.to_string())
}

pub fn get_emailjs_api_url() -> String {
    env::var("EMAILJS_API_URL").unwrap_or_else(|_| DEFAULT_EMAILJS_API_URL.to_string())
}

pub fn get_pocket_option_api_url() -> String {
    env::var("POCKET_OPTION_API_URL")
        .unwrap_or_else(|_| DEFAULT_POCKET_OPTION_API_URL.to_string())
}

pub fn get_pocket_option_ws_url() -> String {
    env::var("POCKET_OPTION_WS_URL").unwrap_or_else(|_| DEFAULT_POCKET_OPTION_WS_URL.to_string())
}
