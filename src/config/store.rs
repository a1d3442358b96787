//! Durable key/value settings: notifier credentials and data-source selection

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Simulated,
    Live,
}

impl std::str::FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" | "mock" => Ok(DataSource::Simulated),
            "live" | "real" | "pocket-option" => Ok(DataSource::Live),
            other => Err(format!("unknown data source '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl TelegramCredentials {
    pub fn is_complete(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCredentials {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub recipient_email: String,
}

impl EmailCredentials {
    pub fn is_complete(&self) -> bool {
        [
            &self.service_id,
            &self.template_id,
            &self.user_id,
            &self.recipient_email,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSettings {
    pub telegram: Option<TelegramCredentials>,
    pub email: Option<EmailCredentials>,
    pub data_source: DataSource,
    pub session_token: Option<String>,
}

/// JSON-file backed settings that survive restarts.
///
/// Every setter writes the whole file back before returning.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: StoredSettings,
}

impl SettingsStore {
    /// Load from `path`; a missing file yields empty settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let settings = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                StoredSettings::default()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            debug!(path = %path.display(), "Settings file not found, starting empty");
            StoredSettings::default()
        };

        Ok(Self { path, settings })
    }

    pub fn settings(&self) -> &StoredSettings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store Telegram credentials. Incomplete credentials clear the entry.
    ///
    /// Returns whether the channel is now configured.
    pub fn configure_telegram(&mut self, credentials: TelegramCredentials) -> Result<bool, ConfigError> {
        let enabled = credentials.is_complete();
        self.settings.telegram = enabled.then_some(credentials);
        self.save()?;
        Ok(enabled)
    }

    /// Store EmailJS credentials. Incomplete credentials clear the entry.
    pub fn configure_email(&mut self, credentials: EmailCredentials) -> Result<bool, ConfigError> {
        let enabled = credentials.is_complete();
        self.settings.email = enabled.then_some(credentials);
        self.save()?;
        Ok(enabled)
    }

    pub fn set_data_source(&mut self, source: DataSource) -> Result<(), ConfigError> {
        self.settings.data_source = source;
        self.save()
    }

    pub fn set_session_token(&mut self, token: Option<String>) -> Result<(), ConfigError> {
        self.settings.session_token = token.filter(|t| !t.trim().is_empty());
        self.save()
    }

    fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
