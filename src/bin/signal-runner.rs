//! Confluence signal runner
//!
//! Usage:
//!   signal-runner run --asset EURUSD --timeframe 1m
//!   signal-runner configure-telegram --bot-token T --chat-id C
//!   signal-runner set-source live

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};
use confluence::config::{
    get_environment, get_state_path, ActiveIndicators, AlertToggles, DataSource, EmailCredentials,
    EngineSettings, SettingsStore, TelegramCredentials,
};
use confluence::core::runtime::AnalysisRuntime;
use confluence::logging;
use confluence::services::provider_for;
use confluence::signals::export::{default_filename, write_csv, Locale};
use confluence::{SignalEngine, Strength};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "signal-runner")]
#[command(about = "Multi-indicator trading signal engine", long_about = None)]
struct Cli {
    /// Settings file (defaults to CONFLUENCE_STATE_PATH or ./confluence_state.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the evaluation loop until Ctrl+C
    Run {
        #[arg(long, default_value = "EURUSD")]
        asset: String,
        #[arg(long, default_value = "1m")]
        timeframe: String,
        /// Window length requested from the feed
        #[arg(long, default_value_t = 50)]
        candles: usize,
        /// weak, medium or strong
        #[arg(long, default_value = "medium")]
        min_strength: Strength,
        /// Comma-separated subset of rsi,ema,bollinger,macd,volume
        #[arg(long, value_delimiter = ',')]
        indicators: Vec<String>,
        /// Override the stored data source (simulated, live)
        #[arg(long)]
        source: Option<DataSource>,
        /// Seconds before a signal's outcome is resolved
        #[arg(long, default_value_t = 60)]
        outcome_delay: u64,
        /// Enable Telegram alerts
        #[arg(long)]
        telegram: bool,
        /// Enable email alerts
        #[arg(long)]
        email: bool,
        /// Disable the terminal bell
        #[arg(long)]
        mute: bool,
        /// Write the signal log here on shutdown
        #[arg(long)]
        export: Option<PathBuf>,
        /// Export language: en or ar
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
    /// Store Telegram bot credentials
    ConfigureTelegram {
        #[arg(long)]
        bot_token: String,
        #[arg(long)]
        chat_id: String,
    },
    /// Store EmailJS credentials
    ConfigureEmail {
        #[arg(long)]
        service_id: String,
        #[arg(long)]
        template_id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        recipient: String,
    },
    /// Store the live-feed session token (raw or serialized blob)
    SetSession { token: String },
    /// Select the data source: simulated or live
    SetSource { source: DataSource },
}

fn parse_indicators(names: &[String]) -> ActiveIndicators {
    if names.is_empty() {
        return ActiveIndicators::all();
    }

    let mut active = ActiveIndicators::none();
    for name in names {
        match name.trim().to_ascii_lowercase().as_str() {
            "rsi" => active.rsi = true,
            "ema" => active.ema = true,
            "bollinger" | "bb" => active.bollinger = true,
            "macd" => active.macd = true,
            "volume" => active.volume = true,
            other => warn!(indicator = other, "Unknown indicator ignored"),
        }
    }
    active
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let state_path = cli.state.unwrap_or_else(get_state_path);
    let mut store = SettingsStore::load(&state_path)?;

    match cli.command {
        Commands::ConfigureTelegram { bot_token, chat_id } => {
            let enabled = store.configure_telegram(TelegramCredentials { bot_token, chat_id })?;
            info!(enabled, "Telegram settings saved");
        }
        Commands::ConfigureEmail {
            service_id,
            template_id,
            user_id,
            recipient,
        } => {
            let enabled = store.configure_email(EmailCredentials {
                service_id,
                template_id,
                user_id,
                recipient_email: recipient,
            })?;
            info!(enabled, "Email settings saved");
        }
        Commands::SetSession { token } => {
            store.set_session_token(Some(token))?;
            info!("Session token saved");
        }
        Commands::SetSource { source } => {
            store.set_data_source(source)?;
            info!(source = ?source, "Data source saved");
        }
        Commands::Run {
            asset,
            timeframe,
            candles,
            min_strength,
            indicators,
            source,
            outcome_delay,
            telegram,
            email,
            mute,
            export,
            locale,
        } => {
            let mut stored = store.settings().clone();
            if let Some(source) = source {
                stored.data_source = source;
            }

            let settings = EngineSettings {
                asset,
                timeframe,
                candles,
                min_strength,
                active_indicators: parse_indicators(&indicators),
                alerts: AlertToggles {
                    sound: !mute,
                    notification: true,
                    email,
                    telegram,
                },
                ..EngineSettings::default()
            };

            info!(environment = %get_environment(), "Starting signal runner");
            let runtime = AnalysisRuntime::new(
                SignalEngine::with_settings(settings),
                provider_for(&stored),
                stored,
            )
            .with_outcome_delay(Duration::from_secs(outcome_delay));
            runtime.start().await;

            signal::ctrl_c().await?;
            info!("Shutting down...");
            runtime.stop().await;

            let engine = runtime.engine();
            let engine = engine.read().await;
            let signals = engine.get_all_signals();
            info!(count = signals.len(), "Signals emitted this session");

            if let Some(path) = export {
                let path = if path.is_dir() {
                    path.join(default_filename(Utc::now()))
                } else {
                    path
                };
                write_csv(signals, File::create(&path)?, locale)?;
                info!(path = %path.display(), "Signal log exported");
            }
        }
    }

    Ok(())
}
