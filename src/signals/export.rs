//! CSV export of the signal log

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::signal::{Signal, SignalResult, SignalType, Strength};

/// Language used for the header and the categorical columns of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Arabic,
}

impl Locale {
    pub fn header(&self) -> [&'static str; 6] {
        match self {
            Locale::English => ["time", "asset", "timeframe", "type", "strength", "result"],
            Locale::Arabic => ["الوقت", "الأصل", "الفريم", "النوع", "القوة", "النتيجة"],
        }
    }

    pub fn signal_type(&self, signal_type: SignalType) -> &'static str {
        match (self, signal_type) {
            (Locale::English, SignalType::Buy) => "buy",
            (Locale::English, SignalType::Sell) => "sell",
            (Locale::Arabic, SignalType::Buy) => "شراء",
            (Locale::Arabic, SignalType::Sell) => "بيع",
        }
    }

    pub fn strength(&self, strength: Strength) -> &'static str {
        match (self, strength) {
            (Locale::English, s) => s.as_str(),
            (Locale::Arabic, Strength::Weak) => "ضعيفة",
            (Locale::Arabic, Strength::Medium) => "متوسطة",
            (Locale::Arabic, Strength::Strong) => "قوية",
        }
    }

    pub fn result(&self, result: Option<SignalResult>) -> &'static str {
        match (self, result) {
            (Locale::English, Some(r)) => r.as_str(),
            (Locale::English, None) => "pending",
            (Locale::Arabic, Some(SignalResult::Profit)) => "ربح",
            (Locale::Arabic, Some(SignalResult::Loss)) => "خسارة",
            (Locale::Arabic, None) => "قيد الانتظار",
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "ar" | "arabic" => Ok(Locale::Arabic),
            other => Err(format!("unknown locale '{}'", other)),
        }
    }
}

/// Write `signals` as CSV, newest first.
pub fn write_csv<W: Write>(signals: &[Signal], writer: W, locale: Locale) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(locale.header())?;

    for signal in signals.iter().rev() {
        wtr.write_record([
            signal.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().as_str(),
            signal.asset.as_str(),
            signal.timeframe.as_str(),
            locale.signal_type(signal.signal_type),
            locale.strength(signal.strength),
            locale.result(signal.result),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn default_filename(now: DateTime<Utc>) -> String {
    format!("signal_log_{}.csv", now.format("%Y%m%d_%H%M"))
}
