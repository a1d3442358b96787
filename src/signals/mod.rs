//! Signal evaluation: threshold rules, vote aggregation, engine and export.

pub mod aggregation;
pub mod engine;
pub mod export;
pub mod thresholds;

pub use aggregation::*;
pub use engine::SignalEngine;
pub use export::Locale;
pub use thresholds::IndicatorThresholds;
