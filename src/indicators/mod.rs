//! Indicator library: pure functions over price/volume sequences.
//!
//! Every function returns `None` when the input is shorter than the
//! indicator's minimum length.

pub mod registry;

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use momentum::*;
pub use registry::*;
pub use trend::*;
pub use volatility::*;
pub use volume::*;
