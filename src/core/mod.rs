//! Core application primitives (runtime loop, scheduling)

pub mod runtime;
pub mod scheduler;

pub use runtime::*;
pub use scheduler::*;
