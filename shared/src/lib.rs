//! Shared models and core logic for the farm telemetry simulator
//!
//! Used by the simulator binary and, through WASM, by the dashboard for
//! client-side classification.

pub mod classifier;
pub mod generator;
pub mod models;
pub mod stats;
pub mod types;

pub use classifier::*;
pub use generator::*;
pub use models::*;
pub use stats::*;
pub use types::*;
