//! Farm Telemetry Simulator
//!
//! Generates synthetic agricultural sensor readings, classifies them against
//! fixed thresholds and publishes them to an ingestion endpoint.

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use crate::config::Config;
pub use crate::error::{SimError, SimResult};
