//! Domain models for the farm telemetry simulator

mod farm;
mod reading;
mod threshold;

pub use farm::*;
pub use reading::*;
pub use threshold::*;
