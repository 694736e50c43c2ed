//! Publishing and scheduling services for the simulator

pub mod publisher;
pub mod simulator;

pub use publisher::{EventHubPublisher, Publisher, SinkPublisher, StdoutPublisher};
pub use simulator::{CycleOutcome, RunSummary, Simulator};
