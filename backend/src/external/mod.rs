//! External service integrations

pub mod eventhub;

pub use eventhub::{EventHubClient, EventHubConnection};
