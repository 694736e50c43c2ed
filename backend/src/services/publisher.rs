//! Reading publishers
//!
//! Each publish is a single best-effort attempt; callers decide what to do
//! with a failure.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use shared::Reading;

use crate::config::{Config, Sink};
use crate::error::{SimError, SimResult};
use crate::external::{EventHubClient, EventHubConnection};

/// Transmits one reading downstream
pub trait Publisher {
    fn publish(&self, reading: &Reading) -> impl Future<Output = SimResult<()>> + Send;
}

/// Publishes each reading as one Event Hubs event with a JSON body
#[derive(Clone)]
pub struct EventHubPublisher {
    client: EventHubClient,
}

impl EventHubPublisher {
    pub fn new(client: EventHubClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> SimResult<Self> {
        let connection_string = config
            .eventhub
            .connection_string
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                SimError::Configuration(
                    "EVENTHUB_CONNECTION_STR is required for the eventhub sink".to_string(),
                )
            })?;
        let connection: EventHubConnection = connection_string.parse()?;

        let client = EventHubClient::new(
            connection,
            config.eventhub.name.as_deref(),
            config.publisher.timeout(),
            Duration::from_secs(config.eventhub.token_ttl_secs),
        )?;

        Ok(Self::new(client))
    }

    pub fn hub(&self) -> &str {
        self.client.hub()
    }
}

impl Publisher for EventHubPublisher {
    async fn publish(&self, reading: &Reading) -> SimResult<()> {
        let body = serde_json::to_vec(reading)?;
        self.client.send(body).await
    }
}

/// Writes each reading as a JSON line to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPublisher;

impl Publisher for StdoutPublisher {
    async fn publish(&self, reading: &Reading) -> SimResult<()> {
        let line = serde_json::to_string(reading)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        Ok(())
    }
}

/// The publisher selected by configuration
#[derive(Clone)]
pub enum SinkPublisher {
    EventHub(EventHubPublisher),
    Stdout(StdoutPublisher),
}

impl SinkPublisher {
    pub fn from_config(config: &Config) -> SimResult<Self> {
        match config.publisher.sink {
            Sink::EventHub => Ok(Self::EventHub(EventHubPublisher::from_config(config)?)),
            Sink::Stdout => Ok(Self::Stdout(StdoutPublisher)),
        }
    }

    /// Short description for the startup log
    pub fn describe(&self) -> String {
        match self {
            Self::EventHub(p) => format!("Azure Event Hub '{}'", p.hub()),
            Self::Stdout(_) => "stdout".to_string(),
        }
    }
}

impl Publisher for SinkPublisher {
    async fn publish(&self, reading: &Reading) -> SimResult<()> {
        match self {
            Self::EventHub(p) => p.publish(reading).await,
            Self::Stdout(p) => p.publish(reading).await,
        }
    }
}
