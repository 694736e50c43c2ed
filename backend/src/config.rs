//! Configuration management for the farm telemetry simulator
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FARMSIM_ prefix
//! 4. `EVENTHUB_CONNECTION_STR` / `EVENTHUB_NAME`, the names existing
//!    deployments already export

use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Generation loop configuration
    pub simulator: SimulatorConfig,

    /// Where readings are sent
    pub publisher: PublisherConfig,

    /// Azure Event Hubs configuration
    pub eventhub: EventHubConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    /// Delay between publish cycles
    pub interval_secs: u64,

    /// Stop after this many cycles; run until interrupted when unset
    pub max_cycles: Option<u64>,

    /// Seed for a reproducible reading stream
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sink {
    /// Azure Event Hubs REST endpoint
    EventHub,
    /// JSON lines on stdout, for dry runs
    Stdout,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PublisherConfig {
    pub sink: Sink,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl PublisherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EventHubConfig {
    /// Namespace connection string (Endpoint=sb://...;SharedAccessKeyName=...;SharedAccessKey=...)
    pub connection_string: Option<String>,

    /// Event hub name; ignored when the connection string carries an EntityPath
    pub name: Option<String>,

    /// Lifetime of each signed access token in seconds
    pub token_ttl_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARMSIM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARMSIM_ prefix)
            .add_source(
                Environment::with_prefix("FARMSIM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "eventhub.connection_string",
                std::env::var("EVENTHUB_CONNECTION_STR").ok(),
            )?
            .set_override_option("eventhub.name", std::env::var("EVENTHUB_NAME").ok())?
            .build()?
            .try_deserialize()
    }

    /// Builder seeded with the default values for `environment`
    pub fn builder(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("simulator.interval_secs", 5)?
            .set_default("publisher.sink", "eventhub")?
            .set_default("publisher.timeout_secs", 15)?
            .set_default("eventhub.token_ttl_secs", 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(builder: ConfigBuilder<DefaultState>) -> Config {
        builder.build().unwrap().try_deserialize().unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = build(Config::builder("test").unwrap());

        assert_eq!(config.environment, "test");
        assert_eq!(config.simulator.interval(), Duration::from_secs(5));
        assert_eq!(config.simulator.max_cycles, None);
        assert_eq!(config.simulator.seed, None);
        assert_eq!(config.publisher.sink, Sink::EventHub);
        assert_eq!(config.publisher.timeout(), Duration::from_secs(15));
        assert_eq!(config.eventhub.token_ttl_secs, 3600);
        assert!(config.eventhub.connection_string.is_none());
    }

    #[test]
    fn test_overrides() {
        let builder = Config::builder("test")
            .unwrap()
            .set_override("publisher.sink", "stdout")
            .unwrap()
            .set_override("simulator.seed", 42)
            .unwrap()
            .set_override("simulator.max_cycles", 10)
            .unwrap()
            .set_override("eventhub.name", "farm-telemetry")
            .unwrap();
        let config = build(builder);

        assert_eq!(config.publisher.sink, Sink::Stdout);
        assert_eq!(config.simulator.seed, Some(42));
        assert_eq!(config.simulator.max_cycles, Some(10));
        assert_eq!(config.eventhub.name.as_deref(), Some("farm-telemetry"));
    }

    #[test]
    fn test_load_layers_environment_variables() {
        // Only test that touches the process environment
        std::env::set_var("FARMSIM_SIMULATOR__INTERVAL_SECS", "2");
        std::env::set_var("FARMSIM_SIMULATOR__MAX_CYCLES", "7");
        std::env::set_var("FARMSIM_PUBLISHER__SINK", "stdout");
        std::env::set_var("EVENTHUB_NAME", "farm-telemetry");

        let config = Config::load();

        for key in [
            "FARMSIM_SIMULATOR__INTERVAL_SECS",
            "FARMSIM_SIMULATOR__MAX_CYCLES",
            "FARMSIM_PUBLISHER__SINK",
            "EVENTHUB_NAME",
        ] {
            std::env::remove_var(key);
        }

        let config = config.unwrap();
        assert_eq!(config.simulator.interval(), Duration::from_secs(2));
        assert_eq!(config.simulator.max_cycles, Some(7));
        assert_eq!(config.publisher.sink, Sink::Stdout);
        assert_eq!(config.eventhub.name.as_deref(), Some("farm-telemetry"));
        assert_eq!(config.publisher.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_unknown_sink_is_rejected() {
        let result = Config::builder("test")
            .unwrap()
            .set_override("publisher.sink", "kafka")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<Config>();

        assert!(result.is_err());
    }
}
