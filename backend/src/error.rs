//! Error handling for the farm telemetry simulator
//!
//! Reading generation cannot fail; every error here comes from startup
//! configuration or from publishing a reading.

use thiserror::Error;

/// Simulator error types
#[derive(Error, Debug)]
pub enum SimError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Invalid Event Hubs connection string: {0}")]
    InvalidConnectionString(String),

    // Publishing errors
    #[error("Ingestion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Ingestion endpoint rejected event: {status} - {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to serialize reading: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Stable code for log filtering
    pub fn code(&self) -> &'static str {
        match self {
            SimError::Configuration(_) | SimError::ConfigLoad(_) => "CONFIGURATION_ERROR",
            SimError::InvalidConnectionString(_) => "INVALID_CONNECTION_STRING",
            SimError::Transport(e) if e.is_timeout() => "TRANSPORT_TIMEOUT",
            SimError::Transport(_) => "TRANSPORT_ERROR",
            SimError::Rejected { .. } => "EVENT_REJECTED",
            SimError::Serialization(_) => "SERIALIZATION_ERROR",
            SimError::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the error happened while publishing, as opposed to at startup
    pub fn is_publish_failure(&self) -> bool {
        matches!(
            self,
            SimError::Transport(_)
                | SimError::Rejected { .. }
                | SimError::Serialization(_)
                | SimError::Io(_)
        )
    }
}

/// Result type alias for simulator operations
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SimError::Configuration("missing".into()).code(),
            "CONFIGURATION_ERROR"
        );
        let rejected = SimError::Rejected {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "bad token".into(),
        };
        assert_eq!(rejected.code(), "EVENT_REJECTED");
        assert!(rejected.is_publish_failure());
        assert!(!SimError::InvalidConnectionString("x".into()).is_publish_failure());
    }

    #[test]
    fn test_rejected_message_includes_status_and_body() {
        let err = SimError::Rejected {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "bad token".into(),
        };
        assert_eq!(
            err.to_string(),
            "Ingestion endpoint rejected event: 401 Unauthorized - bad token"
        );
    }
}
