//! Event store health probe.
//!
//! Checks that a well-known system stream (`$users` by default) can be read
//! forwards from the start. The probe never fails: every error, including a
//! panic inside the reader, is reported as a failed `HealthReport`. Panics
//! are only caught under the unwind strategy, so no profile sets
//! `panic = "abort"`.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::HealthConfig;


/// Default stream probed by the health check.
pub const DEFAULT_PROBE_STREAM: &str = "$users";

/// Health verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    #[default]
    Unhealthy,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => f.write_str("healthy"),
            HealthStatus::Degraded => f.write_str("degraded"),
            HealthStatus::Unhealthy => f.write_str("unhealthy"),
        }
    }
}

/// Errors captured while probing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HealthError {
    #[error("{0} stream not found")]
    StreamNotFound(String),

    #[error("Failed to read {stream}: {message}")]
    Read { stream: String, message: String },

    #[error("Failed to connect to event store: {0}")]
    Connection(String),

    #[error("Health probe panicked: {0}")]
    Panicked(String),
}

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub error: Option<HealthError>,
}

impl HealthReport {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            error: None,
        }
    }

    pub fn failed(status: HealthStatus, error: HealthError) -> Self {
        Self {
            status,
            error: Some(error),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Credentials presented to the event store when probing.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of opening a stream for reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Ok,
    StreamNotFound,
}

/// Interface for the read used by the probe.
///
/// Implementations:
/// - `EventStoreDbStreamReader`: EventStoreDB client (feature `eventstoredb`)
#[async_trait]
pub trait StreamReader: Send + Sync {
    /// Read `stream` forwards from the start and report whether it exists.
    async fn read_state(
        &self,
        stream: &str,
        credentials: Option<&Credentials>,
        resolve_link_tos: bool,
    ) -> Result<ReadState, HealthError>;
}

/// Health check against an event store system stream.
pub struct EventStoreHealthCheck {
    reader: Arc<dyn StreamReader>,
    stream: String,
    credentials: Option<Credentials>,
    failure_status: HealthStatus,
    resolve_link_tos: bool,
}

impl EventStoreHealthCheck {
    /// Create a probe for `$users` without credentials.
    pub fn new(reader: Arc<dyn StreamReader>) -> Self {
        Self {
            reader,
            stream: DEFAULT_PROBE_STREAM.to_string(),
            credentials: None,
            failure_status: HealthStatus::Unhealthy,
            resolve_link_tos: true,
        }
    }

    /// Create a probe from configuration.
    pub fn from_config(reader: Arc<dyn StreamReader>, config: &HealthConfig) -> Self {
        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        };

        Self {
            reader,
            stream: config.stream.clone(),
            credentials,
            failure_status: config.failure_status,
            resolve_link_tos: config.resolve_link_tos,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = stream.into();
        self
    }

    /// Status reported when the probe fails.
    pub fn with_failure_status(mut self, status: HealthStatus) -> Self {
        self.failure_status = status;
        self
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    /// Run the probe.
    pub async fn check(&self) -> HealthReport {
        let probe = self.reader.read_state(
            &self.stream,
            self.credentials.as_ref(),
            self.resolve_link_tos,
        );

        let outcome = match AssertUnwindSafe(probe).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => Err(HealthError::Panicked(panic_message(&*panic))),
        };

        match outcome {
            Ok(ReadState::Ok) => {
                debug!(stream = %self.stream, "Event store healthy");
                HealthReport::healthy()
            }
            Ok(ReadState::StreamNotFound) => {
                let error = HealthError::StreamNotFound(self.stream.clone());
                warn!(stream = %self.stream, error = %error, "Event store health check failed");
                HealthReport::failed(self.failure_status, error)
            }
            Err(error) => {
                warn!(stream = %self.stream, error = %error, "Event store health check failed");
                HealthReport::failed(self.failure_status, error)
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
