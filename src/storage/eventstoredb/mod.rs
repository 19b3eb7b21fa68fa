//! EventStoreDB backed tenant context and health probe reader.

use std::sync::Arc;

use async_trait::async_trait;
use eventstore::{Client, ClientSettings, ReadStreamOptions, StreamPosition};
use tracing::debug;

use super::{Result, StorageError};
use crate::context::{redact_connection_string, BoxError};
use crate::health::{Credentials, HealthError, ReadState, StreamReader};

/// Tenant context holding a connected EventStoreDB client.
pub struct EventStoreDbContext {
    client: Client,
    endpoint: String,
}

impl EventStoreDbContext {
    /// Create a context from an `esdb://` connection string.
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::new(parse_settings(connection_string)?)
            .map_err(|e| StorageError::EventStoreDb(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: redact_connection_string(connection_string),
        })
    }

    /// Context factory for `ContextManager::resolved`.
    pub fn build(connection_string: &str) -> std::result::Result<Arc<Self>, BoxError> {
        Ok(Arc::new(Self::new(connection_string)?))
    }

    /// The underlying client, for reads and appends.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Connection endpoint without credentials.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Probe reader that opens a fresh client for every check.
pub struct EventStoreDbStreamReader {
    settings: ClientSettings,
}

impl EventStoreDbStreamReader {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        Ok(Self::new(parse_settings(connection_string)?))
    }
}

#[async_trait]
impl StreamReader for EventStoreDbStreamReader {
    async fn read_state(
        &self,
        stream: &str,
        credentials: Option<&Credentials>,
        resolve_link_tos: bool,
    ) -> std::result::Result<ReadState, HealthError> {
        let client = Client::new(self.settings.clone())
            .map_err(|e| HealthError::Connection(e.to_string()))?;

        let mut options = ReadStreamOptions::default()
            .forwards()
            .position(StreamPosition::Start)
            .max_count(1);
        if resolve_link_tos {
            options = options.resolve_link_tos();
        }
        if let Some(credentials) = credentials {
            options = options.authenticated(eventstore::Credentials::new(
                credentials.username.clone(),
                credentials.password.clone(),
            ));
        }

        let read_error = |e: eventstore::Error| HealthError::Read {
            stream: stream.to_string(),
            message: e.to_string(),
        };

        let mut events = match client.read_stream(stream.to_string(), &options).await {
            Ok(events) => events,
            Err(e) if is_stream_not_found(&e) => return Ok(ReadState::StreamNotFound),
            Err(e) => return Err(read_error(e)),
        };

        match events.next().await {
            Ok(_) => {
                debug!(stream = %stream, "Probe stream readable");
                Ok(ReadState::Ok)
            }
            Err(e) if is_stream_not_found(&e) => Ok(ReadState::StreamNotFound),
            Err(e) => Err(read_error(e)),
        }
    }
}

fn parse_settings(connection_string: &str) -> Result<ClientSettings> {
    connection_string
        .parse::<ClientSettings>()
        .map_err(|e| StorageError::InvalidConnectionString(e.to_string()))
}

fn is_stream_not_found(error: &eventstore::Error) -> bool {
    if matches!(error, eventstore::Error::ResourceNotFound) {
        return true;
    }
    let message = error.to_string();
    message.contains("StreamNotFound") || message.contains("stream not found")
}
