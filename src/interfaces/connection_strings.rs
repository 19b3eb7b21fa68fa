//! Connection string lookup interface.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Kind of backing service a connection string points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStringType {
    #[default]
    EventStore,
    ReadModel,
}

impl fmt::Display for ConnectionStringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStringType::EventStore => f.write_str("event_store"),
            ConnectionStringType::ReadModel => f.write_str("read_model"),
        }
    }
}

/// Errors that can occur while looking up a connection string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    #[error("No {kind} connection string stored for identifier {identifier}")]
    NotFound {
        identifier: String,
        kind: ConnectionStringType,
    },

    #[error("Connection string lookup failed: {0}")]
    Backend(String),
}

/// Interface for looking up the stored connection string of a tenant.
///
/// Implementations may hit a database or a remote configuration service,
/// so calls can be slow. Dropping the returned future abandons the lookup;
/// no other cancellation signal is carried.
///
/// Implementations:
/// - `StaticConnectionStrings`: in-memory map built from config or env
#[async_trait]
pub trait ConnectionStringResolver: Send + Sync {
    /// Look up the connection string of `kind` stored for `identifier`.
    async fn get_connection_string(
        &self,
        identifier: &str,
        kind: ConnectionStringType,
    ) -> Result<String>;
}
