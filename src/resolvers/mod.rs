//! Connection string resolvers.
//!
//! Provides a resolver without external dependencies. Connection strings are
//! registered manually, taken from configuration, or loaded from environment
//! variables at startup.
//!
//! # Environment Variable Configuration
//!
//! ```bash
//! # Tenants: ES_CONTEXT_TENANT_{IDENTIFIER}=connection string
//! ES_CONTEXT_TENANT_ACME=esdb://acme-store:2113?tls=false
//! ES_CONTEXT_TENANT_GLOBEX=esdb://globex-store:2113?tls=false
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::interfaces::{ConnectionStringResolver, ConnectionStringType, ResolverError};


/// Environment variable prefix for tenant connection strings.
pub const TENANT_ENV_PREFIX: &str = "ES_CONTEXT_TENANT_";

/// In-memory connection string store.
///
/// Entries are keyed by (identifier, kind). Identifiers match exactly.
#[derive(Default)]
pub struct StaticConnectionStrings {
    entries: RwLock<HashMap<(String, ConnectionStringType), String>>,
}

impl StaticConnectionStrings {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver holding event store connection strings for the
    /// given tenants.
    pub fn from_tenants<I, K, V>(tenants: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = tenants
            .into_iter()
            .map(|(identifier, connection_string)| {
                (
                    (identifier.into(), ConnectionStringType::EventStore),
                    connection_string.into(),
                )
            })
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Create from environment variables.
    ///
    /// Scans for `ES_CONTEXT_TENANT_*` env vars. Identifiers are lower-cased.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let tenants: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let identifier = key.strip_prefix(TENANT_ENV_PREFIX)?;
                if identifier.is_empty() || value.is_empty() {
                    return None;
                }
                Some((identifier.to_lowercase(), value))
            })
            .collect();

        info!(tenants = tenants.len(), "Loaded tenant connection strings from environment");
        Self::from_tenants(tenants)
    }

    /// Register or replace a connection string.
    pub async fn insert(
        &self,
        identifier: impl Into<String>,
        kind: ConnectionStringType,
        connection_string: impl Into<String>,
    ) {
        let identifier = identifier.into();
        debug!(identifier = %identifier, kind = %kind, "Registering connection string");
        self.entries
            .write()
            .await
            .insert((identifier, kind), connection_string.into());
    }

    /// Remove a connection string. Returns true if one was stored.
    pub async fn remove(&self, identifier: &str, kind: ConnectionStringType) -> bool {
        self.entries
            .write()
            .await
            .remove(&(identifier.to_string(), kind))
            .is_some()
    }

    /// Number of stored connection strings.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ConnectionStringResolver for StaticConnectionStrings {
    async fn get_connection_string(
        &self,
        identifier: &str,
        kind: ConnectionStringType,
    ) -> Result<String, ResolverError> {
        self.entries
            .read()
            .await
            .get(&(identifier.to_string(), kind))
            .cloned()
            .ok_or_else(|| ResolverError::NotFound {
                identifier: identifier.to_string(),
                kind,
            })
    }
}
