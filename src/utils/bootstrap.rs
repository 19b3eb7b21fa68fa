//! Bootstrap utilities.
//!
//! Shared initialization code for binaries and services embedding the
//! context manager.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ContextMode, LOG_ENV_VAR};
use crate::context::{BoxError, ContextError, ContextManager};
use crate::resolvers::StaticConnectionStrings;

/// Identifier reported when the fixed-mode context fails to build.
pub const FIXED_CONTEXT_IDENTIFIER: &str = "<fixed>";

/// Initialize tracing with ES_CONTEXT_LOG environment variable.
///
/// Defaults to "info" level if ES_CONTEXT_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build a context manager from configuration.
///
/// Fixed mode builds the single context eagerly from
/// `eventstore.connection_string`. Multi-tenant mode resolves connection
/// strings from the configured `tenants` table.
pub fn init_context_manager<C, F>(
    config: &Config,
    factory: F,
) -> Result<ContextManager<C>, ContextError>
where
    C: ?Sized + Send + Sync,
    F: Fn(&str) -> Result<Arc<C>, BoxError> + Send + Sync + 'static,
{
    match config.eventstore.mode {
        ContextMode::Fixed => {
            info!("Context mode: fixed");
            let context = factory(config.eventstore.connection_string.as_str()).map_err(
                |source| ContextError::Construction {
                    identifier: FIXED_CONTEXT_IDENTIFIER.to_string(),
                    source,
                },
            )?;
            Ok(ContextManager::fixed(context))
        }
        ContextMode::MultiTenant => {
            info!(tenants = config.tenants.len(), "Context mode: multi-tenant");
            let resolver = StaticConnectionStrings::from_tenants(config.tenants.clone());
            Ok(ContextManager::resolved(factory, Arc::new(resolver)))
        }
    }
}
