//! es-context-health: event store health probe
//!
//! Loads configuration, optionally resolves the context of one tenant, and
//! probes the event store behind it.
//!
//! ## Usage
//! ```text
//! es-context-health [TENANT]
//! ```
//!
//! ## Configuration
//! - ES_CONTEXT_CONFIG: Path to YAML configuration (optional)
//! - ES_CONTEXT_LOG: Log filter (default: info)
//!
//! Without TENANT the probe targets `eventstore.connection_string`. Exits
//! with status 1 when the probe reports anything but healthy.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use es_context::config::Config;
use es_context::health::EventStoreHealthCheck;
use es_context::storage::{EventStoreDbContext, EventStoreDbStreamReader};
use es_context::utils::bootstrap::{init_context_manager, init_tracing};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();

    let tenant = std::env::args().nth(1);
    let config = Config::load(None)?;

    let manager = init_context_manager(&config, EventStoreDbContext::build)?;

    let connection_string = match &tenant {
        Some(tenant) => {
            let context = manager.resolve_context(tenant).await?;
            info!(tenant = %tenant, endpoint = %context.endpoint(), "Resolved tenant context");
            config
                .tenants
                .get(tenant)
                .cloned()
                .unwrap_or_else(|| config.eventstore.connection_string.clone())
        }
        None => config.eventstore.connection_string.clone(),
    };

    let reader = EventStoreDbStreamReader::from_connection_string(&connection_string)?;
    let check = EventStoreHealthCheck::from_config(Arc::new(reader), &config.health);
    let report = check.check().await;

    match &report.error {
        None => info!(status = %report.status, stream = %check.stream(), "Health check complete"),
        Some(e) => error!(status = %report.status, stream = %check.stream(), error = %e, "Health check complete"),
    }

    Ok(if report.is_healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
