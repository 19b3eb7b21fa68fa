//! es-context - multi-tenant event store context resolution.
//!
//! Hands out ready-to-use event store contexts keyed by tenant/connection
//! identifier, building each one lazily and exactly once, and probes event
//! store health through a well-known system stream.

pub mod config;
pub mod context;
pub mod health;
pub mod interfaces;
pub mod resolvers;
pub mod storage;
pub mod utils;

pub use context::{ContextError, ContextManager};
pub use health::{EventStoreHealthCheck, HealthReport, HealthStatus};
pub use interfaces::{ConnectionStringResolver, ConnectionStringType, TraceSink};
pub use resolvers::StaticConnectionStrings;
