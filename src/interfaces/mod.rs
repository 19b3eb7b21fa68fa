//! Abstract interfaces for es-context collaborators.
//!
//! These traits define the contracts for:
//! - Connection string lookup (per-tenant endpoint resolution)
//! - Trace sinks (optional human-readable progress notifications)

pub mod connection_strings;
pub mod trace;

pub use connection_strings::{ConnectionStringResolver, ConnectionStringType, ResolverError};
pub use trace::{TraceLevel, TraceSink, TracingSink};
