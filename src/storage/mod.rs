//! Event store backends.
//!
//! Concrete tenant contexts and probe readers. The EventStoreDB backend is
//! only compiled with the `eventstoredb` feature.

#[cfg(feature = "eventstoredb")]
pub mod eventstoredb;

#[cfg(feature = "eventstoredb")]
pub use eventstoredb::{EventStoreDbContext, EventStoreDbStreamReader};

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while building backend clients.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("EventStoreDB error: {0}")]
    EventStoreDb(String),
}
