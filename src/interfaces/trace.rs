//! Trace sink interface.
//!
//! A trace sink receives human-readable progress messages from the context
//! manager. Sinks are optional; a manager without one only emits `tracing`
//! events.

use tracing::{debug, error, info, trace, warn};

/// Severity attached to a trace message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
}

/// Receiver for progress notifications.
pub trait TraceSink: Send + Sync {
    fn on_trace(&self, message: &str, level: TraceLevel);
}

/// Sink that forwards every message into the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn on_trace(&self, message: &str, level: TraceLevel) {
        match level {
            TraceLevel::Trace => trace!(target: "es_context::trace", "{}", message),
            TraceLevel::Debug => debug!(target: "es_context::trace", "{}", message),
            TraceLevel::Information => info!(target: "es_context::trace", "{}", message),
            TraceLevel::Warning => warn!(target: "es_context::trace", "{}", message),
            TraceLevel::Error => error!(target: "es_context::trace", "{}", message),
        }
    }
}

impl<F> TraceSink for F
where
    F: Fn(&str, TraceLevel) + Send + Sync,
{
    fn on_trace(&self, message: &str, level: TraceLevel) {
        self(message, level)
    }
}
