//! Shared utilities for es-context binaries and embedders.

pub mod bootstrap;
