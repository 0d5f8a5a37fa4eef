//! service-core: Shared infrastructure for the message service workspace.
pub mod config;
pub mod error;
pub mod observability;
