//! HTTP handlers for the message service.

pub mod generate;
pub mod health;
