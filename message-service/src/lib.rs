//! message-service: a single-endpoint backend that turns a day count
//! into a Gemini-generated anniversary message.

pub mod config;
pub mod handlers;
pub mod services;
pub mod startup;
