//! HTTP surface for Fundbook.
//!
//! Thin axum layer over `fundbook_core`: extract, call one service
//! operation, wrap the outcome in the shared envelope.

pub mod config;
pub mod envelope;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use envelope::{ApiReply, Envelope, EnvelopeStatus};
pub use router::build_router;
pub use state::AppState;
