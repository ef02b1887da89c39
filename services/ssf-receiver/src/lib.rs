//! SSF Receiver - push endpoint and dashboard for CAEP Security Event Tokens.
//!
//! Wires the [`ssf_caep`] pipeline to an axum HTTP surface with
//! environment-driven configuration and graceful shutdown.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::ReceiverError;
pub use routes::router;
pub use state::AppState;
