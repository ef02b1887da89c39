//! Shared library for cross-cutting concerns in the SSF receiver crates.
//!
//! This crate provides centralized implementations for:
//! - Platform error type for I/O and internal failures
//! - Tracing subscriber setup (plain or JSON output)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod tracing_config;

pub use error::PlatformError;
pub use tracing_config::{TracingConfig, init_tracing};
