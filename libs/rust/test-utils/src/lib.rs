//! Shared test utilities for the SSF receiver crates.
//!
//! This crate provides:
//! - Proptest generators for SET payloads
//! - Test fixtures with sample SETs in wire form
//!
//! Everything is produced as `serde_json::Value` so the crate stays free of
//! the libraries it is used to test.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use generators::*;
