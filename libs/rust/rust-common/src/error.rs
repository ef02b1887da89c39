//! Centralized error types shared by the receiver crates.
//!
//! Covers failures outside SET handling: binding and serving the listener,
//! joining the server task, installing the tracing subscriber.

use thiserror::Error;

/// Common error type for platform operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// I/O error (socket bind, accept)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Create an internal error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_common::PlatformError;
    ///
    /// let err = PlatformError::internal("server task panicked");
    /// assert_eq!(err.to_string(), "Internal error: server task panicked");
    /// ```
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
