//! CAEP error types using thiserror 2.0.

use thiserror::Error;

/// CAEP-specific errors.
#[derive(Error, Debug)]
pub enum CaepError {
    /// SET is missing a required claim or is not a JSON object
    #[error("Malformed SET: {0}")]
    MalformedSet(String),

    /// Event type URI is not a known CAEP event type
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CaepError {
    /// Create a malformed SET error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSet(msg.into())
    }

    /// Create an unknown event type error.
    #[must_use]
    pub fn unknown_event_type(uri: impl Into<String>) -> Self {
        Self::UnknownEventType(uri.into())
    }
}

/// Result type for CAEP operations.
pub type CaepResult<T> = Result<T, CaepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CaepError::malformed("missing claim: jti");
        assert_eq!(err.to_string(), "Malformed SET: missing claim: jti");
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert!(matches!(CaepError::from(json_err), CaepError::Serialization(_)));
    }
}
