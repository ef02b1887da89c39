//! SSF transmitter/receiver configuration metadata.

use crate::event::SESSION_RISK_CHANGE_URI;
use serde::{Deserialize, Serialize};

/// Push delivery per RFC 8935.
pub const PUSH_DELIVERY_METHOD: &str = "urn:ietf:rfc:8935";

/// Bearer token authorization per RFC 6750.
pub const BEARER_AUTHORIZATION_URN: &str = "urn:ietf:rfc:6750";

/// Authorization scheme advertised in the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizationScheme {
    /// URN of the RFC defining the scheme
    pub spec_urn: String,
}

/// Document served at `/.well-known/ssf-configuration`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SsfConfiguration {
    /// Issuer identity of this receiver
    pub issuer: String,
    /// Supported delivery methods
    pub delivery_methods_supported: Vec<String>,
    /// Supported event types
    pub events_supported: Vec<String>,
    /// Declared authorization schemes
    pub authorization_schemes: Vec<AuthorizationScheme>,
    /// SSF spec version
    pub spec_version: String,
}

impl SsfConfiguration {
    /// Static descriptor for a receiver identified by `issuer`.
    #[must_use]
    pub fn for_issuer(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            delivery_methods_supported: vec![PUSH_DELIVERY_METHOD.to_string()],
            events_supported: vec![SESSION_RISK_CHANGE_URI.to_string()],
            authorization_schemes: vec![AuthorizationScheme {
                spec_urn: BEARER_AUTHORIZATION_URN.to_string(),
            }],
            spec_version: "1_0".to_string(),
        }
    }
}
