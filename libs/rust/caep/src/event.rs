//! CAEP event types, subject identifiers and payload accessors.

use crate::{CaepError, CaepResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common prefix of every CAEP event-type URI.
pub const CAEP_EVENT_TYPE_BASE: &str = "https://schemas.openid.net/secevent/caep/event-type/";

/// Full URI of the session-risk-change event type.
pub const SESSION_RISK_CHANGE_URI: &str =
    "https://schemas.openid.net/secevent/caep/event-type/session-risk-change";

/// CAEP event types conforming to OpenID CAEP 1.0
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CaepEventType {
    /// Session has been revoked
    SessionRevoked,
    /// Credential has changed (added, removed, or modified)
    CredentialChange,
    /// User's assurance level has changed
    AssuranceLevelChange,
    /// Token claims have been updated
    TokenClaimsChange,
    /// Device compliance status has changed
    DeviceComplianceChange,
    /// Risk associated with a session has changed
    SessionRiskChange,
}

impl CaepEventType {
    /// Short kebab-case name, the last segment of the URI.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SessionRevoked => "session-revoked",
            Self::CredentialChange => "credential-change",
            Self::AssuranceLevelChange => "assurance-level-change",
            Self::TokenClaimsChange => "token-claims-change",
            Self::DeviceComplianceChange => "device-compliance-change",
            Self::SessionRiskChange => "session-risk-change",
        }
    }

    /// Get the full URI for this event type
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{CAEP_EVENT_TYPE_BASE}{}", self.name())
    }

    /// Resolve an event-type key from a SET's `events` map.
    ///
    /// Only URIs under [`CAEP_EVENT_TYPE_BASE`] resolve. The same name under
    /// any other host is a foreign event type.
    ///
    /// # Errors
    ///
    /// Returns [`CaepError::UnknownEventType`] when the URI names no CAEP event.
    pub fn from_uri(uri: &str) -> CaepResult<Self> {
        let name = uri
            .strip_prefix(CAEP_EVENT_TYPE_BASE)
            .ok_or_else(|| CaepError::unknown_event_type(uri))?;
        match name {
            "session-revoked" => Ok(Self::SessionRevoked),
            "credential-change" => Ok(Self::CredentialChange),
            "assurance-level-change" => Ok(Self::AssuranceLevelChange),
            "token-claims-change" => Ok(Self::TokenClaimsChange),
            "device-compliance-change" => Ok(Self::DeviceComplianceChange),
            "session-risk-change" => Ok(Self::SessionRiskChange),
            _ => Err(CaepError::unknown_event_type(uri)),
        }
    }
}

/// Subject identifier formats per OpenID SSF
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum SubjectIdentifier {
    /// Issuer and subject combination
    IssSub {
        /// Issuer of the subject identifier
        iss: String,
        /// Subject within the issuer
        sub: String,
    },
    /// Email address
    Email {
        /// Email address
        email: String,
    },
    /// Opaque identifier
    Opaque {
        /// Opaque value
        id: String,
    },
    /// Session identifier
    SessionId {
        /// Session value
        session_id: String,
    },
}

impl SubjectIdentifier {
    /// Email subject.
    #[must_use]
    pub fn email(email: impl Into<String>) -> Self {
        Self::Email {
            email: email.into(),
        }
    }

    /// Issuer/subject pair.
    #[must_use]
    pub fn iss_sub(iss: impl Into<String>, sub: impl Into<String>) -> Self {
        Self::IssSub {
            iss: iss.into(),
            sub: sub.into(),
        }
    }

    /// Opaque subject.
    #[must_use]
    pub fn opaque(id: impl Into<String>) -> Self {
        Self::Opaque { id: id.into() }
    }

    /// Interpret a raw `sub_id` value. Unknown formats and malformed shapes yield `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Human-readable label for display.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::IssSub { iss, sub } => format!("{sub} ({iss})"),
            Self::Email { email } => email.clone(),
            Self::Opaque { id } => id.clone(),
            Self::SessionId { session_id } => format!("session {session_id}"),
        }
    }
}

/// Read-only view over a session-risk-change payload.
///
/// Every accessor returns `None` when the field is absent or has the wrong
/// JSON type, so a sloppy transmitter never causes a processing failure.
#[derive(Debug, Clone, Copy)]
pub struct RiskChange<'a> {
    payload: &'a Value,
}

impl<'a> RiskChange<'a> {
    /// Wrap a payload taken from a SET's `events` map.
    #[must_use]
    pub const fn new(payload: &'a Value) -> Self {
        Self { payload }
    }

    fn str_field(&self, name: &str) -> Option<&'a str> {
        self.payload.get(name).and_then(Value::as_str)
    }

    /// `risk_level`, verbatim.
    #[must_use]
    pub fn risk_level(&self) -> Option<&'a str> {
        self.str_field("risk_level")
    }

    /// `risk_type`, verbatim.
    #[must_use]
    pub fn risk_type(&self) -> Option<&'a str> {
        self.str_field("risk_type")
    }

    /// `initiating_entity`, verbatim.
    #[must_use]
    pub fn initiating_entity(&self) -> Option<&'a str> {
        self.str_field("initiating_entity")
    }

    /// Admin-facing reason for `locale`.
    #[must_use]
    pub fn reason_admin(&self, locale: &str) -> Option<&'a str> {
        self.payload.get("reason_admin")?.get(locale)?.as_str()
    }

    /// Transmitter-side event time in milliseconds since the epoch.
    #[must_use]
    pub fn event_timestamp_ms(&self) -> Option<i64> {
        self.payload.get("event_timestamp").and_then(Value::as_i64)
    }
}
