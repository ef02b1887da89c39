//! Test fixtures with sample SETs.
//!
//! Shapes follow what the lab's file-access monitor pushes.

use chrono::Utc;
use serde_json::{Value, json};

/// Issuer used by the file-access monitor.
pub const PRODUCER_ISSUER: &str = "https://ssf-lab-mcp-server.example.com";

/// Audience the producer addresses.
pub const RECEIVER_AUDIENCE: &str = "https://ssf-lab-receiver.example.com";

/// Session-risk-change event-type URI.
pub const SESSION_RISK_CHANGE: &str =
    "https://schemas.openid.net/secevent/caep/event-type/session-risk-change";

/// Session-revoked event-type URI.
pub const SESSION_REVOKED: &str =
    "https://schemas.openid.net/secevent/caep/event-type/session-revoked";

/// A full risk-change SET as the producer sends it.
#[must_use]
pub fn risk_change_set(jti: &str, risk_level: &str) -> Value {
    json!({
        "iss": PRODUCER_ISSUER,
        "jti": jti,
        "iat": Utc::now().timestamp(),
        "aud": RECEIVER_AUDIENCE,
        "sub_id": {
            "format": "email",
            "email": "lab-student@example.com"
        },
        "events": {
            SESSION_RISK_CHANGE: {
                "initiating_entity": "system",
                "risk_level": risk_level,
                "risk_type": "sensitive_file_access",
                "reason_admin": {
                    "en": "Sensitive file accessed: api-keys.credentials"
                },
                "event_timestamp": Utc::now().timestamp_millis(),
                "custom_data": {
                    "file_path": "/workspace/test-files/api-keys.credentials",
                    "access_type": "file_access",
                    "lab_session": true
                }
            }
        }
    })
}

/// A high-risk SET, the producer's only output in practice.
#[must_use]
pub fn high_risk_set(jti: &str) -> Value {
    risk_change_set(jti, "high")
}

/// A SET with the given `events` map and nothing optional.
#[must_use]
pub fn set_with_events(jti: &str, events: Value) -> Value {
    json!({
        "iss": PRODUCER_ISSUER,
        "jti": jti,
        "events": events
    })
}

/// A SET whose `events` map is empty.
#[must_use]
pub fn empty_events_set(jti: &str) -> Value {
    set_with_events(jti, json!({}))
}

/// A SET carrying an event type the receiver has no rule for.
#[must_use]
pub fn session_revoked_set(jti: &str) -> Value {
    set_with_events(
        jti,
        json!({
            SESSION_REVOKED: {
                "event_timestamp": Utc::now().timestamp()
            }
        }),
    )
}
