//! Security Event Token (SET) shape per RFC 8417.
//!
//! Inbound SETs arrive as untrusted JSON and go through [`validate`], which
//! only checks the minimal structure the pipeline relies on. Outbound SETs
//! (fixtures, demo producers) are built with [`SetBuilder`].

use crate::event::{SESSION_RISK_CHANGE_URI, SubjectIdentifier};
use crate::{CaepError, CaepResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::borrow::Cow;
use uuid::Uuid;

/// A SET that passed structural validation.
///
/// `iss`, `jti` and `events` are guaranteed present; everything else about
/// the token is still untrusted. `iss` and `jti` keep the JSON type the
/// transmitter sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSet {
    iss: Value,
    jti: Value,
    sub_id: Option<Value>,
    events: Map<String, Value>,
}

impl ValidatedSet {
    /// Issuer claim.
    #[must_use]
    pub const fn iss(&self) -> &Value {
        &self.iss
    }

    /// Token identifier claim.
    #[must_use]
    pub const fn jti(&self) -> &Value {
        &self.jti
    }

    /// Raw subject identifier, if the token carried one.
    #[must_use]
    pub const fn sub_id(&self) -> Option<&Value> {
        self.sub_id.as_ref()
    }

    /// Event-type URI to payload, in the order the transmitter wrote them.
    #[must_use]
    pub const fn events(&self) -> &Map<String, Value> {
        &self.events
    }

    /// Split into `(jti, iss, sub_id, events)`.
    #[must_use]
    pub fn into_parts(self) -> (Value, Value, Option<Value>, Map<String, Value>) {
        (self.jti, self.iss, self.sub_id, self.events)
    }
}

/// Check a decoded payload for the minimal SET shape.
///
/// Succeeds iff the payload is an object whose `iss`, `jti` and `events`
/// claims are present and non-null, and `events` is an object.
///
/// # Errors
///
/// Returns [`CaepError::MalformedSet`] naming the first offending claim.
pub fn validate(payload: &Value) -> CaepResult<ValidatedSet> {
    let claims = payload
        .as_object()
        .ok_or_else(|| CaepError::malformed("payload is not a JSON object"))?;

    let iss = required_claim(claims, "iss")?;
    let jti = required_claim(claims, "jti")?;
    let events = match claims.get("events") {
        None | Some(Value::Null) => return Err(CaepError::malformed("missing claim: events")),
        Some(Value::Object(events)) => events.clone(),
        Some(_) => return Err(CaepError::malformed("claim events is not an object")),
    };
    let sub_id = claims.get("sub_id").filter(|v| !v.is_null()).cloned();

    Ok(ValidatedSet {
        iss,
        jti,
        sub_id,
        events,
    })
}

fn required_claim(claims: &Map<String, Value>, name: &str) -> CaepResult<Value> {
    match claims.get(name) {
        None | Some(Value::Null) => Err(CaepError::malformed(format!("missing claim: {name}"))),
        Some(value) => Ok(value.clone()),
    }
}

/// Display form of a claim: strings unquoted, anything else as JSON text.
#[must_use]
pub fn claim_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Security Event Token as a transmitter serializes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityEventToken {
    /// Issuer
    pub iss: String,
    /// JWT ID (unique identifier)
    pub jti: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Subject of the events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<SubjectIdentifier>,
    /// Events map (event URI -> event data)
    pub events: Map<String, Value>,
}

impl SecurityEventToken {
    /// Get the event type URIs in this SET.
    #[must_use]
    pub fn event_types(&self) -> Vec<&str> {
        self.events.keys().map(String::as_str).collect()
    }

    /// Check if this SET contains a specific event type.
    #[must_use]
    pub fn contains_event_type(&self, uri: &str) -> bool {
        self.events.contains_key(uri)
    }

    /// Get the number of events in this SET.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Encode as the JSON body a push transmitter sends.
    ///
    /// # Errors
    ///
    /// Returns [`CaepError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> CaepResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// SET Builder for fluent construction.
pub struct SetBuilder {
    issuer: String,
    audience: Option<String>,
    jti: Option<String>,
    subject: Option<SubjectIdentifier>,
    events: Map<String, Value>,
}

impl SetBuilder {
    /// Create a new SET builder.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: None,
            jti: None,
            subject: None,
            events: Map::new(),
        }
    }

    /// Set the audience claim.
    #[must_use]
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set the token identifier. Defaults to `event-<uuid>`.
    #[must_use]
    pub fn jti(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Set the subject identifier.
    #[must_use]
    pub fn subject(mut self, subject: SubjectIdentifier) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Add an arbitrary event entry.
    #[must_use]
    pub fn event(mut self, uri: impl Into<String>, payload: Value) -> Self {
        self.events.insert(uri.into(), payload);
        self
    }

    /// Add a system-initiated session-risk-change entry.
    #[must_use]
    pub fn risk_change(self, risk_level: &str, risk_type: &str, reason_en: &str) -> Self {
        let payload = json!({
            "initiating_entity": "system",
            "risk_level": risk_level,
            "risk_type": risk_type,
            "reason_admin": { "en": reason_en },
            "event_timestamp": Utc::now().timestamp_millis(),
        });
        self.event(SESSION_RISK_CHANGE_URI, payload)
    }

    /// Build the SET.
    #[must_use]
    pub fn build(self) -> SecurityEventToken {
        SecurityEventToken {
            iss: self.issuer,
            jti: self
                .jti
                .unwrap_or_else(|| format!("event-{}", Uuid::new_v4())),
            iat: Utc::now().timestamp(),
            aud: self.audience,
            sub_id: self.subject,
            events: self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_minimal_set() {
        let set = validate(&json!({
            "iss": "https://issuer.example.com",
            "jti": "event-1",
            "events": {}
        }))
        .unwrap();

        assert_eq!(set.iss(), "https://issuer.example.com");
        assert_eq!(set.jti(), "event-1");
        assert!(set.sub_id().is_none());
        assert!(set.events().is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_claims() {
        for missing in ["iss", "jti", "events"] {
            let mut payload = json!({"iss": "i", "jti": "j", "events": {}});
            payload.as_object_mut().unwrap().remove(missing);
            let err = validate(&payload).unwrap_err();
            assert!(err.to_string().contains(missing), "{err}");
        }
    }

    #[test]
    fn test_validate_rejects_null_claims() {
        let err = validate(&json!({"iss": null, "jti": "j", "events": {}})).unwrap_err();
        assert!(matches!(err, CaepError::MalformedSet(_)));
    }

    #[test]
    fn test_validate_rejects_non_objects() {
        assert!(validate(&json!([])).is_err());
        assert!(validate(&json!("set")).is_err());
        assert!(validate(&json!({"iss": "i", "jti": "j", "events": []})).is_err());
    }

    #[test]
    fn test_validate_keeps_claim_types() {
        let set = validate(&json!({"iss": "i", "jti": 42, "events": {}})).unwrap();
        assert_eq!(set.jti(), &json!(42));
        assert_eq!(claim_text(set.jti()), "42");
        assert_eq!(claim_text(set.iss()), "i");
    }

    #[test]
    fn test_validate_drops_null_subject() {
        let set = validate(&json!({"iss": "i", "jti": "j", "sub_id": null, "events": {}})).unwrap();
        assert!(set.sub_id().is_none());
    }

    #[test]
    fn test_validate_preserves_event_order() {
        let payload: Value = serde_json::from_str(
            r#"{"iss":"i","jti":"j","events":{"urn:z":{},"urn:a":{},"urn:m":{}}}"#,
        )
        .unwrap();
        let set = validate(&payload).unwrap();
        let keys: Vec<&str> = set.events().keys().map(String::as_str).collect();
        assert_eq!(keys, ["urn:z", "urn:a", "urn:m"]);
    }

    #[test]
    fn test_builder_risk_change() {
        let set = SetBuilder::new("https://ssf-lab-mcp-server.example.com")
            .audience("https://ssf-lab-receiver.example.com")
            .jti("event-1700000000-1")
            .subject(SubjectIdentifier::email("lab-student@example.com"))
            .risk_change("high", "sensitive_file_access", "Sensitive file accessed: a.secret")
            .build();

        assert_eq!(set.jti, "event-1700000000-1");
        assert!(set.contains_event_type(SESSION_RISK_CHANGE_URI));
        assert_eq!(set.event_count(), 1);
        assert!(set.iat > 0);
    }

    #[test]
    fn test_built_set_passes_validation() {
        let set = SetBuilder::new("https://issuer.example.com")
            .subject(SubjectIdentifier::email("user@example.com"))
            .risk_change("low", "login", "New device")
            .build();
        let wire = set.to_json().unwrap();

        let validated = validate(&wire).unwrap();
        assert_eq!(validated.jti(), &set.jti);
        assert!(claim_text(validated.jti()).starts_with("event-"));
        assert_eq!(validated.sub_id().unwrap()["email"], "user@example.com");
        assert_eq!(set.event_types(), [SESSION_RISK_CHANGE_URI]);
    }
}
