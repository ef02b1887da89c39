//! Shared proptest generators for SET payloads.

use crate::fixtures::{SESSION_REVOKED, SESSION_RISK_CHANGE};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Claims the receiver requires on every SET.
pub const REQUIRED_CLAIMS: [&str; 3] = ["iss", "jti", "events"];

/// Risk levels, recognized or not. `None` means the field is omitted.
pub fn risk_level_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(Some("high".to_string())),
        Just(Some("medium".to_string())),
        Just(Some("low".to_string())),
        Just(Some(String::new())),
        Just(Some("unknown-value".to_string())),
        Just(None),
        "[A-Za-z]{1,10}".prop_map(Some),
    ]
}

/// Subject identifiers in SSF wire form.
pub fn subject_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        ("[a-z]{5,20}", "[a-z0-9]{10,30}").prop_map(|(iss, sub)| json!({
            "format": "iss_sub",
            "iss": format!("https://{iss}.example.com"),
            "sub": sub
        })),
        "[a-z0-9._%+-]+@[a-z0-9.-]+\\.[a-z]{2,4}".prop_map(|email| json!({
            "format": "email",
            "email": email
        })),
        "[a-z0-9]{32}".prop_map(|id| json!({"format": "opaque", "id": id})),
    ]
}

/// One `events` entry: either a risk change or a pass-through type.
pub fn event_entry_strategy() -> impl Strategy<Value = (String, Value)> {
    prop_oneof![
        (risk_level_strategy(), "[a-z_]{3,20}").prop_map(|(level, risk_type)| {
            let mut payload = Map::new();
            if let Some(level) = level {
                payload.insert("risk_level".to_string(), json!(level));
            }
            payload.insert("risk_type".to_string(), json!(risk_type));
            (SESSION_RISK_CHANGE.to_string(), Value::Object(payload))
        }),
        Just((SESSION_REVOKED.to_string(), json!({}))),
        "[a-z]{3,10}".prop_map(|name| (
            format!("https://example.com/event-type/{name}"),
            json!({"note": name})
        )),
    ]
}

/// `events` maps with zero to three entries.
pub fn events_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(event_entry_strategy(), 0..=3).prop_map(|entries| {
        Value::Object(entries.into_iter().collect())
    })
}

/// Structurally valid SETs.
pub fn valid_set_strategy() -> impl Strategy<Value = Value> {
    (
        "[a-z]{3,12}",
        "[a-z0-9-]{1,36}",
        proptest::option::of(subject_strategy()),
        events_strategy(),
    )
        .prop_map(|(issuer, jti, subject, events)| {
            let mut set = json!({
                "iss": format!("https://{issuer}.example.com"),
                "jti": jti,
                "events": events
            });
            if let (Some(subject), Some(claims)) = (subject, set.as_object_mut()) {
                claims.insert("sub_id".to_string(), subject);
            }
            set
        })
}

/// SETs with at least one required claim removed or nulled.
pub fn malformed_set_strategy() -> impl Strategy<Value = Value> {
    (
        valid_set_strategy(),
        prop::sample::subsequence(REQUIRED_CLAIMS.to_vec(), 1..=3),
        any::<bool>(),
    )
        .prop_map(|(mut set, broken, use_null)| {
            if let Some(claims) = set.as_object_mut() {
                for claim in broken {
                    if use_null {
                        claims.insert(claim.to_string(), Value::Null);
                    } else {
                        claims.remove(claim);
                    }
                }
            }
            set
        })
}
