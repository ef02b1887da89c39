//! SET processing: event-type dispatch, policy simulation and logging.

use crate::event::{CaepEventType, RiskChange};
use crate::log::{EventLog, EventRecord};
use crate::policy::{self, PolicyDecision};
use crate::set::{self, ValidatedSet, claim_text};
use crate::CaepResult;
use chrono::Utc;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Result of processing a SET.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Event ID from the SET, in display form
    pub event_id: String,
    /// One decision per session-risk-change entry, in `events` order
    pub decisions: Vec<PolicyDecision>,
    /// Whether the record was stored
    pub processed: bool,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Turns validated SETs into stored [`EventRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    log: EventLog,
}

impl Processor {
    /// Create a processor appending to `log`.
    #[must_use]
    pub const fn new(log: EventLog) -> Self {
        Self { log }
    }

    /// The log this processor appends to.
    #[must_use]
    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// Process a validated SET and append exactly one record.
    ///
    /// Entries are handled independently: unknown event types are stored
    /// without a decision and a risk change with unusable fields falls back
    /// to the default action.
    #[instrument(skip(self, set), fields(jti = %claim_text(set.jti()), issuer = %claim_text(set.iss())))]
    pub fn process(&self, set: ValidatedSet) -> ProcessResult {
        let start = Instant::now();
        let timestamp = Utc::now();

        let mut decisions = Vec::new();
        for (uri, payload) in set.events() {
            match CaepEventType::from_uri(uri) {
                Ok(CaepEventType::SessionRiskChange) => {
                    decisions.push(policy::evaluate(uri, &RiskChange::new(payload)));
                }
                Ok(event_type) => {
                    debug!(event_type = event_type.name(), "No policy rule for event type");
                }
                Err(e) => debug!(error = %e, "Passing through unrecognized event type"),
            }
        }

        let event_id = claim_text(set.jti()).into_owned();
        let event_count = set.events().len();
        self.log.append(EventRecord::from_set(set, timestamp));

        let processing_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            event_count,
            decisions = decisions.len(),
            processing_time_ms,
            "SET processed"
        );

        ProcessResult {
            event_id,
            decisions,
            processed: true,
            processing_time_ms,
        }
    }

    /// Validate `payload` and process it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CaepError::MalformedSet`] without touching the log
    /// when the payload lacks `iss`, `jti` or `events`.
    pub fn process_payload(&self, payload: &Value) -> CaepResult<ProcessResult> {
        let set = set::validate(payload)?;
        Ok(self.process(set))
    }
}
