//! Bounded in-memory history of processed SETs.

use crate::set::ValidatedSet;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::Arc;

/// Maximum number of records retained. Older records are evicted first.
pub const EVENT_LOG_CAPACITY: usize = 100;

/// A processed SET as stored in the log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    /// Copied from `jti`, JSON type preserved. Not deduplicated.
    pub id: Value,
    /// Receipt time on the receiver clock
    pub timestamp: DateTime<Utc>,
    /// Copied from `iss`, JSON type preserved
    pub issuer: Value,
    /// Copied from `sub_id`
    pub subject: Option<Value>,
    /// Copied verbatim from `events`
    pub events: Map<String, Value>,
    /// Always `true` once stored
    pub processed: bool,
}

impl EventRecord {
    /// Normalize a validated SET received at `timestamp`.
    #[must_use]
    pub fn from_set(set: ValidatedSet, timestamp: DateTime<Utc>) -> Self {
        let (id, issuer, subject, events) = set.into_parts();
        Self {
            id,
            timestamp,
            issuer,
            subject,
            events,
            processed: true,
        }
    }
}

/// Append-only, FIFO-evicting record store.
///
/// Cloning yields another handle to the same log. Every operation takes the
/// inner lock once, so an append is atomic with respect to concurrent readers
/// and writers.
#[derive(Debug, Clone)]
pub struct EventLog {
    records: Arc<Mutex<VecDeque<EventRecord>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(EVENT_LOG_CAPACITY + 1))),
        }
    }

    /// Append at the newest end, evicting from the oldest end past capacity.
    pub fn append(&self, record: EventRecord) {
        let mut records = self.records.lock();
        records.push_back(record);
        while records.len() > EVENT_LOG_CAPACITY {
            records.pop_front();
        }
    }

    /// The last `n` records, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<EventRecord> {
        let records = self.records.lock();
        let skip = records.len().saturating_sub(n);
        records.iter().skip(skip).cloned().collect()
    }

    /// Current size together with the last `n` records, read under one lock.
    #[must_use]
    pub fn recent_with_total(&self, n: usize) -> (usize, Vec<EventRecord>) {
        let records = self.records.lock();
        let skip = records.len().saturating_sub(n);
        (records.len(), records.iter().skip(skip).cloned().collect())
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Fixed upper bound on [`len`](Self::len).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        EVENT_LOG_CAPACITY
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
