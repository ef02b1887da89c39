//! Shared application state handed to every handler.

use crate::config::Config;
use ssf_caep::{EventLog, Processor, SsfConfiguration};
use std::sync::Arc;

/// Components the handlers work with. Cheap to clone; the event log is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    processor: Processor,
    discovery: Arc<SsfConfiguration>,
    dashboard_refresh_seconds: u64,
    max_body_bytes: usize,
}

impl AppState {
    /// Build state around a fresh, empty event log.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_log(config, EventLog::new())
    }

    /// Build state around an existing log, so callers can observe it.
    #[must_use]
    pub fn with_log(config: &Config, log: EventLog) -> Self {
        Self {
            processor: Processor::new(log),
            discovery: Arc::new(SsfConfiguration::for_issuer(config.receiver_issuer_str())),
            dashboard_refresh_seconds: config.dashboard_refresh_seconds,
            max_body_bytes: config.max_body_bytes,
        }
    }

    /// Processor for inbound SETs.
    #[must_use]
    pub const fn processor(&self) -> &Processor {
        &self.processor
    }

    /// The event log shared by the processor and the read views.
    #[must_use]
    pub const fn log(&self) -> &EventLog {
        self.processor.log()
    }

    /// Static discovery document.
    #[must_use]
    pub fn discovery(&self) -> &SsfConfiguration {
        &self.discovery
    }

    /// Dashboard auto-refresh interval.
    #[must_use]
    pub const fn dashboard_refresh_seconds(&self) -> u64 {
        self.dashboard_refresh_seconds
    }

    /// Request body limit.
    #[must_use]
    pub const fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}
