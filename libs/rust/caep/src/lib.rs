//! SSF/CAEP Security Event Token receiver pipeline.
//!
//! Implements the receiving side of OpenID SSF push delivery for CAEP events.
//!
//! # Features
//! - Structural SET validation
//! - CAEP event-type dispatch and simulated policy decisions
//! - Bounded, FIFO-evicting in-memory event history
//! - JSON history and HTML dashboard views
//! - SSF configuration metadata

pub mod dashboard;
pub mod discovery;
pub mod error;
pub mod event;
pub mod log;
pub mod policy;
pub mod processor;
pub mod set;

pub use dashboard::{DashboardView, EventHistory};
pub use discovery::SsfConfiguration;
pub use error::{CaepError, CaepResult};
pub use event::{CaepEventType, RiskChange, SESSION_RISK_CHANGE_URI, SubjectIdentifier};
pub use log::{EVENT_LOG_CAPACITY, EventLog, EventRecord};
pub use policy::{PolicyAction, PolicyDecision, RiskLevel};
pub use processor::{ProcessResult, Processor};
pub use set::{SecurityEventToken, SetBuilder, ValidatedSet, claim_text, validate};
