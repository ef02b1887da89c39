//! Policy simulation for session-risk-change events.
//!
//! Decisions are advisory. Nothing here enforces anything; the only side
//! effect is a log line per decision.

use crate::event::RiskChange;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Recognized risk levels. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Immediate action required
    High,
    /// Elevated risk
    Medium,
    /// Informational
    Low,
}

impl RiskLevel {
    /// Parse the literal strings `high`, `medium` and `low`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Simulated response to a risk change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PolicyAction {
    /// Revoke active sessions and force re-authentication
    RevokeSessions,
    /// Require step-up authentication on the next request
    RequireStepUp,
    /// Record the event and take no further action
    LogOnly,
    /// Fallback for absent or unrecognized risk levels
    StandardMonitoring,
}

impl PolicyAction {
    /// Total mapping from a raw `risk_level` to an action.
    #[must_use]
    pub fn for_risk_level(risk_level: Option<&str>) -> Self {
        match risk_level.and_then(RiskLevel::parse) {
            Some(RiskLevel::High) => Self::RevokeSessions,
            Some(RiskLevel::Medium) => Self::RequireStepUp,
            Some(RiskLevel::Low) => Self::LogOnly,
            None => Self::StandardMonitoring,
        }
    }

    /// Operator-facing description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::RevokeSessions => "Revoke active sessions and require re-authentication",
            Self::RequireStepUp => "Require step-up authentication",
            Self::LogOnly => "Log event, no action required",
            Self::StandardMonitoring => "Apply standard monitoring",
        }
    }
}

/// Outcome of simulating policy for one event entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyDecision {
    /// Event-type URI the decision was made for
    pub event_type: String,
    /// Raw risk level as received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    /// Chosen action
    pub action: PolicyAction,
}

/// Simulate the policy response to a session-risk-change entry.
#[must_use]
pub fn evaluate(event_type: &str, risk: &RiskChange<'_>) -> PolicyDecision {
    let risk_level = risk.risk_level();
    let action = PolicyAction::for_risk_level(risk_level);
    let reason = risk.reason_admin("en").unwrap_or_default();

    match action {
        PolicyAction::RevokeSessions => warn!(
            risk_level = risk_level.unwrap_or_default(),
            action = ?action,
            reason,
            "High risk detected: {}",
            action.description()
        ),
        _ => info!(
            risk_level = risk_level.unwrap_or_default(),
            action = ?action,
            reason,
            "Policy decision: {}",
            action.description()
        ),
    }

    PolicyDecision {
        event_type: event_type.to_string(),
        risk_level: risk_level.map(str::to_string),
        action,
    }
}
