//! Read-only views over the [`EventLog`]: JSON history and HTML dashboard.

use crate::event::{CaepEventType, RiskChange, SubjectIdentifier};
use crate::log::{EventLog, EventRecord};
use crate::policy::RiskLevel;
use crate::set::claim_text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of records returned by the history query and listed on the dashboard.
pub const RECENT_EVENTS: usize = 10;

const ONE_HOUR_MS: i64 = 60 * 60 * 1000;

/// Payload of the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventHistory {
    /// Records currently held by the log
    pub total_events: usize,
    /// Most recent records, oldest first
    pub events: Vec<EventRecord>,
}

impl EventHistory {
    /// Snapshot the last [`RECENT_EVENTS`] records.
    #[must_use]
    pub fn from_log(log: &EventLog) -> Self {
        let (total_events, events) = log.recent_with_total(RECENT_EVENTS);
        Self {
            total_events,
            events,
        }
    }
}

/// Snapshot of the whole log for rendering.
#[derive(Debug, Clone)]
pub struct DashboardView {
    records: Vec<EventRecord>,
}

impl DashboardView {
    /// Snapshot every record currently held.
    #[must_use]
    pub fn from_log(log: &EventLog) -> Self {
        Self {
            records: log.recent(log.capacity()),
        }
    }

    /// Build a view from records in insertion order.
    #[must_use]
    pub const fn from_records(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// Total records in the snapshot.
    #[must_use]
    pub fn total_events(&self) -> usize {
        self.records.len()
    }

    /// Records received strictly less than one hour before `now`.
    #[must_use]
    pub fn events_last_hour(&self, now: DateTime<Utc>) -> usize {
        self.records
            .iter()
            .filter(|r| now.signed_duration_since(r.timestamp).num_milliseconds() < ONE_HOUR_MS)
            .count()
    }

    /// Render the dashboard page. Pure in `(self, now, refresh_seconds)`.
    #[must_use]
    pub fn render(&self, now: DateTime<Utc>, refresh_seconds: u64) -> String {
        let mut html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="{refresh_seconds}">
<title>SSF Receiver Dashboard</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; background: #f5f6f8; color: #222; }}
.stats {{ display: flex; gap: 1rem; margin-bottom: 1.5rem; }}
.stat {{ background: #fff; padding: 1rem 1.5rem; border-radius: 6px; }}
.stat .value {{ font-size: 2rem; font-weight: bold; }}
.event {{ background: #fff; border-left: 4px solid #888; padding: 0.75rem 1rem; margin-bottom: 0.75rem; border-radius: 4px; }}
.event.risk-high {{ border-color: #d32f2f; }}
.event.risk-medium {{ border-color: #f9a825; }}
.event.risk-low {{ border-color: #388e3c; }}
.badge {{ padding: 0.1rem 0.4rem; border-radius: 3px; color: #fff; font-size: 0.8rem; }}
.badge.risk-high {{ background: #d32f2f; }}
.badge.risk-medium {{ background: #f9a825; }}
.badge.risk-low {{ background: #388e3c; }}
.badge.risk-unknown {{ background: #777; }}
.meta {{ color: #666; font-size: 0.9rem; }}
.empty {{ color: #666; font-style: italic; }}
</style>
</head>
<body>
<h1>SSF Receiver Dashboard</h1>
<div class="stats">
<div class="stat"><div class="value">{total}</div><div>Total events</div></div>
<div class="stat"><div class="value">{last_hour}</div><div>Last hour</div></div>
</div>
<h2>Recent events</h2>
"#,
            total = self.total_events(),
            last_hour = self.events_last_hour(now),
        );

        if self.records.is_empty() {
            html.push_str("<p class=\"empty\">No events yet. Waiting for SETs on POST /events.</p>\n");
        } else {
            for record in self.records.iter().rev().take(RECENT_EVENTS) {
                render_record(&mut html, record);
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn render_record(html: &mut String, record: &EventRecord) {
    let entries: Vec<EntryView<'_>> = record
        .events
        .iter()
        .map(|(uri, payload)| EntryView::new(uri, payload))
        .collect();
    let record_class = entries
        .iter()
        .filter_map(|e| e.risk.as_ref().and_then(|r| r.level))
        .min_by_key(|level| match level {
            RiskLevel::High => 0,
            RiskLevel::Medium => 1,
            RiskLevel::Low => 2,
        })
        .map_or("risk-unknown", risk_class);

    let subject = record
        .subject
        .as_ref()
        .and_then(SubjectIdentifier::from_value)
        .map(|s| s.label())
        .unwrap_or_default();

    html.push_str(&format!(
        "<div class=\"event {record_class}\">\n<div><strong>{id}</strong> <span class=\"meta\">{time}</span></div>\n<div class=\"meta\">Issuer: {issuer} | Subject: {subject}</div>\n",
        id = escape_html(&claim_text(&record.id)),
        time = record.timestamp.format(TIME_FORMAT),
        issuer = escape_html(&claim_text(&record.issuer)),
        subject = escape_html(&subject),
    ));

    for entry in &entries {
        let name = escape_html(&entry.name);
        match &entry.risk {
            Some(risk) => html.push_str(&format!(
                "<div>{name} <span class=\"badge {class}\">{label}</span> <span class=\"meta\">{risk_type}</span> {reason}\n<div class=\"meta\">Initiated by: {entity} | Sent: {sent}</div></div>\n",
                class = risk.level.map_or("risk-unknown", risk_class),
                label = escape_html(&risk.label),
                risk_type = escape_html(risk.risk_type),
                reason = escape_html(risk.reason),
                entity = escape_html(risk.initiating_entity),
                sent = risk
                    .sent_at
                    .map(|t| t.format(TIME_FORMAT).to_string())
                    .unwrap_or_default(),
            )),
            None => html.push_str(&format!("<div>{name}</div>\n")),
        }
    }
    html.push_str("</div>\n");
}

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// One `events` entry as shown on the page.
struct EntryView<'a> {
    name: String,
    /// Present only for session-risk-change entries, the ones policy acts on.
    risk: Option<RiskView<'a>>,
}

impl<'a> EntryView<'a> {
    fn new(uri: &'a str, payload: &'a Value) -> Self {
        match CaepEventType::from_uri(uri) {
            Ok(CaepEventType::SessionRiskChange) => Self {
                name: CaepEventType::SessionRiskChange.name().to_string(),
                risk: Some(RiskView::new(RiskChange::new(payload))),
            },
            Ok(event_type) => Self {
                name: event_type.name().to_string(),
                risk: None,
            },
            Err(_) => Self {
                name: uri.to_string(),
                risk: None,
            },
        }
    }
}

struct RiskView<'a> {
    level: Option<RiskLevel>,
    label: String,
    risk_type: &'a str,
    reason: &'a str,
    initiating_entity: &'a str,
    sent_at: Option<DateTime<Utc>>,
}

impl<'a> RiskView<'a> {
    fn new(risk: RiskChange<'a>) -> Self {
        let raw_level = risk.risk_level().unwrap_or_default();
        Self {
            level: RiskLevel::parse(raw_level),
            label: raw_level.to_uppercase(),
            risk_type: risk.risk_type().unwrap_or_default(),
            reason: risk.reason_admin("en").unwrap_or_default(),
            initiating_entity: risk.initiating_entity().unwrap_or_default(),
            sent_at: risk
                .event_timestamp_ms()
                .and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}

const fn risk_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "risk-high",
        RiskLevel::Medium => "risk-medium",
        RiskLevel::Low => "risk-low",
    }
}

/// Escape text for inclusion in HTML element content or quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
