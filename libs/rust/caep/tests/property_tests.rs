//! Property-based tests for the SET pipeline.
//!
//! Uses proptest with 100 cases per property.

use chrono::Utc;
use proptest::prelude::*;
use ssf_caep::*;
use test_utils::fixtures;
use test_utils::{malformed_set_strategy, risk_level_strategy, valid_set_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every structurally valid SET is accepted and grows the log by one
    /// until the capacity bound, where the size holds and the oldest goes.
    #[test]
    fn prop_valid_set_appends_exactly_one(
        prefill in 0usize..=EVENT_LOG_CAPACITY,
        set in valid_set_strategy(),
    ) {
        let processor = Processor::default();
        for i in 0..prefill {
            processor
                .process_payload(&fixtures::empty_events_set(&format!("prefill-{i}")))
                .unwrap();
        }
        let before = processor.log().len();
        let oldest_before = processor.log().recent(EVENT_LOG_CAPACITY).first().map(|r| r.id.clone());

        let result = processor.process_payload(&set);
        prop_assert!(result.is_ok());

        if before < EVENT_LOG_CAPACITY {
            prop_assert_eq!(processor.log().len(), before + 1);
        } else {
            prop_assert_eq!(processor.log().len(), EVENT_LOG_CAPACITY);
            let oldest_after = processor.log().recent(EVENT_LOG_CAPACITY).first().map(|r| r.id.clone());
            prop_assert_eq!(oldest_after, Some(serde_json::json!("prefill-1")));
            prop_assert_eq!(oldest_before, Some(serde_json::json!("prefill-0")));
        }

        let newest = processor.log().recent(1);
        prop_assert_eq!(&newest[0].id, &set["jti"]);
        prop_assert_eq!(&Some(newest[0].events.clone()), &set["events"].as_object().cloned());
    }

    /// A SET missing `iss`, `jti` or `events` never reaches the log.
    #[test]
    fn prop_malformed_set_never_mutates_log(set in malformed_set_strategy()) {
        let processor = Processor::default();
        processor.process_payload(&fixtures::high_risk_set("seed")).unwrap();

        let result = processor.process_payload(&set);

        prop_assert!(matches!(result, Err(CaepError::MalformedSet(_))));
        prop_assert_eq!(processor.log().len(), 1);
    }

    /// The risk-level mapping is total and only the three literals escape the default.
    #[test]
    fn prop_risk_mapping_is_total(level in risk_level_strategy()) {
        let action = PolicyAction::for_risk_level(level.as_deref());
        let expected = match level.as_deref() {
            Some("high") => PolicyAction::RevokeSessions,
            Some("medium") => PolicyAction::RequireStepUp,
            Some("low") => PolicyAction::LogOnly,
            _ => PolicyAction::StandardMonitoring,
        };
        prop_assert_eq!(action, expected);
    }

    /// Reads never change what the next read returns.
    #[test]
    fn prop_read_views_are_idempotent(count in 0usize..30) {
        let log = EventLog::new();
        let processor = Processor::new(log.clone());
        for i in 0..count {
            processor.process_payload(&fixtures::high_risk_set(&format!("event-{i}"))).unwrap();
        }

        let now = Utc::now();
        let first_history = EventHistory::from_log(&log);
        let first_page = DashboardView::from_log(&log).render(now, 5);
        let second_history = EventHistory::from_log(&log);
        let second_page = DashboardView::from_log(&log).render(now, 5);

        prop_assert_eq!(first_history, second_history);
        prop_assert_eq!(first_page, second_page);
    }
}

#[test]
fn test_fifo_bound_after_101_appends() {
    let processor = Processor::default();
    for i in 0..=EVENT_LOG_CAPACITY {
        processor
            .process_payload(&fixtures::high_risk_set(&format!("event-{i}")))
            .unwrap();
    }

    let records = processor.log().recent(usize::MAX);
    assert_eq!(records.len(), EVENT_LOG_CAPACITY);
    assert!(records.iter().all(|r| r.id != "event-0"));
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str().unwrap()).collect();
    let expected: Vec<String> = (1..=EVENT_LOG_CAPACITY).map(|i| format!("event-{i}")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_producer_set_gets_revoke_decision() {
    let processor = Processor::default();
    let result = processor
        .process_payload(&fixtures::high_risk_set("event-1700000000-1"))
        .unwrap();

    assert_eq!(result.decisions.len(), 1);
    assert_eq!(result.decisions[0].action, PolicyAction::RevokeSessions);
    assert_eq!(result.decisions[0].event_type, SESSION_RISK_CHANGE_URI);
}

#[test]
fn test_session_revoked_is_passed_through() {
    let processor = Processor::default();
    let result = processor
        .process_payload(&fixtures::session_revoked_set("event-2"))
        .unwrap();

    assert!(result.decisions.is_empty());
    let stored = processor.log().recent(1);
    assert!(stored[0].events.contains_key(fixtures::SESSION_REVOKED));
}
