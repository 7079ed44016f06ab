// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for audit event persistence and timeline queries.

use crate::tests::{create_test_actor, create_test_audit_event, create_test_cause};
use crate::{PersistenceError, SqlitePersistence};
use crewdesk_audit::{Action, AuditEvent, StateSnapshot};

#[test]
fn test_persist_and_get_roundtrip() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let event = AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(
            String::from("ConfirmRoster"),
            Some(String::from("Confirmed roster for department 'logistica'")),
        ),
        StateSnapshot::new(String::from("{\"status\":\"draft\"}")),
        StateSnapshot::new(String::from("{\"status\":\"confirmed\"}")),
        Some(String::from("logistica")),
        Some(String::from("E1")),
    );

    let event_id = persistence.persist_audit_event(&event).unwrap();
    assert!(event_id > 0);

    let stored = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(stored.event_id, event_id);
    assert!(stored.created_at.is_some());
    assert_eq!(stored.event, event);
}

#[test]
fn test_event_ids_increase_monotonically() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let first = persistence
        .persist_audit_event(&create_test_audit_event("UpsertRoster", None, None))
        .unwrap();
    let second = persistence
        .persist_audit_event(&create_test_audit_event("ConfirmRoster", None, None))
        .unwrap();

    assert!(second > first);
}

#[test]
fn test_get_missing_event_fails() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.get_audit_event(999);
    match result.unwrap_err() {
        PersistenceError::EventNotFound(event_id) => assert_eq!(event_id, 999),
        other => panic!("Expected EventNotFound error, got: {other:?}"),
    }
}

#[test]
fn test_timeline_returns_events_in_insertion_order() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .persist_audit_event(&create_test_audit_event(
            "UpsertRoster",
            Some("logistica"),
            Some("E1"),
        ))
        .unwrap();
    persistence
        .persist_audit_event(&create_test_audit_event(
            "ConfirmRoster",
            Some("logistica"),
            Some("E1"),
        ))
        .unwrap();

    let timeline = persistence.get_audit_timeline(None, None).unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].event.action.name, "UpsertRoster");
    assert_eq!(timeline[1].event.action.name, "ConfirmRoster");
    assert!(timeline[0].event_id < timeline[1].event_id);
}

#[test]
fn test_timeline_filters_by_department() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .persist_audit_event(&create_test_audit_event(
            "UpsertRoster",
            Some("logistica"),
            Some("E1"),
        ))
        .unwrap();
    persistence
        .persist_audit_event(&create_test_audit_event(
            "UpsertRoster",
            Some("cuina"),
            Some("E1"),
        ))
        .unwrap();
    persistence
        .persist_audit_event(&create_test_audit_event("CreateOperator", None, None))
        .unwrap();

    let timeline = persistence
        .get_audit_timeline(Some("logistica"), None)
        .unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(
        timeline[0].event.department,
        Some(String::from("logistica"))
    );
}

#[test]
fn test_timeline_filters_by_event_ref() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .persist_audit_event(&create_test_audit_event(
            "UpsertRoster",
            Some("logistica"),
            Some("E1"),
        ))
        .unwrap();
    persistence
        .persist_audit_event(&create_test_audit_event(
            "UpsertRoster",
            Some("logistica"),
            Some("E2"),
        ))
        .unwrap();

    let timeline = persistence.get_audit_timeline(None, Some("E2")).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].event.event_ref, Some(String::from("E2")));
}

#[test]
fn test_timeline_combines_both_filters() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .persist_audit_event(&create_test_audit_event(
            "UpsertRoster",
            Some("logistica"),
            Some("E1"),
        ))
        .unwrap();
    persistence
        .persist_audit_event(&create_test_audit_event(
            "UpsertRoster",
            Some("cuina"),
            Some("E1"),
        ))
        .unwrap();
    persistence
        .persist_audit_event(&create_test_audit_event(
            "UpsertRoster",
            Some("logistica"),
            Some("E2"),
        ))
        .unwrap();

    let timeline = persistence
        .get_audit_timeline(Some("logistica"), Some("E1"))
        .unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].event.action.name, "UpsertRoster");
    assert_eq!(
        timeline[0].event.department,
        Some(String::from("logistica"))
    );
    assert_eq!(timeline[0].event.event_ref, Some(String::from("E1")));
}

#[test]
fn test_unscoped_events_survive_json_roundtrip() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let event = AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(
            String::from("CreateOperator"),
            Some(String::from("Created operator 'Núria Vilà'")),
        ),
        StateSnapshot::empty(),
        StateSnapshot::new(String::from("{\"loginName\":\"NVILA\"}")),
        None,
        None,
    );

    let event_id = persistence.persist_audit_event(&event).unwrap();
    let stored = persistence.get_audit_event(event_id).unwrap();

    assert_eq!(stored.event.department, None);
    assert_eq!(stored.event.event_ref, None);
    assert_eq!(
        stored.event.action.details,
        Some(String::from("Created operator 'Núria Vilà'"))
    );
}
