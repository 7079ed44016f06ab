// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for roster document persistence operations.

use crate::SqlitePersistence;
use crate::tests::{create_test_audit_event, create_test_document};
use crewdesk::RosterTransition;
use crewdesk_domain::{RosterDocument, RosterStatus};

#[test]
fn test_upsert_inserts_new_document() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let document = create_test_document("logistica", "E1");
    persistence.upsert_roster_document(&document).unwrap();

    let stored = persistence
        .get_roster_document("logistica", "E1")
        .unwrap()
        .unwrap();
    assert_eq!(stored, document);
}

#[test]
fn test_upsert_replaces_existing_document() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let mut document = create_test_document("logistica", "E1");
    persistence.upsert_roster_document(&document).unwrap();

    // Second write for the same scope must update, not duplicate
    document.workers.clear();
    document.event_code = Some(String::from("FIRA26"));
    document.updated_at = Some(String::from("2026-05-02T10:00:00Z"));
    document.refresh_aggregates();
    persistence.upsert_roster_document(&document).unwrap();

    let stored = persistence
        .get_roster_document("logistica", "E1")
        .unwrap()
        .unwrap();
    assert_eq!(stored.worker_count, 0);
    assert_eq!(stored.event_code, Some(String::from("FIRA26")));

    let all = persistence.list_roster_documents(None).unwrap();
    assert_eq!(all.len(), 1, "Upsert must not create a second row");
}

#[test]
fn test_upsert_preserves_confirmed_status() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let mut document = create_test_document("cuina", "E2");
    document.status = RosterStatus::Confirmed;
    document.confirmed_at = Some(String::from("2026-05-02T10:00:00Z"));
    document.confirmed_by = Some(String::from("op-1"));
    persistence.upsert_roster_document(&document).unwrap();

    let stored = persistence
        .get_roster_document("cuina", "E2")
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RosterStatus::Confirmed);
    assert_eq!(stored.confirmed_by, Some(String::from("op-1")));
}

#[test]
fn test_get_missing_document_returns_none() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.get_roster_document("logistica", "E404").unwrap();
    assert!(result.is_none());
}

#[test]
fn test_documents_with_same_event_differ_by_department() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .upsert_roster_document(&create_test_document("logistica", "E1"))
        .unwrap();
    persistence
        .upsert_roster_document(&create_test_document("cuina", "E1"))
        .unwrap();

    let logistics = persistence
        .get_roster_document("logistica", "E1")
        .unwrap()
        .unwrap();
    let kitchen = persistence
        .get_roster_document("cuina", "E1")
        .unwrap()
        .unwrap();
    assert_eq!(logistics.department, "logistica");
    assert_eq!(kitchen.department, "cuina");
}

#[test]
fn test_list_orders_by_department_then_event() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .upsert_roster_document(&create_test_document("logistica", "E2"))
        .unwrap();
    persistence
        .upsert_roster_document(&create_test_document("cuina", "E9"))
        .unwrap();
    persistence
        .upsert_roster_document(&create_test_document("logistica", "E1"))
        .unwrap();

    let all = persistence.list_roster_documents(None).unwrap();
    let scopes: Vec<(String, String)> = all
        .iter()
        .map(|d| (d.department.clone(), d.event_id.clone()))
        .collect();
    assert_eq!(
        scopes,
        vec![
            (String::from("cuina"), String::from("E9")),
            (String::from("logistica"), String::from("E1")),
            (String::from("logistica"), String::from("E2")),
        ]
    );
}

#[test]
fn test_list_filters_by_department() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .upsert_roster_document(&create_test_document("logistica", "E1"))
        .unwrap();
    persistence
        .upsert_roster_document(&create_test_document("cuina", "E2"))
        .unwrap();

    let filtered = persistence.list_roster_documents(Some("cuina")).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].event_id, "E2");
}

#[test]
fn test_find_by_event_code_matches_stored_code() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let mut document = create_test_document("logistica", "E1");
    document.event_code = Some(String::from("FIRA26"));
    persistence.upsert_roster_document(&document).unwrap();

    let found = persistence
        .find_roster_by_event_code("logistica", "FIRA26")
        .unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().event_id, "E1");

    let missing = persistence
        .find_roster_by_event_code("logistica", "NOPE")
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_find_by_event_code_prefers_lowest_event_id() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let mut second = create_test_document("logistica", "E2");
    second.event_code = Some(String::from("FIRA26"));
    persistence.upsert_roster_document(&second).unwrap();

    let mut first = create_test_document("logistica", "E1");
    first.event_code = Some(String::from("FIRA26"));
    persistence.upsert_roster_document(&first).unwrap();

    let found = persistence
        .find_roster_by_event_code("logistica", "FIRA26")
        .unwrap()
        .unwrap();
    assert_eq!(found.event_id, "E1");
}

#[test]
fn test_persist_transition_stores_document_and_audit_event() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let document: RosterDocument = create_test_document("logistica", "E1");
    let transition = RosterTransition {
        document: document.clone(),
        audit_event: create_test_audit_event("UpsertRoster", Some("logistica"), Some("E1")),
        already_confirmed: false,
    };

    let event_id = persistence.persist_roster_transition(&transition).unwrap();
    assert!(event_id > 0);

    let stored = persistence
        .get_roster_document("logistica", "E1")
        .unwrap()
        .unwrap();
    assert_eq!(stored, document);

    let stored_event = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(stored_event.event.action.name, "UpsertRoster");
    assert_eq!(stored_event.event.department, Some(String::from("logistica")));
}

#[test]
fn test_idempotent_confirm_stores_audit_event_only() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let mut document = create_test_document("logistica", "E1");
    document.status = RosterStatus::Confirmed;
    document.confirmed_at = Some(String::from("2026-05-02T10:00:00Z"));
    persistence.upsert_roster_document(&document).unwrap();

    // A later confirm of an already-confirmed roster must not rewrite
    // the document, only record that the request happened.
    let mut stale = document.clone();
    stale.updated_at = Some(String::from("2026-05-03T08:00:00Z"));
    let transition = RosterTransition {
        document: stale,
        audit_event: create_test_audit_event("ConfirmRoster", Some("logistica"), Some("E1")),
        already_confirmed: true,
    };

    let event_id = persistence.persist_roster_transition(&transition).unwrap();
    assert!(event_id > 0);

    let stored = persistence
        .get_roster_document("logistica", "E1")
        .unwrap()
        .unwrap();
    assert_eq!(
        stored.updated_at,
        Some(String::from("2026-05-01T09:00:00Z")),
        "Stored document must be untouched"
    );
}
