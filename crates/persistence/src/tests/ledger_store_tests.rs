// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for assignment ledger persistence operations.

use crate::tests::{create_test_audit_event, create_test_entry};
use crate::{PersistenceError, SqlitePersistence};
use crewdesk::LedgerTransition;
use crewdesk_domain::{AssignmentLedgerEntry, LedgerStatus};

fn confirmed(entry: &AssignmentLedgerEntry) -> AssignmentLedgerEntry {
    let mut updated = entry.clone();
    updated.status = LedgerStatus::Confirmed;
    updated.updated_at = String::from("2026-05-02T10:00:00Z");
    updated.updated_by = Some(String::from("op-1"));
    updated.confirmed_at = Some(String::from("2026-05-02T10:00:00Z"));
    updated.revision = entry.revision + 1;
    updated
}

#[test]
fn test_insert_and_get_roundtrip() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let mut entry = create_test_entry("ledger-1", "1234ABC");
    entry.vehicle_type = Some(String::from("furgoneta"));
    entry.driver_name = Some(String::from("Jordi Prats"));
    entry.department = Some(String::from("Logística"));
    entry.notes = Some(String::from("material fràgil"));
    entry.event_code = Some(String::from("FIRA26"));
    entry.requested_by = Some(String::from("op-2"));
    persistence.insert_ledger_entry(&entry).unwrap();

    let stored = persistence.get_ledger_entry("ledger-1").unwrap().unwrap();
    assert_eq!(stored, entry);
}

#[test]
fn test_get_missing_entry_returns_none() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.get_ledger_entry("ledger-404").unwrap();
    assert!(result.is_none());
}

#[test]
fn test_guarded_update_bumps_revision() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let entry = create_test_entry("ledger-1", "1234ABC");
    persistence.insert_ledger_entry(&entry).unwrap();

    let updated = confirmed(&entry);
    persistence
        .update_ledger_entry_guarded(&updated, entry.revision)
        .unwrap();

    let stored = persistence.get_ledger_entry("ledger-1").unwrap().unwrap();
    assert_eq!(stored.status, LedgerStatus::Confirmed);
    assert_eq!(stored.revision, 1);
    assert_eq!(stored.updated_by, Some(String::from("op-1")));
    assert_eq!(stored.confirmed_at, Some(String::from("2026-05-02T10:00:00Z")));
}

#[test]
fn test_guarded_update_rejects_stale_revision() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let entry = create_test_entry("ledger-1", "1234ABC");
    persistence.insert_ledger_entry(&entry).unwrap();

    let first = confirmed(&entry);
    persistence
        .update_ledger_entry_guarded(&first, entry.revision)
        .unwrap();

    // A second writer still holding revision 0 must not win
    let mut stale = entry.clone();
    stale.status = LedgerStatus::Cancelled;
    stale.revision = 1;
    let result = persistence.update_ledger_entry_guarded(&stale, 0);

    match result.unwrap_err() {
        PersistenceError::RevisionConflict { entry_id } => {
            assert_eq!(entry_id, "ledger-1");
        }
        other => panic!("Expected RevisionConflict error, got: {other:?}"),
    }

    let stored = persistence.get_ledger_entry("ledger-1").unwrap().unwrap();
    assert_eq!(stored.status, LedgerStatus::Confirmed);
    assert_eq!(stored.revision, 1);
}

#[test]
fn test_guarded_update_reports_missing_entry() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let ghost = confirmed(&create_test_entry("ledger-404", "9999ZZZ"));
    let result = persistence.update_ledger_entry_guarded(&ghost, 0);

    match result.unwrap_err() {
        PersistenceError::EntryNotFound(entry_id) => {
            assert_eq!(entry_id, "ledger-404");
        }
        other => panic!("Expected EntryNotFound error, got: {other:?}"),
    }
}

#[test]
fn test_list_filters_by_plate() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .insert_ledger_entry(&create_test_entry("ledger-1", "1234ABC"))
        .unwrap();
    persistence
        .insert_ledger_entry(&create_test_entry("ledger-2", "9999ZZZ"))
        .unwrap();

    let filtered = persistence
        .list_ledger_entries(Some("1234ABC"), None, None, false)
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].entry_id, "ledger-1");
}

#[test]
fn test_list_filters_by_date_range() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let mut early = create_test_entry("ledger-1", "1234ABC");
    early.start_date = String::from("2026-05-01");
    early.end_date = String::from("2026-05-01");
    persistence.insert_ledger_entry(&early).unwrap();

    let mut middle = create_test_entry("ledger-2", "1234ABC");
    middle.start_date = String::from("2026-05-10");
    middle.end_date = String::from("2026-05-10");
    persistence.insert_ledger_entry(&middle).unwrap();

    let mut late = create_test_entry("ledger-3", "1234ABC");
    late.start_date = String::from("2026-05-20");
    late.end_date = String::from("2026-05-20");
    persistence.insert_ledger_entry(&late).unwrap();

    let filtered = persistence
        .list_ledger_entries(None, Some("2026-05-05"), Some("2026-05-15"), false)
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].entry_id, "ledger-2");
}

#[test]
fn test_list_hides_cancelled_entries_by_default() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .insert_ledger_entry(&create_test_entry("ledger-1", "1234ABC"))
        .unwrap();

    let mut cancelled = create_test_entry("ledger-2", "9999ZZZ");
    cancelled.status = LedgerStatus::Cancelled;
    persistence.insert_ledger_entry(&cancelled).unwrap();

    let visible = persistence
        .list_ledger_entries(None, None, None, false)
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].entry_id, "ledger-1");

    let all = persistence
        .list_ledger_entries(None, None, None, true)
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_list_orders_by_start_date_then_time() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let mut afternoon = create_test_entry("ledger-1", "1234ABC");
    afternoon.start_time = String::from("15:00");
    persistence.insert_ledger_entry(&afternoon).unwrap();

    let mut earlier_day = create_test_entry("ledger-2", "1234ABC");
    earlier_day.start_date = String::from("2026-05-09");
    persistence.insert_ledger_entry(&earlier_day).unwrap();

    let mut morning = create_test_entry("ledger-3", "1234ABC");
    morning.start_time = String::from("07:00");
    persistence.insert_ledger_entry(&morning).unwrap();

    let listed = persistence
        .list_ledger_entries(None, None, None, true)
        .unwrap();
    let ids: Vec<&str> = listed.iter().map(|e| e.entry_id.as_str()).collect();
    assert_eq!(ids, vec!["ledger-2", "ledger-3", "ledger-1"]);
}

#[test]
fn test_list_all_includes_cancelled_entries() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .insert_ledger_entry(&create_test_entry("ledger-1", "1234ABC"))
        .unwrap();

    let mut cancelled = create_test_entry("ledger-2", "9999ZZZ");
    cancelled.status = LedgerStatus::Cancelled;
    persistence.insert_ledger_entry(&cancelled).unwrap();

    let all = persistence.list_all_ledger_entries().unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_persist_transition_updates_entry_and_stores_audit_event() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let entry = create_test_entry("ledger-1", "1234ABC");
    persistence.insert_ledger_entry(&entry).unwrap();

    let transition = LedgerTransition {
        entry: confirmed(&entry),
        audit_event: create_test_audit_event("AcceptAssignment", None, Some("FIRA26")),
        already_applied: false,
    };

    let event_id = persistence.persist_ledger_transition(&transition).unwrap();
    assert!(event_id > 0);

    let stored = persistence.get_ledger_entry("ledger-1").unwrap().unwrap();
    assert_eq!(stored.status, LedgerStatus::Confirmed);
    assert_eq!(stored.revision, 1);

    let stored_event = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(stored_event.event.action.name, "AcceptAssignment");
}

#[test]
fn test_persist_transition_rejects_concurrent_write() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let entry = create_test_entry("ledger-1", "1234ABC");
    persistence.insert_ledger_entry(&entry).unwrap();

    let transition = LedgerTransition {
        entry: confirmed(&entry),
        audit_event: create_test_audit_event("AcceptAssignment", None, None),
        already_applied: false,
    };
    persistence.persist_ledger_transition(&transition).unwrap();

    // Replaying the same transition carries a stale revision
    let result = persistence.persist_ledger_transition(&transition);
    match result.unwrap_err() {
        PersistenceError::RevisionConflict { entry_id } => {
            assert_eq!(entry_id, "ledger-1");
        }
        other => panic!("Expected RevisionConflict error, got: {other:?}"),
    }
}

#[test]
fn test_idempotent_transition_stores_audit_event_only() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let entry = create_test_entry("ledger-1", "1234ABC");
    persistence.insert_ledger_entry(&entry).unwrap();

    // Re-asserting the stored status does not bump the revision, so the
    // write is skipped entirely.
    let transition = LedgerTransition {
        entry: entry.clone(),
        audit_event: create_test_audit_event("AcceptAssignment", None, None),
        already_applied: true,
    };

    let event_id = persistence.persist_ledger_transition(&transition).unwrap();
    assert!(event_id > 0);

    let stored = persistence.get_ledger_entry("ledger-1").unwrap().unwrap();
    assert_eq!(stored.status, LedgerStatus::Pending);
    assert_eq!(stored.revision, 0);
}
