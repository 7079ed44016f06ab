// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for booking acceptance and the conflict re-check.

use crate::{Command, CoreError, apply_ledger};

use crewdesk_domain::{
    DomainError, LedgerStatus, OccupancyRecord, OccupancySource, PlateNumber, TimeInterval,
};

use super::helpers::{create_test_actor, create_test_cause, pending_entry};

/// A roster-sourced occupancy record for 2026-05-10 on plate 1234ABC.
fn roster_occupancy(start_time: &str, end_time: &str) -> OccupancyRecord {
    OccupancyRecord {
        source: OccupancySource::Roster,
        reference: String::from("row-1"),
        department: Some(String::from("logistica")),
        event_ref: Some(String::from("E1")),
        plate: PlateNumber::new("1234ABC").unwrap(),
        interval: TimeInterval::from_wall_clock(
            "2026-05-10",
            start_time,
            Some("2026-05-10"),
            Some(end_time),
        )
        .unwrap(),
        status: String::from("draft"),
    }
}

fn accept(target_status: LedgerStatus) -> Command {
    Command::AcceptAssignment { target_status }
}

// ============================================================================
// Status Transition Tests
// ============================================================================

#[test]
fn test_accept_pending_to_confirmed() {
    let entry = pending_entry("a1", "1234ABC");

    let result = apply_ledger(
        &entry,
        accept(LedgerStatus::Confirmed),
        &[],
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    );

    assert!(result.is_ok());
    let transition = result.unwrap();
    assert_eq!(transition.entry.status, LedgerStatus::Confirmed);
    assert_eq!(
        transition.entry.confirmed_at.as_deref(),
        Some("2026-05-02T10:00:00Z")
    );
    assert_eq!(transition.entry.updated_by.as_deref(), Some("admin-123"));
    assert_eq!(transition.entry.revision, 1);
    assert!(!transition.already_applied);
    assert_eq!(transition.audit_event.action.name, "AcceptAssignment");
}

#[test]
fn test_accept_same_status_short_circuits() {
    let entry = pending_entry("a1", "1234ABC");

    let transition = apply_ledger(
        &entry,
        accept(LedgerStatus::Pending),
        &[],
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    )
    .unwrap();

    assert!(transition.already_applied);
    assert_eq!(transition.entry, entry);
    assert_eq!(transition.entry.revision, 0);
}

#[test]
fn test_accept_rejects_terminal_entry() {
    let mut entry = pending_entry("a1", "1234ABC");
    entry.status = LedgerStatus::Cancelled;

    let result = apply_ledger(
        &entry,
        accept(LedgerStatus::Confirmed),
        &[],
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition { .. })
    ));
}

#[test]
fn test_accept_confirmed_to_added_to_torns() {
    let mut entry = pending_entry("a1", "1234ABC");
    entry.status = LedgerStatus::Confirmed;
    entry.revision = 3;

    let transition = apply_ledger(
        &entry,
        accept(LedgerStatus::AddedToTorns),
        &[],
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    )
    .unwrap();

    assert_eq!(transition.entry.status, LedgerStatus::AddedToTorns);
    assert_eq!(transition.entry.revision, 4);
}

// ============================================================================
// Conflict Re-Check Tests
// ============================================================================

#[test]
fn test_accept_blocks_on_overlap() {
    // The entry wants 08:00-12:00; a roster row holds 11:00-13:00.
    let entry = pending_entry("a1", "1234ABC");
    let occupancy = vec![roster_occupancy("11:00", "13:00")];

    let result = apply_ledger(
        &entry,
        accept(LedgerStatus::Confirmed),
        &occupancy,
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    );

    assert!(result.is_err());
    match result.unwrap_err() {
        CoreError::BookingConflict(record) => {
            assert_eq!(record.source, OccupancySource::Roster);
            assert_eq!(record.reference, "row-1");
            assert_eq!(record.department.as_deref(), Some("logistica"));
        }
        other => panic!("expected booking conflict, got {other:?}"),
    }
}

#[test]
fn test_accept_allows_touching_intervals() {
    // The entry ends at 12:00 exactly when the roster row begins.
    let entry = pending_entry("a1", "1234ABC");
    let occupancy = vec![roster_occupancy("12:00", "14:00")];

    let result = apply_ledger(
        &entry,
        accept(LedgerStatus::Confirmed),
        &occupancy,
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    );

    assert!(result.is_ok());
    assert_eq!(result.unwrap().entry.status, LedgerStatus::Confirmed);
}

#[test]
fn test_cancel_skips_conflict_check() {
    let entry = pending_entry("a1", "1234ABC");
    let occupancy = vec![roster_occupancy("08:00", "12:00")];

    let transition = apply_ledger(
        &entry,
        accept(LedgerStatus::Cancelled),
        &occupancy,
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    )
    .unwrap();

    assert_eq!(transition.entry.status, LedgerStatus::Cancelled);
    assert_eq!(transition.entry.confirmed_at, None);
}

#[test]
fn test_cancel_clears_confirmed_at() {
    let mut entry = pending_entry("a1", "1234ABC");
    entry.status = LedgerStatus::Confirmed;
    entry.confirmed_at = Some(String::from("2026-05-02T10:00:00Z"));

    let transition = apply_ledger(
        &entry,
        accept(LedgerStatus::Cancelled),
        &[],
        create_test_actor(),
        create_test_cause(),
        "2026-05-03T10:00:00Z",
    )
    .unwrap();

    assert_eq!(transition.entry.confirmed_at, None);
    assert_eq!(
        transition.entry.updated_at.as_str(),
        "2026-05-03T10:00:00Z"
    );
}

// ============================================================================
// Stored Date Validation Tests
// ============================================================================

#[test]
fn test_accept_rejects_unparseable_dates() {
    let mut entry = pending_entry("a1", "1234ABC");
    entry.start_date = String::from("10/05/2026");

    let result = apply_ledger(
        &entry,
        accept(LedgerStatus::Confirmed),
        &[],
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DateParseError { .. })
    ));
}

#[test]
fn test_accept_requires_stored_dates() {
    let mut entry = pending_entry("a1", "1234ABC");
    entry.start_date = String::new();

    let result = apply_ledger(
        &entry,
        accept(LedgerStatus::Confirmed),
        &[],
        create_test_actor(),
        create_test_cause(),
        "2026-05-02T10:00:00Z",
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::MissingIntervalFields { .. })
    ));
}
