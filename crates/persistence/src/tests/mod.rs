// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod audit_tests;
mod ledger_store_tests;
mod roster_store_tests;

use crewdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use crewdesk_domain::{
    AssignmentLedgerEntry, LineRole, PlateNumber, RosterDocument, RosterLine,
};

pub fn create_test_actor() -> Actor {
    Actor::new(
        String::from("op-1"),
        String::from("operator"),
        Some(String::from("Maria Soler")),
    )
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test operation"))
}

/// Builds a scoped audit event with placeholder snapshots.
pub fn create_test_audit_event(
    action_name: &str,
    department: Option<&str>,
    event_ref: Option<&str>,
) -> AuditEvent {
    AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(String::from(action_name), None),
        StateSnapshot::empty(),
        StateSnapshot::new(String::from("{\"status\":\"draft\"}")),
        department.map(String::from),
        event_ref.map(String::from),
    )
}

/// Builds a draft roster document with one driver and one worker line.
pub fn create_test_document(department: &str, event_id: &str) -> RosterDocument {
    let mut driver: RosterLine = RosterLine::new("row-1", LineRole::Driver);
    driver.person_name = Some(String::from("Jordi Prats"));
    driver.plate_number = Some(String::from("1234ABC"));
    driver.start_date = Some(String::from("2026-05-10"));
    driver.start_time = Some(String::from("08:00"));
    driver.end_date = Some(String::from("2026-05-10"));
    driver.end_time = Some(String::from("14:00"));

    let mut worker: RosterLine = RosterLine::new("row-2", LineRole::Worker);
    worker.person_name = Some(String::from("Anna Camps"));

    let mut document: RosterDocument = RosterDocument::new(department, event_id);
    document.drivers.push(driver);
    document.workers.push(worker);
    document.created_at = Some(String::from("2026-05-01T09:00:00Z"));
    document.updated_at = Some(String::from("2026-05-01T09:00:00Z"));
    document.refresh_aggregates();
    document
}

/// Builds a pending ledger entry for the given plate.
pub fn create_test_entry(entry_id: &str, plate: &str) -> AssignmentLedgerEntry {
    AssignmentLedgerEntry::new(
        entry_id,
        PlateNumber::new(plate).unwrap(),
        "2026-05-10",
        "08:00",
        "2026-05-10",
        "12:00",
        "2026-05-01T09:00:00Z",
    )
}
