// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewdesk_audit::{Actor, Cause};
use crewdesk_domain::{
    AssignmentLedgerEntry, Department, LineRole, PlateNumber, RosterDocument, RosterLine,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"), None)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn create_test_department() -> Department {
    Department::new("Logística").unwrap()
}

pub fn driver_line(
    id: &str,
    plate: &str,
    start_date: &str,
    start_time: &str,
    end_date: &str,
    end_time: &str,
) -> RosterLine {
    let mut line = RosterLine::new(id, LineRole::Driver);
    line.person_name = Some(format!("Driver {id}"));
    line.vehicle_type = Some(String::from("furgoneta"));
    line.plate_number = Some(String::from(plate));
    line.start_date = Some(String::from(start_date));
    line.start_time = Some(String::from(start_time));
    line.end_date = Some(String::from(end_date));
    line.end_time = Some(String::from(end_time));
    line
}

pub fn worker_line(id: &str, name: &str) -> RosterLine {
    let mut line = RosterLine::new(id, LineRole::Worker);
    line.person_name = Some(String::from(name));
    line
}

pub fn document_with_driver(line: RosterLine) -> RosterDocument {
    let mut document = RosterDocument::new("logistica", "E1");
    document.drivers.push(line);
    document.refresh_aggregates();
    document
}

pub fn pending_entry(entry_id: &str, plate: &str) -> AssignmentLedgerEntry {
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
