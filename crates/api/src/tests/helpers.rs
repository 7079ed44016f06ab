// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crewdesk_audit::Cause;
use crewdesk_domain::{LineRole, RosterLine};
use crewdesk_persistence::SqlitePersistence;

use crate::auth::{AuthenticatedActor, Role};
use crate::request_response::{CreateAssignmentRequest, UpsertRosterRequest};

pub fn setup_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new("admin-1", "Test Admin", Role::Admin, None)
}

pub fn create_test_direction() -> AuthenticatedActor {
    AuthenticatedActor::new("dir-1", "Test Direction", Role::Direction, None)
}

pub fn create_test_head(department: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(
        "head-1",
        "Test Head",
        Role::DepartmentHead,
        Some(department.to_string()),
    )
}

pub fn create_test_worker(department: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(
        "worker-1",
        "Test Worker",
        Role::Worker,
        Some(department.to_string()),
    )
}

pub fn create_test_commercial() -> AuthenticatedActor {
    AuthenticatedActor::new("comm-1", "Test Commercial", Role::Commercial, None)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("API request"))
}

pub fn responsible_line(id: &str, name: &str) -> RosterLine {
    let mut line = RosterLine::new(id, LineRole::Responsible);
    line.person_name = Some(name.to_string());
    line
}

pub fn worker_line(id: &str, name: &str) -> RosterLine {
    let mut line = RosterLine::new(id, LineRole::Worker);
    line.person_name = Some(name.to_string());
    line.start_date = Some(String::from("2026-06-01"));
    line.start_time = Some(String::from("08:00"));
    line.end_time = Some(String::from("16:00"));
    line
}

/// A driver line occupying the given plate on 2026-06-01.
pub fn driver_line(id: &str, plate: &str, start_time: &str, end_time: &str) -> RosterLine {
    let mut line = RosterLine::new(id, LineRole::Driver);
    line.person_name = Some(String::from("Pol Ferrer"));
    line.plate_number = Some(plate.to_string());
    line.start_date = Some(String::from("2026-06-01"));
    line.start_time = Some(start_time.to_string());
    line.end_time = Some(end_time.to_string());
    line
}

pub fn upsert_request(
    department: &str,
    event_id: &str,
    lines: Vec<RosterLine>,
) -> UpsertRosterRequest {
    UpsertRosterRequest {
        department: department.to_string(),
        event_id: event_id.to_string(),
        lines,
        event_code: Some(String::from("E-100")),
        event_name: Some(String::from("Summer Gala")),
        destination_address: None,
    }
}

/// A booking request for the given plate on 2026-06-01.
pub fn assignment_request(plate: &str, start_time: &str, end_time: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        plate_number: plate.to_string(),
        vehicle_type: Some(String::from("van")),
        driver_name: None,
        department: None,
        start_date: String::from("2026-06-01"),
        start_time: start_time.to_string(),
        end_date: String::from("2026-06-01"),
        end_time: end_time.to_string(),
        event_code: None,
        notes: None,
    }
}
