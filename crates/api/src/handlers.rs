// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers authorize the actor, resolve stored state, run the pure
//! transition, and persist the result together with its audit event.
//! They never leak domain or persistence errors directly; everything
//! crosses the boundary as [`ApiError`].

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{SecondsFormat, Utc};
use crewdesk::{
    CloseOutUpdate, Command, apply_ledger, apply_roster, build_occupancy, check_vehicle_available,
    validate_event_id,
};
use crewdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use crewdesk_domain::{
    AssignmentLedgerEntry, Department, LedgerStatus, LineRole, PlateNumber, RosterDocument,
    RosterLine, folded_eq,
};
use crewdesk_persistence::{OperatorData, SqlitePersistence, StoredAuditEvent};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
use crate::distance::DistanceProvider;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AcceptAssignmentRequest, AcceptAssignmentResponse, AuditEventInfo, AuditTimelineRequest,
    AuditTimelineResponse, CloseRosterRequest, CloseRosterResponse, ConfirmRosterRequest,
    ConfirmRosterResponse, CreateAssignmentRequest, CreateAssignmentResponse, CreateEventRequest,
    CreateEventResponse, CreateOperatorRequest, CreateOperatorResponse, ListAssignmentsRequest,
    ListAssignmentsResponse, ListOperatorsResponse, ListRostersRequest, ListRostersResponse,
    LoginRequest, LoginResponse, LogoutResponse, OccupancyRecordInfo, OccupancyResponse,
    OperatorInfo, RosterSummary, SaveVehicleRowRequest, SaveVehicleRowResponse,
    UnconfirmRosterRequest, UnconfirmRosterResponse, UpsertRosterRequest, UpsertRosterResponse,
    WhoAmIResponse,
};

// ============================================================================
// Roster lifecycle
// ============================================================================

/// Replaces a department's roster lines for an event.
///
/// Creates the roster on first write. The write is idempotent: saving
/// the same lines twice leaves the same stored document, with only the
/// `updated_at` stamp and the audit trail recording the second call.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The upsert request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not write this department's roster
/// - The department or event identifier is invalid
/// - A line's role or headcount is invalid
/// - Persistence fails
pub fn upsert_roster(
    persistence: &mut SqlitePersistence,
    request: UpsertRosterRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<UpsertRosterResponse, ApiError> {
    let department: Department =
        Department::new(&request.department).map_err(translate_domain_error)?;
    AuthorizationService::authorize_roster_write(actor, &department, "upsert roster")?;

    let existing: Option<RosterDocument> = persistence
        .get_roster_document(department.key(), &request.event_id)
        .map_err(translate_persistence_error)?;

    let command = Command::UpsertRoster {
        lines: request.lines,
        event_code: request.event_code,
        event_name: request.event_name,
        destination_address: request.destination_address,
    };
    let now: String = now_stamp();
    let transition = apply_roster(
        existing.as_ref(),
        &department,
        &request.event_id,
        command,
        actor.to_audit_actor(),
        cause,
        &now,
    )
    .map_err(translate_core_error)?;

    let audit_event_id: i64 = persistence
        .persist_roster_transition(&transition)
        .map_err(translate_persistence_error)?;

    let document: RosterDocument = transition.document;
    Ok(UpsertRosterResponse {
        department: document.department.clone(),
        event_id: document.event_id.clone(),
        status: document.status.as_str().to_string(),
        responsible_count: document.responsible_count,
        driver_count: document.driver_count,
        worker_count: document.worker_count,
        temp_crew_headcount: document.temp_crew_headcount,
        audit_event_id,
        message: format!(
            "Roster saved for department '{}', event '{}'",
            document.department, document.event_id
        ),
    })
}

/// Confirms a department's roster for an event.
///
/// Confirming an already-confirmed roster succeeds without touching the
/// confirmation stamps; the response flags it. The event's business
/// code is copied onto the document when the event record is known; a
/// failed lookup never blocks the confirmation.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The confirm request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if the actor may not write this department's
/// roster, the identifiers are invalid, or persistence fails.
pub fn confirm_roster(
    persistence: &mut SqlitePersistence,
    request: &ConfirmRosterRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ConfirmRosterResponse, ApiError> {
    let department: Department =
        Department::new(&request.department).map_err(translate_domain_error)?;
    AuthorizationService::authorize_roster_write(actor, &department, "confirm roster")?;

    let existing: Option<RosterDocument> = persistence
        .get_roster_document(department.key(), &request.event_id)
        .map_err(translate_persistence_error)?;

    // Best-effort code enrichment from the event record.
    let event_code: Option<String> = match persistence.get_event(&request.event_id) {
        Ok(record) => record.map(|r| r.code),
        Err(err) => {
            tracing::warn!("Event lookup failed for '{}': {err}", request.event_id);
            None
        }
    };

    let now: String = now_stamp();
    let transition = apply_roster(
        existing.as_ref(),
        &department,
        &request.event_id,
        Command::ConfirmRoster { event_code },
        actor.to_audit_actor(),
        cause,
        &now,
    )
    .map_err(translate_core_error)?;

    let audit_event_id: i64 = persistence
        .persist_roster_transition(&transition)
        .map_err(translate_persistence_error)?;

    let message: String = if transition.already_confirmed {
        format!(
            "Roster for department '{}', event '{}' was already confirmed",
            department.key(),
            request.event_id
        )
    } else {
        format!(
            "Roster confirmed for department '{}', event '{}'",
            department.key(),
            request.event_id
        )
    };
    let document: RosterDocument = transition.document;
    Ok(ConfirmRosterResponse {
        department: document.department.clone(),
        event_id: document.event_id.clone(),
        status: document.status.as_str().to_string(),
        already_confirmed: transition.already_confirmed,
        confirmed_at: document.confirmed_at.clone(),
        audit_event_id,
        message,
    })
}

/// Reverts a confirmed roster to draft, clearing the confirmation stamps.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The unconfirm request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if the actor may not unconfirm this department's
/// roster, the identifiers are invalid, or persistence fails.
pub fn unconfirm_roster(
    persistence: &mut SqlitePersistence,
    request: &UnconfirmRosterRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<UnconfirmRosterResponse, ApiError> {
    let department: Department =
        Department::new(&request.department).map_err(translate_domain_error)?;
    AuthorizationService::authorize_unconfirm(actor, &department)?;

    let existing: Option<RosterDocument> = persistence
        .get_roster_document(department.key(), &request.event_id)
        .map_err(translate_persistence_error)?;

    let now: String = now_stamp();
    let transition = apply_roster(
        existing.as_ref(),
        &department,
        &request.event_id,
        Command::UnconfirmRoster,
        actor.to_audit_actor(),
        cause,
        &now,
    )
    .map_err(translate_core_error)?;

    let audit_event_id: i64 = persistence
        .persist_roster_transition(&transition)
        .map_err(translate_persistence_error)?;

    let document: RosterDocument = transition.document;
    Ok(UnconfirmRosterResponse {
        department: document.department.clone(),
        event_id: document.event_id.clone(),
        status: document.status.as_str().to_string(),
        audit_event_id,
        message: format!(
            "Roster reverted to draft for department '{}', event '{}'",
            document.department, document.event_id
        ),
    })
}

/// Applies end-of-day corrections to a department's roster.
///
/// Corrections are matched to lines by person name, compared case- and
/// diacritic-insensitively. Names that match nothing are reported back
/// rather than failing the whole call. The roster lifecycle status is
/// never changed by a close-out.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The close-out request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not close this department's roster
/// - The department or event identifier is invalid
/// - The roster does not exist
/// - Persistence fails
pub fn close_roster(
    persistence: &mut SqlitePersistence,
    request: &CloseRosterRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CloseRosterResponse, ApiError> {
    let department: Department =
        Department::new(&request.department).map_err(translate_domain_error)?;
    AuthorizationService::authorize_close(actor, &department)?;

    let Some(current) = persistence
        .get_roster_document(department.key(), &request.event_id)
        .map_err(translate_persistence_error)?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Roster"),
            message: format!(
                "No roster for department '{}', event '{}'",
                department.key(),
                request.event_id
            ),
        });
    };

    let unmatched: Vec<String> = request
        .updates
        .iter()
        .filter(|update| !close_out_name_matches(&current, &update.person_name))
        .map(|update| update.person_name.clone())
        .collect();

    let updates: Vec<CloseOutUpdate> = request
        .updates
        .iter()
        .map(|update| CloseOutUpdate {
            person_name: update.person_name.clone(),
            actual_end_time: update.actual_end_time.clone(),
            no_show: Some(update.no_show),
            left_early: Some(update.left_early),
            notes: update.notes.clone(),
        })
        .collect();

    let now: String = now_stamp();
    let transition = apply_roster(
        Some(&current),
        &department,
        &request.event_id,
        Command::CloseRosterForDepartment {
            updates,
            close_department: request.close_department,
        },
        actor.to_audit_actor(),
        cause,
        &now,
    )
    .map_err(translate_core_error)?;

    let audit_event_id: i64 = persistence
        .persist_roster_transition(&transition)
        .map_err(translate_persistence_error)?;

    let document: RosterDocument = transition.document;
    let updated: u32 =
        u32::try_from(request.updates.len() - unmatched.len()).unwrap_or(u32::MAX);
    let closed: bool = document.is_closed_for(department.key());
    Ok(CloseRosterResponse {
        department: document.department.clone(),
        event_id: document.event_id.clone(),
        updated,
        unmatched,
        closed,
        audit_event_id,
        message: format!(
            "Close-out recorded for department '{}', event '{}'",
            document.department, document.event_id
        ),
    })
}

/// Saves one driver/vehicle row into a roster addressed by event code.
///
/// The row to update is located by id first, then by plate (current or
/// the one being replaced), then by grid position; when nothing matches
/// the row is appended with a generated id.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The vehicle row request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not write this department's roster
/// - No roster exists for the department and event code
/// - The plate is empty after normalization
/// - Persistence fails
pub fn save_vehicle_row(
    persistence: &mut SqlitePersistence,
    request: SaveVehicleRowRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SaveVehicleRowResponse, ApiError> {
    let department: Department =
        Department::new(&request.department).map_err(translate_domain_error)?;
    AuthorizationService::authorize_roster_write(actor, &department, "save vehicle row")?;

    let Some(current) = persistence
        .find_roster_by_event_code(department.key(), &request.event_code)
        .map_err(translate_persistence_error)?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Roster"),
            message: format!(
                "No roster for department '{}' with event code '{}'",
                department.key(),
                request.event_code
            ),
        });
    };

    let plate: PlateNumber =
        PlateNumber::new(&request.plate_number).map_err(translate_domain_error)?;

    let mut line = RosterLine::new(
        request.row_id.clone().unwrap_or_default(),
        LineRole::Driver,
    );
    line.person_id = request.person_id;
    line.person_name = request.person_name;
    line.meeting_point = request.meeting_point;
    line.start_date = request.start_date;
    line.start_time = request.start_time;
    line.end_date = request.end_date;
    line.end_time = request.end_time;
    line.vehicle_type = request.vehicle_type;
    line.plate_number = Some(request.plate_number);
    line.arrival_time = request.arrival_time;

    let event_id: String = current.event_id.clone();
    let now: String = now_stamp();
    let transition = apply_roster(
        Some(&current),
        &department,
        &event_id,
        Command::SaveVehicleRow {
            row_id: request.row_id,
            previous_plate: request.previous_plate,
            row_index: request.row_index,
            generated_row_id: generate_row_id(),
            line,
        },
        actor.to_audit_actor(),
        cause,
        &now,
    )
    .map_err(translate_core_error)?;

    let audit_event_id: i64 = persistence
        .persist_roster_transition(&transition)
        .map_err(translate_persistence_error)?;

    let document: RosterDocument = transition.document;
    let row_id: String = document
        .drivers
        .iter()
        .find(|row| row.matches_plate(&plate))
        .map(|row| row.id.clone())
        .unwrap_or_default();
    Ok(SaveVehicleRowResponse {
        department: document.department.clone(),
        event_id: document.event_id.clone(),
        row_id,
        plate_number: plate.value().to_string(),
        audit_event_id,
        message: format!(
            "Vehicle row saved for plate {} in department '{}'",
            plate.value(),
            document.department
        ),
    })
}

/// Retrieves the full roster document for a department and event.
///
/// # Errors
///
/// Returns an error if the department is invalid, the roster does not
/// exist, or persistence fails.
pub fn get_roster(
    persistence: &mut SqlitePersistence,
    department: &str,
    event_id: &str,
) -> Result<RosterDocument, ApiError> {
    let department: Department = Department::new(department).map_err(translate_domain_error)?;
    persistence
        .get_roster_document(department.key(), event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Roster"),
            message: format!(
                "No roster for department '{}', event '{event_id}'",
                department.key()
            ),
        })
}

/// Lists stored rosters, optionally restricted to one department.
///
/// # Errors
///
/// Returns an error if the department filter is invalid or persistence
/// fails.
pub fn list_rosters(
    persistence: &mut SqlitePersistence,
    request: &ListRostersRequest,
) -> Result<ListRostersResponse, ApiError> {
    let department_key: Option<String> = match request.department.as_deref() {
        Some(raw) => Some(
            Department::new(raw)
                .map_err(translate_domain_error)?
                .key()
                .to_string(),
        ),
        None => None,
    };
    let documents: Vec<RosterDocument> = persistence
        .list_roster_documents(department_key.as_deref())
        .map_err(translate_persistence_error)?;
    Ok(ListRostersResponse {
        rosters: documents.iter().map(summarize_roster).collect(),
    })
}

// ============================================================================
// Occupancy
// ============================================================================

/// Computes the committed intervals of one vehicle, across both
/// booking sources, ordered by start.
///
/// # Errors
///
/// Returns an error if the plate is empty after normalization or
/// persistence fails.
pub fn get_occupancy(
    persistence: &mut SqlitePersistence,
    plate: &str,
) -> Result<OccupancyResponse, ApiError> {
    let plate: PlateNumber = PlateNumber::new(plate).map_err(translate_domain_error)?;
    let documents: Vec<RosterDocument> = persistence
        .list_roster_documents(None)
        .map_err(translate_persistence_error)?;
    let entries: Vec<AssignmentLedgerEntry> = persistence
        .list_all_ledger_entries()
        .map_err(translate_persistence_error)?;

    let mut records = build_occupancy(&plate, &documents, &entries, None);
    records.sort_by_key(|record| record.interval.start());

    let records: Vec<OccupancyRecordInfo> = records
        .iter()
        .map(|record| OccupancyRecordInfo {
            source: record.source.as_str().to_string(),
            reference: record.reference.clone(),
            department: record.department.clone(),
            event_ref: record.event_ref.clone(),
            interval_start: record.interval.start_string(),
            interval_end: record.interval.end_string(),
            status: record.status.clone(),
        })
        .collect();

    Ok(OccupancyResponse {
        plate: plate.value().to_string(),
        records,
    })
}

// ============================================================================
// Assignment ledger
// ============================================================================

/// Books a vehicle through the assignment ledger.
///
/// The requested interval must have real duration, and it is checked
/// against current occupancy before anything is written: an overlap
/// rejects the booking with the colliding record as evidence. New
/// entries start in `pending`.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The booking request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not write bookings
/// - The plate is empty or the interval is invalid or zero-length
/// - The vehicle is already committed during the interval
/// - Persistence fails
pub fn create_assignment(
    persistence: &mut SqlitePersistence,
    request: CreateAssignmentRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateAssignmentResponse, ApiError> {
    AuthorizationService::authorize_ledger_write(actor, "create assignment")?;

    let plate: PlateNumber =
        PlateNumber::new(&request.plate_number).map_err(translate_domain_error)?;

    let now: String = now_stamp();
    let mut entry = AssignmentLedgerEntry::new(
        generate_entry_id(),
        plate.clone(),
        request.start_date,
        request.start_time,
        request.end_date,
        request.end_time,
        now,
    );
    entry.vehicle_type = request.vehicle_type;
    entry.driver_name = request.driver_name;
    entry.department = request.department;
    entry.notes = request.notes;
    entry.event_code = request.event_code;
    entry.requested_by = Some(actor.id.clone());
    entry.updated_by = Some(actor.id.clone());

    let requested = entry.validated_interval().map_err(translate_domain_error)?;

    let documents: Vec<RosterDocument> = persistence
        .list_roster_documents(None)
        .map_err(translate_persistence_error)?;
    let entries: Vec<AssignmentLedgerEntry> = persistence
        .list_all_ledger_entries()
        .map_err(translate_persistence_error)?;
    check_vehicle_available(&plate, &requested, &documents, &entries, None)
        .map_err(translate_core_error)?;

    persistence
        .insert_ledger_entry(&entry)
        .map_err(translate_persistence_error)?;

    let action = Action::new(
        String::from("CreateAssignment"),
        Some(format!(
            "Booked {} from {} to {}",
            plate.value(),
            requested.start_string(),
            requested.end_string()
        )),
    );
    let audit_event = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        action,
        StateSnapshot::empty(),
        entry_snapshot(&entry),
        None,
        entry.event_code.clone(),
    );
    let audit_event_id: i64 = persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok(CreateAssignmentResponse {
        entry_id: entry.entry_id.clone(),
        plate_number: plate.value().to_string(),
        status: entry.status.as_str().to_string(),
        start_date: entry.start_date.clone(),
        start_time: entry.start_time.clone(),
        end_date: entry.end_date.clone(),
        end_time: entry.end_time.clone(),
        audit_event_id,
        message: format!("Vehicle {} booked", plate.value()),
    })
}

/// Moves a ledger entry to a new lifecycle status.
///
/// Re-asserting the current status is an idempotent no-op. Moving into
/// an occupying status re-checks the interval against current
/// occupancy, excluding the entry itself; cancellation skips the check.
/// The stored write is revision-guarded, so a concurrent change to the
/// same entry surfaces as a conflict instead of a lost update.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The status change request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not write bookings
/// - The target status is invalid or the transition is not allowed
/// - The entry does not exist
/// - The vehicle is committed elsewhere during the interval
/// - Another operator changed the entry concurrently
/// - Persistence fails
pub fn accept_assignment(
    persistence: &mut SqlitePersistence,
    request: &AcceptAssignmentRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<AcceptAssignmentResponse, ApiError> {
    AuthorizationService::authorize_ledger_write(actor, "accept assignment")?;

    let target_status: LedgerStatus = request
        .target_status
        .parse()
        .map_err(translate_domain_error)?;

    let Some(entry) = persistence
        .get_ledger_entry(&request.entry_id)
        .map_err(translate_persistence_error)?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("No ledger entry '{}'", request.entry_id),
        });
    };

    let documents: Vec<RosterDocument> = persistence
        .list_roster_documents(None)
        .map_err(translate_persistence_error)?;
    let entries: Vec<AssignmentLedgerEntry> = persistence
        .list_all_ledger_entries()
        .map_err(translate_persistence_error)?;
    let occupancy = build_occupancy(
        &entry.plate_number,
        &documents,
        &entries,
        Some(&entry.entry_id),
    );

    let now: String = now_stamp();
    let transition = apply_ledger(
        &entry,
        Command::AcceptAssignment { target_status },
        &occupancy,
        actor.to_audit_actor(),
        cause,
        &now,
    )
    .map_err(translate_core_error)?;

    let audit_event_id: i64 = persistence
        .persist_ledger_transition(&transition)
        .map_err(translate_persistence_error)?;

    let message: String = if transition.already_applied {
        format!(
            "Booking '{}' was already in status '{}'",
            transition.entry.entry_id,
            transition.entry.status.as_str()
        )
    } else {
        format!(
            "Booking '{}' set to '{}'",
            transition.entry.entry_id,
            transition.entry.status.as_str()
        )
    };
    let entry: AssignmentLedgerEntry = transition.entry;
    Ok(AcceptAssignmentResponse {
        entry_id: entry.entry_id.clone(),
        status: entry.status.as_str().to_string(),
        already_applied: transition.already_applied,
        confirmed_at: entry.confirmed_at.clone(),
        revision: entry.revision,
        audit_event_id,
        message,
    })
}

/// Lists assignment ledger entries with optional filters.
///
/// The filtered query runs in the database; if it fails (for example
/// on a backend missing the composite index), the handler falls back
/// to a full scan filtered in memory, with identical semantics.
///
/// # Errors
///
/// Returns an error if the plate filter is invalid or the fallback
/// scan fails.
pub fn list_assignments(
    persistence: &mut SqlitePersistence,
    request: &ListAssignmentsRequest,
) -> Result<ListAssignmentsResponse, ApiError> {
    let plate: Option<PlateNumber> = match request.plate.as_deref() {
        Some(raw) => Some(PlateNumber::new(raw).map_err(translate_domain_error)?),
        None => None,
    };
    let plate_value: Option<&str> = plate.as_ref().map(PlateNumber::value);

    match persistence.list_ledger_entries(
        plate_value,
        request.from.as_deref(),
        request.to.as_deref(),
        request.include_cancelled,
    ) {
        Ok(entries) => Ok(ListAssignmentsResponse { entries }),
        Err(err) => {
            tracing::warn!("Filtered ledger query failed, scanning all entries: {err}");
            let entries: Vec<AssignmentLedgerEntry> = persistence
                .list_all_ledger_entries()
                .map_err(translate_persistence_error)?;
            Ok(ListAssignmentsResponse {
                entries: filter_assignments(
                    entries,
                    plate.as_ref(),
                    request.from.as_deref(),
                    request.to.as_deref(),
                    request.include_cancelled,
                ),
            })
        }
    }
}

/// In-memory mirror of the filtered ledger query, used when the
/// database-side query is unavailable. Keeps the same filter and
/// ordering semantics: inclusive date bounds on the start date and
/// ascending (start date, start time) order.
#[must_use]
pub(crate) fn filter_assignments(
    mut entries: Vec<AssignmentLedgerEntry>,
    plate: Option<&PlateNumber>,
    from: Option<&str>,
    to: Option<&str>,
    include_cancelled: bool,
) -> Vec<AssignmentLedgerEntry> {
    entries.retain(|entry| {
        if plate.is_some_and(|p| !entry.matches_plate(p)) {
            return false;
        }
        if from.is_some_and(|f| entry.start_date.as_str() < f) {
            return false;
        }
        if to.is_some_and(|t| entry.start_date.as_str() > t) {
            return false;
        }
        if !include_cancelled && entry.status == LedgerStatus::Cancelled {
            return false;
        }
        true
    });
    entries.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
    entries
}

// ============================================================================
// Event records
// ============================================================================

/// Registers an event so rosters and bookings can reference it.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The event registration request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is neither admin nor direction
/// - The event id or code is empty
/// - An event with this id already exists
/// - Persistence fails
pub fn create_event(
    persistence: &mut SqlitePersistence,
    request: CreateEventRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateEventResponse, ApiError> {
    AuthorizationService::authorize_event_create(actor)?;
    validate_event_id(&request.event_id).map_err(translate_domain_error)?;
    if request.code.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("code"),
            message: String::from("Event code is empty"),
        });
    }

    if persistence
        .get_event(&request.event_id)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_event"),
            message: format!("Event '{}' already exists", request.event_id),
        });
    }

    persistence
        .create_event(
            &request.event_id,
            &request.code,
            &request.name,
            request.destination_address.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    let action = Action::new(
        String::from("CreateEvent"),
        Some(format!(
            "Registered event '{}' with code '{}'",
            request.event_id, request.code
        )),
    );
    let after = StateSnapshot::new(
        serde_json::json!({
            "eventId": request.event_id,
            "code": request.code,
            "name": request.name,
            "destinationAddress": request.destination_address,
        })
        .to_string(),
    );
    let audit_event = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        action,
        StateSnapshot::empty(),
        after,
        None,
        Some(request.event_id.clone()),
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok(CreateEventResponse {
        event_id: request.event_id,
        code: request.code,
        name: request.name,
        message: String::from("Event registered"),
    })
}

// ============================================================================
// Audit timeline
// ============================================================================

/// Reads the ordered audit timeline, optionally scoped to a department
/// or an event reference.
///
/// # Errors
///
/// Returns an error if the department filter is invalid or persistence
/// fails.
pub fn get_audit_timeline(
    persistence: &mut SqlitePersistence,
    request: &AuditTimelineRequest,
) -> Result<AuditTimelineResponse, ApiError> {
    let department_key: Option<String> = match request.department.as_deref() {
        Some(raw) => Some(
            Department::new(raw)
                .map_err(translate_domain_error)?
                .key()
                .to_string(),
        ),
        None => None,
    };
    let stored: Vec<StoredAuditEvent> = persistence
        .get_audit_timeline(department_key.as_deref(), request.event_ref.as_deref())
        .map_err(translate_persistence_error)?;
    Ok(AuditTimelineResponse {
        events: stored.iter().map(audit_event_info).collect(),
    })
}

// ============================================================================
// Sessions and operators
// ============================================================================

/// Authenticates an operator and creates a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The login request
///
/// # Errors
///
/// Returns an error if the credentials are wrong, the operator is
/// disabled, or the session cannot be stored.
pub fn login(
    persistence: &mut SqlitePersistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (operator, session) =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    Ok(LoginResponse {
        session_token: session.session_token,
        login_name: operator.login_name,
        display_name: operator.display_name,
        role: Role::parse(&operator.role).as_str().to_string(),
        department: operator.department,
        expires_at: session.expires_at,
    })
}

/// Logs out by deleting the session. Idempotent.
///
/// # Errors
///
/// Returns an error if the session store cannot be reached.
pub fn logout(
    persistence: &mut SqlitePersistence,
    session_token: &str,
) -> Result<LogoutResponse, ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(LogoutResponse {
        message: String::from("Logged out"),
    })
}

/// Returns the current session's operator.
#[must_use]
pub fn whoami(actor: &AuthenticatedActor, operator: &OperatorData) -> WhoAmIResponse {
    WhoAmIResponse {
        login_name: operator.login_name.clone(),
        display_name: operator.display_name.clone(),
        role: actor.role.as_str().to_string(),
        department: operator.department.clone(),
        is_disabled: operator.is_disabled,
    }
}

/// Creates a new operator account.
///
/// Only admins may create operators. The role must be in the closed
/// set, department-scoped roles require a department, and the stored
/// role is always the canonical spelling.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The create operator request
/// * `actor` - The authenticated actor performing this action
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The role is not recognized
/// - The password fails the password policy
/// - A department-scoped role has no department
/// - The login name already exists
/// - Persistence fails
pub fn create_operator(
    persistence: &mut SqlitePersistence,
    request: CreateOperatorRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateOperatorResponse, ApiError> {
    AuthorizationService::authorize_create_operator(actor)?;

    let role: Role = Role::parse(&request.role);
    if role == Role::Unknown {
        return Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: format!(
                "Invalid role: '{}'. Must be admin, direction, department-head, worker, or commercial",
                request.role
            ),
        });
    }

    PasswordPolicy::default()
        .validate(&request.password, &request.login_name)
        .map_err(|err| ApiError::InvalidInput {
            field: String::from("password"),
            message: err.to_string(),
        })?;

    let department: Option<&str> = request
        .department
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    if department.is_none() && matches!(role, Role::DepartmentHead | Role::Worker) {
        return Err(ApiError::InvalidInput {
            field: String::from("department"),
            message: format!("Role '{}' requires a department", role.as_str()),
        });
    }

    if persistence
        .get_operator_by_login(&request.login_name)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_login_name"),
            message: format!("Login name '{}' already exists", request.login_name),
        });
    }

    let operator_id: i64 = persistence
        .create_operator(
            &request.login_name,
            &request.display_name,
            &request.password,
            role.as_str(),
            department,
        )
        .map_err(translate_persistence_error)?;

    let action = Action::new(
        String::from("CreateOperator"),
        Some(format!(
            "Created operator '{}' ({}) with role {}",
            request.login_name,
            request.display_name,
            role.as_str()
        )),
    );
    let audit_event = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        action,
        StateSnapshot::empty(),
        StateSnapshot::empty(),
        None,
        None,
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok(CreateOperatorResponse {
        operator_id,
        login_name: request.login_name,
        role: role.as_str().to_string(),
        message: String::from("Operator created"),
    })
}

/// Lists operator accounts, without credential material.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or persistence fails.
pub fn list_operators(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
) -> Result<ListOperatorsResponse, ApiError> {
    if actor.role != Role::Admin {
        return Err(ApiError::Unauthorized {
            action: String::from("list operators"),
            required_role: String::from("admin"),
        });
    }

    let operators: Vec<OperatorData> = persistence
        .list_operators()
        .map_err(translate_persistence_error)?;
    Ok(ListOperatorsResponse {
        operators: operators
            .iter()
            .map(|operator| OperatorInfo {
                operator_id: operator.operator_id,
                login_name: operator.login_name.clone(),
                display_name: operator.display_name.clone(),
                role: operator.role.clone(),
                department: operator.department.clone(),
                is_disabled: operator.is_disabled,
                created_at: operator.created_at.clone(),
                last_login_at: operator.last_login_at.clone(),
            })
            .collect(),
    })
}

// ============================================================================
// Distance enrichment
// ============================================================================

/// Recomputes the stored round-trip distance for a roster's destination.
///
/// This runs after roster writes as a best-effort side effect: a
/// missing roster, a missing destination address, or an unknown route
/// skips the update and reports `false`. The distance is the one-way
/// route doubled, rounded to one decimal. The roster's `updated_at` is
/// deliberately left alone; enrichment is not an operator edit.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `provider` - The route distance source
/// * `department` - The department whose roster to enrich
/// * `event_id` - The event the roster staffs
///
/// # Errors
///
/// Returns an error if the department is invalid or persistence fails.
/// An unknown destination is not an error.
pub fn enrich_distance(
    persistence: &mut SqlitePersistence,
    provider: &dyn DistanceProvider,
    department: &str,
    event_id: &str,
) -> Result<bool, ApiError> {
    let department: Department = Department::new(department).map_err(translate_domain_error)?;
    let Some(mut document) = persistence
        .get_roster_document(department.key(), event_id)
        .map_err(translate_persistence_error)?
    else {
        return Ok(false);
    };

    let Some(destination) = document
        .destination_address
        .clone()
        .filter(|d| !d.trim().is_empty())
    else {
        tracing::debug!(
            "Roster {}:{event_id} has no destination address, skipping distance",
            department.key()
        );
        return Ok(false);
    };

    let Some(meters) = provider.one_way_meters(&destination) else {
        tracing::debug!("No route for destination '{destination}', skipping distance");
        return Ok(false);
    };

    let before = document_snapshot(&document);
    let km: f64 = round_trip_km(meters);
    document.distance_km = Some(km);
    document.distance_calc_at = Some(now_stamp());
    persistence
        .upsert_roster_document(&document)
        .map_err(translate_persistence_error)?;

    let action = Action::new(
        String::from("CalculateDistance"),
        Some(format!("Round trip to '{destination}': {km} km")),
    );
    let audit_event = AuditEvent::new(
        Actor::new(String::from("system"), String::from("system"), None),
        Cause::new(
            String::from("distance-enrichment"),
            String::from("Destination distance recalculated after roster save"),
        ),
        action,
        before,
        document_snapshot(&document),
        Some(department.key().to_string()),
        Some(event_id.to_string()),
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok(true)
}

/// Round-trip kilometres from a one-way distance in meters, rounded to
/// one decimal.
fn round_trip_km(one_way_meters: f64) -> f64 {
    let km: f64 = (one_way_meters / 1000.0) * 2.0;
    (km * 10.0).round() / 10.0
}

// ============================================================================
// Helpers
// ============================================================================

/// Current UTC time as the RFC 3339 stamp stored on documents.
fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Milliseconds since the Unix epoch, for generated identifiers.
fn current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

/// Generates a ledger entry id.
fn generate_entry_id() -> String {
    format!("entry_{}_{}", current_millis(), rand::random::<u64>())
}

/// Generates a roster row id for appended vehicle rows.
fn generate_row_id() -> String {
    format!("row_{}_{}", current_millis(), rand::random::<u64>())
}

/// Whether a close-out name matches any line in the buckets close-out
/// applies to. Temp-crew blocks have no person names and never match.
fn close_out_name_matches(document: &RosterDocument, person_name: &str) -> bool {
    if person_name.trim().is_empty() {
        return false;
    }
    document
        .responsibles
        .iter()
        .chain(document.drivers.iter())
        .chain(document.workers.iter())
        .any(|line| {
            line.person_name
                .as_deref()
                .is_some_and(|name| folded_eq(name, person_name))
        })
}

fn summarize_roster(document: &RosterDocument) -> RosterSummary {
    RosterSummary {
        department: document.department.clone(),
        event_id: document.event_id.clone(),
        event_code: document.event_code.clone(),
        event_name: document.event_name.clone(),
        status: document.status.as_str().to_string(),
        responsible_count: document.responsible_count,
        driver_count: document.driver_count,
        worker_count: document.worker_count,
        temp_crew_headcount: document.temp_crew_headcount,
        updated_at: document.updated_at.clone(),
    }
}

fn audit_event_info(stored: &StoredAuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        audit_event_id: stored.event_id,
        created_at: stored.created_at.clone(),
        actor_id: stored.event.actor.id.clone(),
        actor_type: stored.event.actor.actor_type.clone(),
        actor_display_name: stored.event.actor.display_name.clone(),
        action: stored.event.action.name.clone(),
        details: stored.event.action.details.clone(),
        cause: stored.event.cause.description.clone(),
        department: stored.event.department.clone(),
        event_ref: stored.event.event_ref.clone(),
    }
}

fn document_snapshot(document: &RosterDocument) -> StateSnapshot {
    StateSnapshot::new(serde_json::to_string(document).unwrap_or_else(|_| String::from("{}")))
}

fn entry_snapshot(entry: &AssignmentLedgerEntry) -> StateSnapshot {
    StateSnapshot::new(serde_json::to_string(entry).unwrap_or_else(|_| String::from("{}")))
}
