// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{CloseOutUpdate, Command};
use crate::error::CoreError;
use crate::occupancy::find_conflict;
use crate::transition::{LedgerTransition, RosterTransition};
use crewdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use crewdesk_domain::{
    AssignmentLedgerEntry, Department, DomainError, LedgerStatus, LineRole, OccupancyRecord,
    PlateNumber, RosterDocument, RosterLine, RosterStatus, TimeInterval, fold_key,
};

/// Applies a roster command to the current document, producing the new
/// document and its audit event.
///
/// `existing` is the stored document for `(department, event_id)`, or
/// `None` when nothing has been saved yet. Upsert, confirm and
/// unconfirm create the document when it is absent, matching the
/// merge-write behavior of the legacy store; close-out and vehicle-row
/// saves require it to exist.
///
/// # Arguments
///
/// * `existing` - The stored document, if any (immutable)
/// * `department` - Canonical department the operation is scoped to
/// * `event_id` - The event the roster staffs
/// * `command` - The roster command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The current time, RFC 3339
///
/// # Returns
///
/// * `Ok(RosterTransition)` containing the new document and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The event id is empty
/// - The command violates domain rules
/// - The command requires a document that does not exist
#[allow(clippy::too_many_lines)]
pub fn apply_roster(
    existing: Option<&RosterDocument>,
    department: &Department,
    event_id: &str,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: &str,
) -> Result<RosterTransition, CoreError> {
    crate::validate_event_id(event_id)?;

    match command {
        Command::UpsertRoster {
            lines,
            event_code,
            event_name,
            destination_address,
        } => {
            let mut document: RosterDocument = base_document(existing, department, event_id, now);

            let mut responsibles: Vec<RosterLine> = Vec::new();
            let mut drivers: Vec<RosterLine> = Vec::new();
            let mut workers: Vec<RosterLine> = Vec::new();
            let mut temp_crew: Vec<RosterLine> = Vec::new();
            for line in lines {
                match line.role {
                    LineRole::Responsible => responsibles.push(line),
                    LineRole::Driver => drivers.push(line),
                    LineRole::Worker => workers.push(line),
                    LineRole::TempCrew => {
                        if line.headcount == Some(0) {
                            return Err(DomainError::InvalidHeadcount { count: 0 }.into());
                        }
                        temp_crew.push(line);
                    }
                }
            }

            // Whole-array replace: the request carries the full line
            // set, so stale rows from earlier saves do not linger.
            document.responsibles = responsibles;
            document.drivers = drivers;
            document.workers = workers;
            document.temp_crew = temp_crew;

            if event_code.is_some() {
                document.event_code = event_code;
            }
            if event_name.is_some() {
                document.event_name = event_name;
            }
            if destination_address.is_some() {
                document.destination_address = destination_address;
            }
            document.updated_at = Some(now.to_string());
            document.refresh_aggregates();

            let line_total: usize = document.all_lines().count();
            let action: Action = Action::new(
                String::from("UpsertRoster"),
                Some(format!(
                    "Upserted roster for department '{}', event '{event_id}' ({line_total} lines)",
                    department.key()
                )),
            );
            let audit_event: AuditEvent = roster_audit(actor, cause, action, existing, &document);

            Ok(RosterTransition {
                document,
                audit_event,
                already_confirmed: false,
            })
        }
        Command::ConfirmRoster { event_code } => {
            if let Some(document) = existing.filter(|d| d.status == RosterStatus::Confirmed) {
                // Idempotent: report success without touching the
                // confirmation stamps.
                let action: Action = Action::new(
                    String::from("ConfirmRoster"),
                    Some(format!(
                        "Roster already confirmed for department '{}', event '{event_id}'",
                        department.key()
                    )),
                );
                let audit_event: AuditEvent =
                    roster_audit(actor, cause, action, existing, document);
                return Ok(RosterTransition {
                    document: document.clone(),
                    audit_event,
                    already_confirmed: true,
                });
            }

            let mut document: RosterDocument = base_document(existing, department, event_id, now);
            document.status.validate_transition(RosterStatus::Confirmed)?;
            document.status = RosterStatus::Confirmed;
            document.confirmed_at = Some(now.to_string());
            document.confirmed_by = Some(actor.id.clone());
            if event_code.is_some() {
                document.event_code = event_code;
            }
            document.updated_at = Some(now.to_string());

            let action: Action = Action::new(
                String::from("ConfirmRoster"),
                Some(format!(
                    "Confirmed roster for department '{}', event '{event_id}'",
                    department.key()
                )),
            );
            let audit_event: AuditEvent = roster_audit(actor, cause, action, existing, &document);

            Ok(RosterTransition {
                document,
                audit_event,
                already_confirmed: false,
            })
        }
        Command::UnconfirmRoster => {
            // Clearing is idempotent: unconfirming a draft roster is a
            // no-op that still refreshes updated_at.
            let mut document: RosterDocument = base_document(existing, department, event_id, now);
            document.status = RosterStatus::Draft;
            document.confirmed_at = None;
            document.confirmed_by = None;
            document.updated_at = Some(now.to_string());

            let action: Action = Action::new(
                String::from("UnconfirmRoster"),
                Some(format!(
                    "Reverted roster to draft for department '{}', event '{event_id}'",
                    department.key()
                )),
            );
            let audit_event: AuditEvent = roster_audit(actor, cause, action, existing, &document);

            Ok(RosterTransition {
                document,
                audit_event,
                already_confirmed: false,
            })
        }
        Command::CloseRosterForDepartment {
            updates,
            close_department,
        } => {
            let Some(existing_document) = existing else {
                return Err(CoreError::RosterNotFound {
                    department: department.key().to_string(),
                    event_id: event_id.to_string(),
                });
            };

            let mut document: RosterDocument = existing_document.clone();
            let mut matched: usize = 0;
            matched += apply_close_outs(&mut document.responsibles, &updates, &actor.id, now);
            matched += apply_close_outs(&mut document.drivers, &updates, &actor.id, now);
            matched += apply_close_outs(&mut document.workers, &updates, &actor.id, now);

            if close_department {
                document
                    .closed_by_dept
                    .insert(department.key().to_string(), now.to_string());
            }
            document.updated_at = Some(now.to_string());

            let details: String = if close_department {
                format!(
                    "Recorded {matched} close-out updates and closed department '{}' for event '{event_id}'",
                    department.key()
                )
            } else {
                format!(
                    "Recorded {matched} close-out updates for department '{}', event '{event_id}'",
                    department.key()
                )
            };
            let action: Action =
                Action::new(String::from("CloseRosterForDepartment"), Some(details));
            let audit_event: AuditEvent = roster_audit(actor, cause, action, existing, &document);

            Ok(RosterTransition {
                document,
                audit_event,
                already_confirmed: false,
            })
        }
        Command::SaveVehicleRow {
            row_id,
            previous_plate,
            row_index,
            generated_row_id,
            line,
        } => {
            let Some(existing_document) = existing else {
                return Err(CoreError::RosterNotFound {
                    department: department.key().to_string(),
                    event_id: event_id.to_string(),
                });
            };

            let plate: PlateNumber = match line.plate_number.as_deref() {
                Some(raw) => PlateNumber::new(raw)?,
                None => return Err(DomainError::EmptyPlate.into()),
            };
            // A previous plate that does not normalize simply never
            // matches; it is not the caller's primary input.
            let previous: Option<PlateNumber> = previous_plate
                .as_deref()
                .and_then(|raw| PlateNumber::new(raw).ok());

            let mut document: RosterDocument = existing_document.clone();
            let target: Option<usize> = find_vehicle_row(
                &document.drivers,
                row_id.as_deref(),
                &plate,
                previous.as_ref(),
                row_index,
            );
            match target {
                Some(index) => merge_vehicle_row(&mut document.drivers[index], line, &plate),
                None => {
                    document
                        .drivers
                        .push(new_vehicle_row(line, &plate, row_id, generated_row_id));
                }
            }
            document.updated_at = Some(now.to_string());
            document.refresh_aggregates();

            let action: Action = Action::new(
                String::from("SaveVehicleRow"),
                Some(format!(
                    "Saved vehicle row for plate {} in department '{}', event '{event_id}'",
                    plate.value(),
                    department.key()
                )),
            );
            let audit_event: AuditEvent = roster_audit(actor, cause, action, existing, &document);

            Ok(RosterTransition {
                document,
                audit_event,
                already_confirmed: false,
            })
        }
        Command::AcceptAssignment { .. } => {
            // Ledger commands should use apply_ledger() instead
            unreachable!("apply_roster called with ledger command")
        }
    }
}

/// Applies a ledger command to an assignment entry, producing the new
/// entry and its audit event.
///
/// The caller supplies the occupancy records for the entry's plate,
/// already excluding the entry itself, so the conflict re-check never
/// reports the entry against its own stored interval.
///
/// # Arguments
///
/// * `entry` - The stored ledger entry (immutable)
/// * `command` - The ledger command to apply
/// * `occupancy` - Current occupancy for the entry's plate, self excluded
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The current time, RFC 3339
///
/// # Returns
///
/// * `Ok(LedgerTransition)` containing the new entry and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The status transition is not permitted
/// - The entry's stored dates cannot be parsed
/// - The committed interval collides with existing occupancy
pub fn apply_ledger(
    entry: &AssignmentLedgerEntry,
    command: Command,
    occupancy: &[OccupancyRecord],
    actor: Actor,
    cause: Cause,
    now: &str,
) -> Result<LedgerTransition, CoreError> {
    let Command::AcceptAssignment { target_status } = command else {
        // Roster commands should use apply_roster() instead
        unreachable!("apply_ledger called with roster command")
    };

    if entry.status == target_status {
        // Re-asserting the current status is the idempotent no-op path.
        let action: Action = Action::new(
            String::from("AcceptAssignment"),
            Some(format!(
                "Booking '{}' already in status '{}'",
                entry.entry_id,
                target_status.as_str()
            )),
        );
        let audit_event: AuditEvent = ledger_audit(actor, cause, action, entry, entry);
        return Ok(LedgerTransition {
            entry: entry.clone(),
            audit_event,
            already_applied: true,
        });
    }

    entry.status.validate_transition(target_status)?;
    let interval: TimeInterval = entry.interval()?;

    // Cancelling frees the slot, so it skips the availability check.
    let conflict: Option<&OccupancyRecord> = if target_status == LedgerStatus::Cancelled {
        None
    } else {
        find_conflict(occupancy, &interval)
    };
    if let Some(conflict) = conflict {
        return Err(CoreError::BookingConflict(Box::new(conflict.clone())));
    }

    let mut updated: AssignmentLedgerEntry = entry.clone();
    updated.status = target_status;
    updated.updated_at = now.to_string();
    updated.updated_by = Some(actor.id.clone());
    updated.confirmed_at = if target_status == LedgerStatus::Cancelled {
        None
    } else {
        Some(now.to_string())
    };
    updated.revision = entry.revision + 1;

    let action: Action = Action::new(
        String::from("AcceptAssignment"),
        Some(format!(
            "Set booking '{}' (plate {}) to '{}'",
            entry.entry_id,
            entry.plate_number,
            target_status.as_str()
        )),
    );
    let audit_event: AuditEvent = ledger_audit(actor, cause, action, entry, &updated);

    Ok(LedgerTransition {
        entry: updated,
        audit_event,
        already_applied: false,
    })
}

/// The stored document, or a fresh draft when nothing exists yet.
/// Refreshes identity fields and applies the first-write-wins rule for
/// `created_at`.
fn base_document(
    existing: Option<&RosterDocument>,
    department: &Department,
    event_id: &str,
    now: &str,
) -> RosterDocument {
    let mut document: RosterDocument = existing
        .cloned()
        .unwrap_or_else(|| RosterDocument::new(department.key(), event_id));
    document.department = department.key().to_string();
    document.event_id = event_id.to_string();
    if document.created_at.is_none() {
        document.created_at = Some(now.to_string());
    }
    document
}

/// Applies matching close-out updates to every line in a bucket,
/// returning how many lines were touched. Duplicate names collapse
/// into the same update, an accepted limitation of name matching.
fn apply_close_outs(
    lines: &mut [RosterLine],
    updates: &[CloseOutUpdate],
    actor_id: &str,
    now: &str,
) -> usize {
    let mut matched: usize = 0;
    for line in lines.iter_mut() {
        let Some(update) = updates
            .iter()
            .find(|u| close_out_matches(&u.person_name, line.person_name.as_deref()))
        else {
            continue;
        };
        line.actual_end_time = update.actual_end_time.clone();
        line.notes = Some(update.notes.clone().unwrap_or_default());
        line.no_show = Some(update.no_show.unwrap_or(false));
        line.left_early = Some(update.left_early.unwrap_or(false));
        line.close_out_by = Some(actor_id.to_string());
        line.close_out_at = Some(now.to_string());
        matched += 1;
    }
    matched
}

/// Name equality for close-out matching. Empty names never match.
fn close_out_matches(update_name: &str, line_name: Option<&str>) -> bool {
    let key: String = fold_key(update_name);
    !key.is_empty() && line_name.is_some_and(|name| fold_key(name) == key)
}

/// Locates the driver row a save targets: by row id first, then by
/// plate (current or the one being replaced), then by position.
fn find_vehicle_row(
    drivers: &[RosterLine],
    row_id: Option<&str>,
    plate: &PlateNumber,
    previous: Option<&PlateNumber>,
    row_index: Option<usize>,
) -> Option<usize> {
    if let Some(index) = row_id
        .filter(|id| !id.is_empty())
        .and_then(|id| drivers.iter().position(|line| line.id == id))
    {
        return Some(index);
    }
    if let Some(index) = drivers.iter().position(|line| {
        line.matches_plate(plate) || previous.is_some_and(|p| line.matches_plate(p))
    }) {
        return Some(index);
    }
    row_index.filter(|&index| index < drivers.len())
}

/// Merges incoming row values into an existing driver line. Schedule
/// and vehicle fields are replaced; the person name falls back to the
/// stored one, and close-out data survives untouched.
fn merge_vehicle_row(row: &mut RosterLine, incoming: RosterLine, plate: &PlateNumber) {
    let end_date: Option<String> = incoming
        .end_date
        .clone()
        .or_else(|| incoming.start_date.clone());

    row.role = LineRole::Driver;
    row.plate_number = Some(plate.value().to_string());
    if incoming.person_id.is_some() {
        row.person_id = incoming.person_id;
    }
    if incoming.person_name.is_some() {
        row.person_name = incoming.person_name;
    }
    row.vehicle_type = incoming.vehicle_type;
    row.start_date = incoming.start_date;
    row.start_time = incoming.start_time;
    row.end_date = end_date;
    row.end_time = incoming.end_time;
    if incoming.arrival_time.is_some() {
        row.arrival_time = incoming.arrival_time;
    }
    if incoming.meeting_point.is_some() {
        row.meeting_point = incoming.meeting_point;
    }
    if incoming.notes.is_some() {
        row.notes = incoming.notes;
    }
}

/// Builds the appended driver line for a save that matched nothing.
fn new_vehicle_row(
    mut line: RosterLine,
    plate: &PlateNumber,
    row_id: Option<String>,
    generated_row_id: String,
) -> RosterLine {
    line.id = row_id
        .filter(|id| !id.is_empty())
        .unwrap_or(generated_row_id);
    line.role = LineRole::Driver;
    line.plate_number = Some(plate.value().to_string());
    if line.end_date.is_none() {
        line.end_date = line.start_date.clone();
    }
    line
}

fn document_snapshot(document: &RosterDocument) -> StateSnapshot {
    StateSnapshot::new(serde_json::to_string(document).unwrap_or_else(|_| String::from("{}")))
}

fn entry_snapshot(entry: &AssignmentLedgerEntry) -> StateSnapshot {
    StateSnapshot::new(serde_json::to_string(entry).unwrap_or_else(|_| String::from("{}")))
}

fn roster_audit(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: Option<&RosterDocument>,
    after: &RosterDocument,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        action,
        before.map_or_else(StateSnapshot::empty, document_snapshot),
        document_snapshot(after),
        Some(after.department.clone()),
        Some(after.event_id.clone()),
    )
}

fn ledger_audit(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: &AssignmentLedgerEntry,
    after: &AssignmentLedgerEntry,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        action,
        entry_snapshot(before),
        entry_snapshot(after),
        None,
        after.event_code.clone(),
    )
}
