// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod occupancy;
mod transition;

#[cfg(test)]
mod tests;

use crewdesk_domain::{
    AssignmentLedgerEntry, DomainError, PlateNumber, RosterDocument, TimeInterval,
};

// Re-export public types and functions
pub use apply::{apply_ledger, apply_roster};
pub use command::{CloseOutUpdate, Command};
pub use error::CoreError;
pub use occupancy::{build_occupancy, find_conflict};
pub use transition::{LedgerTransition, RosterTransition};

/// Validates that an event identifier is usable as a roster scope.
///
/// This is a read-only validation that does not create audit events.
///
/// # Arguments
///
/// * `event_id` - The event identifier to validate
///
/// # Returns
///
/// * `Ok(())` if the identifier is non-empty
/// * `Err(DomainError::InvalidEventId)` if it is blank
///
/// # Errors
///
/// Returns an error if the identifier is empty or whitespace.
pub fn validate_event_id(event_id: &str) -> Result<(), DomainError> {
    if event_id.trim().is_empty() {
        return Err(DomainError::InvalidEventId(String::from(
            "identifier is empty",
        )));
    }
    Ok(())
}

/// Validates that a vehicle is free for the requested interval.
///
/// This is a read-only validation that does not create audit events.
/// Occupancy is rebuilt from the supplied documents and ledger entries
/// on every call, so the answer always reflects current stored state.
///
/// # Arguments
///
/// * `plate` - The vehicle plate to check
/// * `requested` - The interval the caller wants to commit
/// * `documents` - Roster documents that may schedule the vehicle
/// * `entries` - Ledger entries that may book the vehicle
/// * `exclude_entry_id` - Ledger entry to leave out of the check, if any
///
/// # Returns
///
/// * `Ok(())` if no stored occupancy overlaps the request
/// * `Err(CoreError::BookingConflict)` with the first colliding record
///
/// # Errors
///
/// Returns an error if the vehicle is already committed during any part
/// of the requested interval.
pub fn check_vehicle_available(
    plate: &PlateNumber,
    requested: &TimeInterval,
    documents: &[RosterDocument],
    entries: &[AssignmentLedgerEntry],
    exclude_entry_id: Option<&str>,
) -> Result<(), CoreError> {
    let records = build_occupancy(plate, documents, entries, exclude_entry_id);
    if let Some(conflict) = find_conflict(&records, requested) {
        return Err(CoreError::BookingConflict(Box::new(conflict.clone())));
    }
    Ok(())
}
