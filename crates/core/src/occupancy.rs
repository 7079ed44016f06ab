// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The resource occupancy index and the conflict detector.
//!
//! Occupancy is always computed fresh from the two booking sources,
//! never cached: an overlap missed because of a stale cache is worse
//! than the cost of rescanning at this data scale.

use crewdesk_domain::{
    AssignmentLedgerEntry, OccupancyRecord, OccupancySource, PlateNumber, RosterDocument,
    TimeInterval,
};

/// Computes every interval during which the given vehicle is already
/// committed.
///
/// Two independent sources contribute:
///
/// - driver-role lines in department rosters whose plate matches,
///   regardless of roster status (a draft roster still holds the
///   vehicle);
/// - active (`pending | confirmed | addedToTorns`) ledger entries for
///   the plate, optionally excluding one entry id so an entry being
///   re-validated does not conflict with itself.
///
/// Lines and entries whose stored dates are missing or unparseable
/// contribute nothing.
#[must_use]
pub fn build_occupancy(
    plate: &PlateNumber,
    documents: &[RosterDocument],
    entries: &[AssignmentLedgerEntry],
    exclude_entry_id: Option<&str>,
) -> Vec<OccupancyRecord> {
    let mut records: Vec<OccupancyRecord> = Vec::new();

    for document in documents {
        for line in document.driver_lines() {
            if !line.matches_plate(plate) {
                continue;
            }
            let Ok(Some(interval)) = line.interval() else {
                continue;
            };
            records.push(OccupancyRecord {
                source: OccupancySource::Roster,
                reference: roster_reference(document, line.id.as_str()),
                department: Some(document.department.clone()),
                event_ref: Some(document.event_id.clone()),
                plate: plate.clone(),
                interval,
                status: document.line_status(line),
            });
        }
    }

    for entry in entries {
        if exclude_entry_id.is_some_and(|id| id == entry.entry_id) {
            continue;
        }
        if !entry.is_active() || !entry.matches_plate(plate) {
            continue;
        }
        let Ok(interval) = entry.interval() else {
            continue;
        };
        records.push(OccupancyRecord {
            source: OccupancySource::Ledger,
            reference: entry.entry_id.clone(),
            department: None,
            event_ref: entry.event_code.clone(),
            plate: plate.clone(),
            interval,
            status: entry.status.as_str().to_string(),
        });
    }

    records
}

/// Returns the first occupancy record overlapping the requested
/// interval, in source order.
///
/// This is a boolean-with-evidence check, not an exhaustive conflict
/// report: one colliding record is enough to reject a booking.
#[must_use]
pub fn find_conflict<'a>(
    records: &'a [OccupancyRecord],
    requested: &TimeInterval,
) -> Option<&'a OccupancyRecord> {
    records.iter().find(|record| record.overlaps(requested))
}

/// Reference id for a roster-sourced record. Legacy lines may carry an
/// empty id, in which case the document identity stands in.
fn roster_reference(document: &RosterDocument, line_id: &str) -> String {
    if line_id.is_empty() {
        format!("{}:{}", document.department, document.event_id)
    } else {
        line_id.to_string()
    }
}
