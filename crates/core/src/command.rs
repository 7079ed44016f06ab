// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewdesk_domain::{LedgerStatus, RosterLine};

/// One end-of-shift correction for a single person, matched to their
/// roster line by case/diacritic-insensitive name equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutUpdate {
    /// Name of the person, as shown on the roster.
    pub person_name: String,
    /// The time the person actually finished, when it differed.
    pub actual_end_time: Option<String>,
    /// The person did not show up.
    pub no_show: Option<bool>,
    /// The person left before the planned end.
    pub left_early: Option<bool>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A command represents operator or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the roster's line buckets with the given lines,
    /// merge-preserving everything the request does not carry.
    UpsertRoster {
        /// All lines of the roster, bucketed by their role tag.
        lines: Vec<RosterLine>,
        /// Denormalized event business code, when the caller knows it.
        event_code: Option<String>,
        /// Denormalized event name.
        event_name: Option<String>,
        /// Destination address, input to distance enrichment.
        destination_address: Option<String>,
    },
    /// Confirm the roster. Idempotent: confirming a confirmed roster
    /// succeeds without touching the confirmation stamps.
    ConfirmRoster {
        /// Event business code resolved from the event record,
        /// best-effort copied onto the document.
        event_code: Option<String>,
    },
    /// Revert the roster to draft, clearing the confirmation stamps.
    UnconfirmRoster,
    /// Apply end-of-shift corrections and optionally mark the
    /// department's close-out stamp.
    CloseRosterForDepartment {
        /// Per-person corrections.
        updates: Vec<CloseOutUpdate>,
        /// When true, stamp `closed_by_dept[department] = now`.
        close_department: bool,
    },
    /// Upsert a single driver/vehicle line into the roster, the legacy
    /// path that bypasses the assignment ledger.
    SaveVehicleRow {
        /// Row id to match on, when the caller has one.
        row_id: Option<String>,
        /// The plate the row used to carry, for matches across a
        /// plate change.
        previous_plate: Option<String>,
        /// Positional fallback when neither id nor plate matches.
        row_index: Option<usize>,
        /// Id to assign when the row is appended as new.
        generated_row_id: String,
        /// The incoming row values.
        line: RosterLine,
    },
    /// Transition an assignment ledger entry, re-checking conflicts
    /// unless the target is a cancellation.
    AcceptAssignment {
        /// The requested status.
        target_status: LedgerStatus,
    },
}
