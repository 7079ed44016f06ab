// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment ledger entries.
//!
//! The ledger is the booking workflow for vehicles that is independent
//! of any department roster. Entries carry their own lifecycle
//! ([`crate::LedgerStatus`]) and meet the roster world only inside the
//! occupancy index.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::interval::TimeInterval;
use crate::ledger_status::LedgerStatus;
use crate::plate::PlateNumber;

/// One vehicle-booking record in the assignment ledger.
///
/// Dates and times are wall-clock strings, the same formats the roster
/// lines use. `revision` guards status writes: every successful status
/// transition bumps it, and a write conditioned on a stale revision
/// changes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentLedgerEntry {
    /// Generated identifier.
    pub entry_id: String,
    /// The booked vehicle, canonical form.
    pub plate_number: PlateNumber,
    /// Vehicle category, free text.
    pub vehicle_type: Option<String>,
    /// Name of the person driving, when assigned.
    pub driver_name: Option<String>,
    /// Requesting department, free text. Not used for authorization.
    pub department: Option<String>,
    /// Free-text notes from the requester.
    pub notes: Option<String>,
    /// Business code of the event the booking serves, when known.
    pub event_code: Option<String>,
    /// Booking start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Booking start time, `HH:MM`.
    pub start_time: String,
    /// Booking end date. Legacy entries may leave this empty.
    pub end_date: String,
    /// Booking end time. Legacy entries may leave this empty.
    pub end_time: String,
    /// Lifecycle status.
    pub status: LedgerStatus,
    /// Who raised the request.
    pub requested_by: Option<String>,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Last write time, RFC 3339.
    pub updated_at: String,
    /// Who last changed the entry.
    pub updated_by: Option<String>,
    /// When the entry was confirmed, RFC 3339. Cleared on cancellation.
    pub confirmed_at: Option<String>,
    /// Optimistic-concurrency guard, bumped by every status write.
    pub revision: i64,
}

impl AssignmentLedgerEntry {
    /// Creates a new pending entry.
    ///
    /// The caller supplies the generated id and the creation timestamp;
    /// this type stays free of clocks and randomness.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entry_id: impl Into<String>,
        plate_number: PlateNumber,
        start_date: impl Into<String>,
        start_time: impl Into<String>,
        end_date: impl Into<String>,
        end_time: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        let created_at: String = created_at.into();
        Self {
            entry_id: entry_id.into(),
            plate_number,
            vehicle_type: None,
            driver_name: None,
            department: None,
            notes: None,
            event_code: None,
            start_date: start_date.into(),
            start_time: start_time.into(),
            end_date: end_date.into(),
            end_time: end_time.into(),
            status: LedgerStatus::Pending,
            requested_by: None,
            created_at: created_at.clone(),
            updated_at: created_at,
            updated_by: None,
            confirmed_at: None,
            revision: 0,
        }
    }

    /// Derives the committed interval of this entry.
    ///
    /// The end date defaults to the start date and the end time to the
    /// start time, the same rules roster lines use.
    ///
    /// # Errors
    ///
    /// Returns `MissingIntervalFields` when the start date or time is
    /// absent, or a parse error when a stored field is malformed.
    pub fn interval(&self) -> Result<TimeInterval, DomainError> {
        if self.start_date.trim().is_empty() {
            return Err(DomainError::MissingIntervalFields {
                field: "start_date".to_string(),
            });
        }
        if self.start_time.trim().is_empty() {
            return Err(DomainError::MissingIntervalFields {
                field: "start_time".to_string(),
            });
        }
        TimeInterval::from_wall_clock(
            &self.start_date,
            &self.start_time,
            Some(&self.end_date),
            Some(&self.end_time),
        )
    }

    /// Derives the interval and requires it to have positive length.
    ///
    /// Used when creating entries, where an end before or equal to the
    /// start is a caller mistake rather than legacy data.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::interval`], plus
    /// `IntervalEndNotAfterStart` for empty or inverted intervals.
    pub fn validated_interval(&self) -> Result<TimeInterval, DomainError> {
        let interval: TimeInterval = self.interval()?;
        if interval.end() <= interval.start() {
            return Err(DomainError::IntervalEndNotAfterStart {
                start: interval.start_string(),
                end: interval.end_string(),
            });
        }
        Ok(interval)
    }

    /// Whether this entry counts toward occupancy.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether this entry books the given plate.
    #[must_use]
    pub fn matches_plate(&self, plate: &PlateNumber) -> bool {
        self.plate_number == *plate
    }
}
