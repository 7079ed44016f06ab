// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewdesk_domain::{DomainError, OccupancyRecord};

/// Errors that can occur while applying roster and ledger operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The operation requires an existing roster document, and none
    /// exists for the requested identity.
    RosterNotFound {
        /// Canonical department key.
        department: String,
        /// The event id or business code used for the lookup.
        event_id: String,
    },
    /// The requested interval collides with an existing commitment.
    ///
    /// Carries the first colliding occupancy record so callers can
    /// show what the booking ran into, not just that it failed.
    BookingConflict(Box<OccupancyRecord>),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::RosterNotFound {
                department,
                event_id,
            } => {
                write!(
                    f,
                    "No roster for department '{department}', event '{event_id}'"
                )
            }
            Self::BookingConflict(record) => {
                write!(
                    f,
                    "Vehicle {} already committed {} to {} by {} record '{}'",
                    record.plate,
                    record.interval.start_string(),
                    record.interval.end_string(),
                    record.source,
                    record.reference
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
