// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Occupancy records, the derived view unifying both booking sources.
//!
//! Nothing here is stored. Records are computed on demand from the
//! department rosters and the assignment ledger, and exist so conflict
//! responses can name exactly what a new booking collided with.

use crate::interval::TimeInterval;
use crate::plate::PlateNumber;

/// Which workflow a committed interval came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancySource {
    /// A driver line embedded in a department roster.
    Roster,
    /// An assignment ledger entry.
    Ledger,
}

impl OccupancySource {
    /// Returns the wire representation of the source.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Roster => "roster",
            Self::Ledger => "ledger",
        }
    }
}

impl std::fmt::Display for OccupancySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One interval during which a vehicle is already committed.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyRecord {
    /// Where the commitment originates.
    pub source: OccupancySource,
    /// Id of the originating record: roster line id or ledger entry id.
    pub reference: String,
    /// Owning department, roster-sourced records only.
    pub department: Option<String>,
    /// Event the commitment serves: event id for roster records,
    /// business code for ledger records, when known.
    pub event_ref: Option<String>,
    /// The committed vehicle.
    pub plate: PlateNumber,
    /// The committed interval.
    pub interval: TimeInterval,
    /// Status tag of the originating record.
    pub status: String,
}

impl OccupancyRecord {
    /// Half-open overlap test against a requested interval.
    #[must_use]
    pub fn overlaps(&self, requested: &TimeInterval) -> bool {
        self.interval.overlaps(requested)
    }
}
