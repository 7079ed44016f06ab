// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster documents and their role lines.
//!
//! A [`RosterDocument`] is the per-department, per-event staffing and
//! vehicle plan. It holds four role buckets of [`RosterLine`] entries
//! plus lifecycle state, legacy mirror fields, and convenience
//! aggregates kept in sync by [`RosterDocument::refresh_aggregates`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::interval::TimeInterval;
use crate::plate::PlateNumber;
use crate::roster_status::RosterStatus;

/// The role a roster line fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineRole {
    /// Person in charge of the event for their department.
    Responsible,
    /// Vehicle plus the person driving it.
    Driver,
    /// Regular staff member.
    Worker,
    /// Agency-supplied temporary crew, booked as a headcount block.
    TempCrew,
}

impl LineRole {
    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Responsible => "responsible",
            Self::Driver => "driver",
            Self::Worker => "worker",
            Self::TempCrew => "temp-crew",
        }
    }

    /// Parses a role from its wire representation.
    fn parse_str(value: &str) -> Result<Self, DomainError> {
        match value {
            "responsible" => Ok(Self::Responsible),
            "driver" => Ok(Self::Driver),
            "worker" => Ok(Self::Worker),
            "temp-crew" => Ok(Self::TempCrew),
            other => Err(DomainError::InvalidLineRole {
                role: other.to_string(),
            }),
        }
    }
}

impl Default for LineRole {
    /// Legacy rows without a role tag are treated as plain workers.
    fn default() -> Self {
        Self::Worker
    }
}

impl fmt::Display for LineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LineRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// One row of a roster: a person, or a vehicle plus its driver.
///
/// All date and time fields are wall-clock strings (`YYYY-MM-DD`,
/// `HH:MM`). Legacy documents omit most fields, so everything except
/// the role defaults on deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterLine {
    /// Row identifier. Legacy rows may carry an empty id.
    pub id: String,
    /// The role this line fills.
    pub role: LineRole,
    /// Identifier of the assigned person, when known.
    pub person_id: Option<String>,
    /// Denormalized person name for display and close-out matching.
    pub person_name: Option<String>,
    /// Where the person reports before the event.
    pub meeting_point: Option<String>,
    /// Shift start date, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Shift start time, `HH:MM`.
    pub start_time: Option<String>,
    /// Shift end date; defaults to the start date when absent.
    pub end_date: Option<String>,
    /// Shift end time; absent means the shift end is unknown.
    pub end_time: Option<String>,
    /// Vehicle category, driver lines only.
    pub vehicle_type: Option<String>,
    /// Vehicle plate, driver lines only. Stored raw, compared normalized.
    pub plate_number: Option<String>,
    /// Time the vehicle must arrive at the venue, driver lines only.
    pub arrival_time: Option<String>,
    /// Number of people in a temp-crew block.
    pub headcount: Option<u32>,
    /// Supplying agency, temp-crew lines only.
    pub agency: Option<String>,
    /// Line-level status tag; inherits the document status when absent.
    pub status: Option<String>,
    /// Close-out correction: the time the person actually finished.
    pub actual_end_time: Option<String>,
    /// Close-out correction: the person did not show up.
    pub no_show: Option<bool>,
    /// Close-out correction: the person left before the planned end.
    pub left_early: Option<bool>,
    /// Free-text close-out notes.
    pub notes: Option<String>,
    /// Who recorded the close-out corrections for this line.
    pub close_out_by: Option<String>,
    /// When the close-out corrections were recorded, RFC 3339.
    pub close_out_at: Option<String>,
}

impl RosterLine {
    /// Creates an empty line with the given identity and role.
    #[must_use]
    pub fn new(id: impl Into<String>, role: LineRole) -> Self {
        Self {
            id: id.into(),
            role,
            ..Self::default()
        }
    }

    /// Derives the committed interval of this line, if it has one.
    ///
    /// Lines without a start date or start time have no interval and
    /// never occupy a vehicle. The end date defaults to the start date
    /// and the end time to the start time.
    ///
    /// # Errors
    ///
    /// Returns a parse error when a present field is malformed.
    pub fn interval(&self) -> Result<Option<TimeInterval>, DomainError> {
        let (Some(start_date), Some(start_time)) = (
            self.start_date.as_deref().filter(|d| !d.trim().is_empty()),
            self.start_time.as_deref().filter(|t| !t.trim().is_empty()),
        ) else {
            return Ok(None);
        };
        TimeInterval::from_wall_clock(
            start_date,
            start_time,
            self.end_date.as_deref(),
            self.end_time.as_deref(),
        )
        .map(Some)
    }

    /// Whether this line references the given plate, compared normalized.
    #[must_use]
    pub fn matches_plate(&self, plate: &PlateNumber) -> bool {
        self.plate_number
            .as_deref()
            .is_some_and(|raw| plate.matches(raw))
    }
}

/// The per-department, per-event roster.
///
/// Identity is `(department, event_id)`; the department is stored as
/// its canonical folded key. Legacy single-responsible mirror fields
/// and the count aggregates are derived data, refreshed on every
/// mutation through [`RosterDocument::refresh_aggregates`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterDocument {
    /// Canonical department key.
    pub department: String,
    /// Identifier of the event this roster staffs.
    pub event_id: String,
    /// Denormalized business code of the event.
    pub event_code: Option<String>,
    /// Denormalized event name.
    pub event_name: Option<String>,
    /// Denormalized destination address, input to distance enrichment.
    pub destination_address: Option<String>,
    /// Lifecycle status of the roster.
    pub status: RosterStatus,
    /// When the roster was confirmed, RFC 3339.
    pub confirmed_at: Option<String>,
    /// Who confirmed the roster.
    pub confirmed_by: Option<String>,
    /// Responsible lines.
    pub responsibles: Vec<RosterLine>,
    /// Driver lines (vehicle bookings embedded in the roster).
    pub drivers: Vec<RosterLine>,
    /// Worker lines.
    pub workers: Vec<RosterLine>,
    /// Temp-crew blocks.
    pub temp_crew: Vec<RosterLine>,
    /// Legacy mirror: person id of the primary responsible.
    pub responsible_id: Option<String>,
    /// Legacy mirror: name of the primary responsible.
    pub responsible_name: Option<String>,
    /// Number of responsible lines.
    pub responsible_count: u32,
    /// Number of driver lines.
    pub driver_count: u32,
    /// Number of worker lines. Temp-crew headcount is tracked separately.
    pub worker_count: u32,
    /// Total people across all temp-crew blocks.
    pub temp_crew_headcount: u32,
    /// Per-department close-out stamps, department key to RFC 3339 time.
    pub closed_by_dept: BTreeMap<String, String>,
    /// Round-trip distance to the destination, kilometres.
    pub distance_km: Option<f64>,
    /// When the distance was last calculated, RFC 3339.
    pub distance_calc_at: Option<String>,
    /// First write time, RFC 3339. Never changed after the first save.
    pub created_at: Option<String>,
    /// Last write time, RFC 3339. Refreshed on every save.
    pub updated_at: Option<String>,
}

impl RosterDocument {
    /// Creates an empty draft roster for the given identity.
    #[must_use]
    pub fn new(department: impl Into<String>, event_id: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            event_id: event_id.into(),
            ..Self::default()
        }
    }

    /// Returns the bucket holding lines of the given role.
    #[must_use]
    pub const fn bucket(&self, role: LineRole) -> &Vec<RosterLine> {
        match role {
            LineRole::Responsible => &self.responsibles,
            LineRole::Driver => &self.drivers,
            LineRole::Worker => &self.workers,
            LineRole::TempCrew => &self.temp_crew,
        }
    }

    /// Returns the mutable bucket holding lines of the given role.
    pub const fn bucket_mut(&mut self, role: LineRole) -> &mut Vec<RosterLine> {
        match role {
            LineRole::Responsible => &mut self.responsibles,
            LineRole::Driver => &mut self.drivers,
            LineRole::Worker => &mut self.workers,
            LineRole::TempCrew => &mut self.temp_crew,
        }
    }

    /// Iterates every line across all four buckets.
    pub fn all_lines(&self) -> impl Iterator<Item = &RosterLine> {
        self.responsibles
            .iter()
            .chain(self.drivers.iter())
            .chain(self.workers.iter())
            .chain(self.temp_crew.iter())
    }

    /// Iterates every driver-role line, regardless of which bucket
    /// a legacy document stored it in.
    pub fn driver_lines(&self) -> impl Iterator<Item = &RosterLine> {
        self.all_lines()
            .filter(|line| line.role == LineRole::Driver)
    }

    /// The occupancy status tag of a line: its own tag when present,
    /// otherwise the document status.
    #[must_use]
    pub fn line_status(&self, line: &RosterLine) -> String {
        line.status
            .clone()
            .unwrap_or_else(|| self.status.as_str().to_string())
    }

    /// Recomputes the count aggregates and the legacy single-responsible
    /// mirror fields from the current buckets.
    ///
    /// The primary responsible for legacy reads is the first line of the
    /// responsibles bucket; further responsible lines coexist but are
    /// not mirrored.
    pub fn refresh_aggregates(&mut self) {
        self.responsible_count = u32::try_from(self.responsibles.len()).unwrap_or(u32::MAX);
        self.driver_count = u32::try_from(self.drivers.len()).unwrap_or(u32::MAX);
        self.worker_count = u32::try_from(self.workers.len()).unwrap_or(u32::MAX);
        self.temp_crew_headcount = self
            .temp_crew
            .iter()
            .map(|line| line.headcount.unwrap_or(0))
            .sum();

        let primary: Option<&RosterLine> = self.responsibles.first();
        self.responsible_id = primary.and_then(|line| line.person_id.clone());
        self.responsible_name = primary.and_then(|line| line.person_name.clone());
    }

    /// Whether the given department has closed this roster.
    #[must_use]
    pub fn is_closed_for(&self, department_key: &str) -> bool {
        self.closed_by_dept.contains_key(department_key)
    }
}
