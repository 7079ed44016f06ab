// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Department name is empty after normalization.
    EmptyDepartment,
    /// Plate number is empty after normalization.
    EmptyPlate,
    /// Event identifier is empty or invalid.
    InvalidEventId(String),
    /// Roster status string is not a valid status.
    InvalidRosterStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Ledger status string is not a valid status.
    InvalidLedgerStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Status transition is not permitted by lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Line role string is not a valid role.
    InvalidLineRole {
        /// The unrecognized role string.
        role: String,
    },
    /// Temp-crew headcount must be at least one.
    InvalidHeadcount {
        /// The invalid headcount value.
        count: u32,
    },
    /// Failed to parse a calendar date from string.
    DateParseError {
        /// The field that carried the value.
        field: String,
        /// The invalid date string.
        value: String,
    },
    /// Failed to parse a wall-clock time from string.
    TimeParseError {
        /// The field that carried the value.
        field: String,
        /// The invalid time string.
        value: String,
    },
    /// An interval's end does not lie strictly after its start.
    IntervalEndNotAfterStart {
        /// The interval start, as supplied.
        start: String,
        /// The interval end, as supplied.
        end: String,
    },
    /// A line is missing the fields required to derive an interval.
    MissingIntervalFields {
        /// Which field is missing.
        field: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDepartment => {
                write!(f, "Department name is empty after normalization")
            }
            Self::EmptyPlate => {
                write!(f, "Plate number is empty after normalization")
            }
            Self::InvalidEventId(msg) => write!(f, "Invalid event id: {msg}"),
            Self::InvalidRosterStatus { status } => {
                write!(f, "Invalid roster status: '{status}'")
            }
            Self::InvalidLedgerStatus { status } => {
                write!(f, "Invalid ledger status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::InvalidLineRole { role } => write!(f, "Invalid line role: '{role}'"),
            Self::InvalidHeadcount { count } => {
                write!(f, "Invalid temp-crew headcount: {count}. Must be at least 1")
            }
            Self::DateParseError { field, value } => {
                write!(f, "Failed to parse date '{value}' in field '{field}'")
            }
            Self::TimeParseError { field, value } => {
                write!(f, "Failed to parse time '{value}' in field '{field}'")
            }
            Self::IntervalEndNotAfterStart { start, end } => {
                write!(f, "Interval end '{end}' must lie strictly after start '{start}'")
            }
            Self::MissingIntervalFields { field } => {
                write!(f, "Missing field '{field}' required to derive an interval")
            }
        }
    }
}

impl std::error::Error for DomainError {}
