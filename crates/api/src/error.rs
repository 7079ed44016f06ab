// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crewdesk::CoreError;
use crewdesk_domain::{DomainError, OccupancyRecord};
use crewdesk_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// The colliding booking a conflict error carries.
///
/// Conflict responses are never a bare boolean: the caller gets the
/// source, the originating record, and the blocking interval so the
/// operator can see what the request ran into.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConflictEvidence {
    /// Which booking source holds the commitment (`roster` or `ledger`).
    pub source: String,
    /// The originating record: a roster line reference or a ledger entry id.
    pub reference: String,
    /// The department owning the roster, for roster-sourced conflicts.
    pub department: Option<String>,
    /// The committed vehicle plate, canonical form.
    pub plate: String,
    /// Start of the blocking interval, `YYYY-MM-DDTHH:MM`.
    pub interval_start: String,
    /// End of the blocking interval, `YYYY-MM-DDTHH:MM`.
    pub interval_end: String,
    /// Lifecycle status of the blocking commitment.
    pub status: String,
}

impl ConflictEvidence {
    /// Builds evidence from the occupancy record a conflict check returned.
    #[must_use]
    pub fn from_record(record: &OccupancyRecord) -> Self {
        Self {
            source: record.source.as_str().to_string(),
            reference: record.reference.clone(),
            department: record.department.clone(),
            plate: record.plate.value().to_string(),
            interval_start: record.interval.start_string(),
            interval_end: record.interval.end_string(),
            status: record.status.clone(),
        }
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The requested interval collides with an existing commitment.
    BookingConflict {
        /// The colliding booking.
        conflict: ConflictEvidence,
    },
    /// A concurrent writer changed the record between read and write.
    ConcurrentUpdate {
        /// The ledger entry that was changed underneath the caller.
        entry_id: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::BookingConflict { conflict } => {
                write!(
                    f,
                    "Vehicle {} is already committed {} to {} by {} record '{}'",
                    conflict.plate,
                    conflict.interval_start,
                    conflict.interval_end,
                    conflict.source,
                    conflict.reference
                )
            }
            Self::ConcurrentUpdate { entry_id } => {
                write!(
                    f,
                    "Booking '{entry_id}' was changed by another operator; reload and retry"
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyDepartment => ApiError::InvalidInput {
            field: String::from("department"),
            message: String::from("Department name is empty after normalization"),
        },
        DomainError::EmptyPlate => ApiError::InvalidInput {
            field: String::from("plate_number"),
            message: String::from("Plate number is empty after normalization"),
        },
        DomainError::InvalidEventId(msg) => ApiError::InvalidInput {
            field: String::from("event_id"),
            message: msg,
        },
        DomainError::InvalidRosterStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid roster status: '{status}'"),
        },
        DomainError::InvalidLedgerStatus { status } => ApiError::InvalidInput {
            field: String::from("target_status"),
            message: format!(
                "Invalid status: '{status}'. Must be one of pending, confirmed, addedToTorns, cancelled"
            ),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("status_lifecycle"),
                message: format!("Cannot transition from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::InvalidLineRole { role } => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!(
                "Invalid line role: '{role}'. Must be one of responsible, driver, worker, temp-crew"
            ),
        },
        DomainError::InvalidHeadcount { count } => ApiError::InvalidInput {
            field: String::from("headcount"),
            message: format!("Invalid temp-crew headcount: {count}. Must be at least 1"),
        },
        DomainError::DateParseError { field, value } => ApiError::InvalidInput {
            field,
            message: format!("Failed to parse date '{value}'. Expected YYYY-MM-DD"),
        },
        DomainError::TimeParseError { field, value } => ApiError::InvalidInput {
            field,
            message: format!("Failed to parse time '{value}'. Expected HH:MM"),
        },
        DomainError::IntervalEndNotAfterStart { start, end } => ApiError::InvalidInput {
            field: String::from("end_time"),
            message: format!("Interval end '{end}' must lie strictly after start '{start}'"),
        },
        DomainError::MissingIntervalFields { field } => ApiError::InvalidInput {
            field,
            message: String::from("Required to derive the booking interval"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::RosterNotFound {
            department,
            event_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Roster"),
            message: format!("No roster for department '{department}', event '{event_id}'"),
        },
        CoreError::BookingConflict(record) => ApiError::BookingConflict {
            conflict: ConflictEvidence::from_record(&record),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Lookup misses become `ResourceNotFound`, a lost revision race becomes
/// `ConcurrentUpdate`, and everything else is reported as internal so
/// storage details never leak into the API contract.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::RosterNotFound {
            department,
            event_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Roster"),
            message: format!("No roster for department '{department}', event '{event_id}'"),
        },
        PersistenceError::EntryNotFound(entry_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("No ledger entry '{entry_id}'"),
        },
        PersistenceError::EventNotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("No audit event {event_id}"),
        },
        PersistenceError::OperatorNotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Operator"),
            message: msg,
        },
        PersistenceError::RevisionConflict { entry_id } => ApiError::ConcurrentUpdate { entry_id },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
