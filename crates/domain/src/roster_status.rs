// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster document status and transition logic.
//!
//! A roster moves between draft and confirmed by explicit operator
//! action only. Per-department closing is a side channel recorded on
//! the document, not a state of this machine.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a roster document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterStatus {
    /// Editable working state; the initial status on first save.
    Draft,
    /// Signed off by a responsible operator.
    Confirmed,
}

impl RosterStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRosterStatus` if the string is not
    /// a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(DomainError::InvalidRosterStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Both directions are legal (confirm and unconfirm); only
    /// re-asserting the current status is rejected. Idempotent confirm
    /// is handled above this check, by short-circuiting before any
    /// transition is attempted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if *self == new_status {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "status unchanged".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RosterStatus {
    /// New rosters start as drafts.
    fn default() -> Self {
        Self::Draft
    }
}

impl FromStr for RosterStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in [RosterStatus::Draft, RosterStatus::Confirmed] {
            let s = status.as_str();
            match RosterStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        let result = RosterStatus::parse_str("closed");
        assert!(result.is_err());
    }

    #[test]
    fn test_both_directions_are_valid() {
        assert!(
            RosterStatus::Draft
                .validate_transition(RosterStatus::Confirmed)
                .is_ok()
        );
        assert!(
            RosterStatus::Confirmed
                .validate_transition(RosterStatus::Draft)
                .is_ok()
        );
    }

    #[test]
    fn test_self_transition_rejected() {
        assert!(
            RosterStatus::Draft
                .validate_transition(RosterStatus::Draft)
                .is_err()
        );
        assert!(
            RosterStatus::Confirmed
                .validate_transition(RosterStatus::Confirmed)
                .is_err()
        );
    }
}
