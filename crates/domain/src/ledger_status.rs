// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment ledger status and transition logic.
//!
//! Ledger entries track vehicle bookings raised outside any department
//! roster. The wire names are camelCase because the legacy store
//! recorded them that way; `addedToTorns` means the booking has been
//! merged into the operational shift schedule.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of an assignment ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LedgerStatus {
    /// Raised but not yet accepted; still counts as active occupancy.
    Pending,
    /// Accepted by an operator.
    Confirmed,
    /// Merged into the operational shift schedule; terminal.
    AddedToTorns,
    /// Withdrawn; never counts as occupancy.
    Cancelled,
}

impl LedgerStatus {
    /// Every status that blocks other bookings of the same vehicle.
    pub const ACTIVE: [Self; 3] = [Self::Pending, Self::Confirmed, Self::AddedToTorns];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::AddedToTorns => "addedToTorns",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLedgerStatus` if the string is not
    /// a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "addedToTorns" => Ok(Self::AddedToTorns),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidLedgerStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if entries in this status occupy their vehicle.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::AddedToTorns)
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::AddedToTorns | Self::Cancelled)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        // Cannot transition from terminal states
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Pending => matches!(
                new_status,
                Self::Confirmed | Self::AddedToTorns | Self::Cancelled
            ),
            Self::Confirmed => matches!(new_status, Self::AddedToTorns | Self::Cancelled),
            Self::AddedToTorns | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by status lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for LedgerStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
