// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod department;
mod error;
mod interval;
mod ledger;
mod ledger_status;
mod normalize;
mod occupancy;
mod plate;
mod roster;
mod roster_status;

#[cfg(test)]
mod tests;

pub use department::Department;
pub use error::DomainError;
pub use interval::{TimeInterval, parse_date, parse_time};
pub use ledger::AssignmentLedgerEntry;
pub use ledger_status::LedgerStatus;
pub use normalize::{fold_key, folded_eq};
pub use occupancy::{OccupancyRecord, OccupancySource};
pub use plate::PlateNumber;
pub use roster::{LineRole, RosterDocument, RosterLine};
pub use roster_status::RosterStatus;
