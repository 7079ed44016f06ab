// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment ledger queries.
//!
//! Ledger entries are stored column-per-field (unlike roster documents)
//! because the booking reports filter and sort on individual columns.
//! All queries use Diesel DSL and work across all supported database
//! backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crewdesk_domain::{AssignmentLedgerEntry, LedgerStatus, PlateNumber};

use crate::diesel_schema::ledger_entries;
use crate::error::PersistenceError;

/// Diesel Queryable struct for ledger entry rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = ledger_entries)]
pub(crate) struct LedgerEntryRow {
    entry_id: String,
    plate: String,
    vehicle_type: Option<String>,
    driver_name: Option<String>,
    department: Option<String>,
    notes: Option<String>,
    event_code: Option<String>,
    start_date: String,
    start_time: String,
    end_date: String,
    end_time: String,
    status: String,
    requested_by: Option<String>,
    created_at: String,
    updated_at: String,
    updated_by: Option<String>,
    confirmed_at: Option<String>,
    revision: i64,
}

/// Rebuilds a domain entry from a stored row.
///
/// The stored plate and status were written from their canonical forms,
/// so a parse failure here means the row was edited outside the system.
pub(crate) fn entry_from_row(row: LedgerEntryRow) -> Result<AssignmentLedgerEntry, PersistenceError> {
    let plate_number: PlateNumber = PlateNumber::new(&row.plate)
        .map_err(|e| PersistenceError::Other(format!("Stored plate rejected: {e}")))?;
    let status: LedgerStatus = row
        .status
        .parse()
        .map_err(|e| PersistenceError::Other(format!("Stored status rejected: {e}")))?;

    Ok(AssignmentLedgerEntry {
        entry_id: row.entry_id,
        plate_number,
        vehicle_type: row.vehicle_type,
        driver_name: row.driver_name,
        department: row.department,
        notes: row.notes,
        event_code: row.event_code,
        start_date: row.start_date,
        start_time: row.start_time,
        end_date: row.end_date,
        end_time: row.end_time,
        status,
        requested_by: row.requested_by,
        created_at: row.created_at,
        updated_at: row.updated_at,
        updated_by: row.updated_by,
        confirmed_at: row.confirmed_at,
        revision: row.revision,
    })
}

backend_fn! {
/// Retrieves a ledger entry by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry_id` - The entry id
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row fails
/// domain validation. Returns `Ok(None)` if the entry is not found.
pub fn get_ledger_entry(
    conn: &mut _,
    entry_id: &str,
) -> Result<Option<AssignmentLedgerEntry>, PersistenceError> {
    debug!(entry_id, "Looking up ledger entry");

    let result: Result<LedgerEntryRow, diesel::result::Error> = ledger_entries::table
        .filter(ledger_entries::entry_id.eq(entry_id))
        .select(LedgerEntryRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(entry_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists ledger entries matching the report filters.
///
/// `from_date`/`to_date` bound `start_date` inclusively; the fixed
/// `YYYY-MM-DD` format makes string comparison equal to date comparison.
/// Cancelled entries are excluded unless `include_cancelled` is set.
/// Results are ordered by start date, then start time.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plate` - Optional normalized plate filter
/// * `from_date` - Optional inclusive lower bound on `start_date`
/// * `to_date` - Optional inclusive upper bound on `start_date`
/// * `include_cancelled` - Whether cancelled entries appear in the result
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row fails
/// domain validation. Callers degrade to `list_all_ledger_entries` with
/// in-memory filtering when this query errors.
pub fn list_ledger_entries(
    conn: &mut _,
    plate: Option<&str>,
    from_date: Option<&str>,
    to_date: Option<&str>,
    include_cancelled: bool,
) -> Result<Vec<AssignmentLedgerEntry>, PersistenceError> {
    debug!(
        ?plate,
        ?from_date,
        ?to_date,
        include_cancelled,
        "Listing ledger entries"
    );

    let mut query = ledger_entries::table.into_boxed();

    if let Some(plate) = plate {
        query = query.filter(ledger_entries::plate.eq(plate));
    }
    if let Some(from_date) = from_date {
        query = query.filter(ledger_entries::start_date.ge(from_date));
    }
    if let Some(to_date) = to_date {
        query = query.filter(ledger_entries::start_date.le(to_date));
    }
    if !include_cancelled {
        query = query.filter(ledger_entries::status.ne(LedgerStatus::Cancelled.as_str()));
    }

    let rows: Vec<LedgerEntryRow> = query
        .order_by((
            ledger_entries::start_date.asc(),
            ledger_entries::start_time.asc(),
        ))
        .select(LedgerEntryRow::as_select())
        .load(conn)?;

    rows.into_iter().map(entry_from_row).collect()
}
}

backend_fn! {
/// Lists every ledger entry, cancelled ones included.
///
/// This is the occupancy-scan read and the fallback path when the
/// filtered report query errors.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row fails
/// domain validation.
pub fn list_all_ledger_entries(
    conn: &mut _,
) -> Result<Vec<AssignmentLedgerEntry>, PersistenceError> {
    debug!("Listing all ledger entries");

    let rows: Vec<LedgerEntryRow> = ledger_entries::table
        .order_by((
            ledger_entries::start_date.asc(),
            ledger_entries::start_time.asc(),
        ))
        .select(LedgerEntryRow::as_select())
        .load(conn)?;

    rows.into_iter().map(entry_from_row).collect()
}
}
