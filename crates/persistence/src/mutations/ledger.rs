// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment ledger mutations.
//!
//! Status writes are revision-guarded: the update matches on the revision
//! the caller read, so two operators accepting the same booking cannot
//! both win. The losing write surfaces as `RevisionConflict` instead of
//! silently overwriting.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crewdesk::LedgerTransition;
use crewdesk_domain::AssignmentLedgerEntry;

use crate::diesel_schema::ledger_entries;
use crate::error::PersistenceError;
use crate::mutations::audit::{persist_audit_event_mysql, persist_audit_event_sqlite};

backend_fn! {
/// Inserts a new ledger entry.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry` - The entry to insert
///
/// # Errors
///
/// Returns an error if the insert fails, including when the entry id
/// already exists.
pub fn insert_ledger_entry(
    conn: &mut _,
    entry: &AssignmentLedgerEntry,
) -> Result<(), PersistenceError> {
    debug!(entry_id = %entry.entry_id, plate = %entry.plate_number, "Inserting ledger entry");

    diesel::insert_into(ledger_entries::table)
        .values((
            ledger_entries::entry_id.eq(&entry.entry_id),
            ledger_entries::plate.eq(entry.plate_number.value()),
            ledger_entries::vehicle_type.eq(entry.vehicle_type.as_deref()),
            ledger_entries::driver_name.eq(entry.driver_name.as_deref()),
            ledger_entries::department.eq(entry.department.as_deref()),
            ledger_entries::notes.eq(entry.notes.as_deref()),
            ledger_entries::event_code.eq(entry.event_code.as_deref()),
            ledger_entries::start_date.eq(&entry.start_date),
            ledger_entries::start_time.eq(&entry.start_time),
            ledger_entries::end_date.eq(&entry.end_date),
            ledger_entries::end_time.eq(&entry.end_time),
            ledger_entries::status.eq(entry.status.as_str()),
            ledger_entries::requested_by.eq(entry.requested_by.as_deref()),
            ledger_entries::created_at.eq(&entry.created_at),
            ledger_entries::updated_at.eq(&entry.updated_at),
            ledger_entries::updated_by.eq(entry.updated_by.as_deref()),
            ledger_entries::confirmed_at.eq(entry.confirmed_at.as_deref()),
            ledger_entries::revision.eq(entry.revision),
        ))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Writes a status transition, guarded by the revision the caller read.
///
/// Only the fields a status transition changes are written. When no row
/// matches, the entry either vanished (`EntryNotFound`) or was bumped by
/// a concurrent writer (`RevisionConflict`).
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry` - The updated entry, `revision` already bumped
/// * `expected_revision` - The revision the caller loaded
///
/// # Errors
///
/// Returns `RevisionConflict` when the stored revision moved on,
/// `EntryNotFound` when the entry does not exist, or a database error.
pub fn update_ledger_entry_guarded(
    conn: &mut _,
    entry: &AssignmentLedgerEntry,
    expected_revision: i64,
) -> Result<(), PersistenceError> {
    debug!(
        entry_id = %entry.entry_id,
        status = entry.status.as_str(),
        expected_revision,
        "Writing guarded ledger update"
    );

    let rows_updated: usize = diesel::update(
        ledger_entries::table
            .filter(ledger_entries::entry_id.eq(&entry.entry_id))
            .filter(ledger_entries::revision.eq(expected_revision)),
    )
    .set((
        ledger_entries::status.eq(entry.status.as_str()),
        ledger_entries::updated_at.eq(&entry.updated_at),
        ledger_entries::updated_by.eq(entry.updated_by.as_deref()),
        ledger_entries::confirmed_at.eq(entry.confirmed_at.as_deref()),
        ledger_entries::revision.eq(entry.revision),
    ))
    .execute(conn)?;

    if rows_updated == 0 {
        use diesel::dsl::count;

        let existing: i64 = ledger_entries::table
            .filter(ledger_entries::entry_id.eq(&entry.entry_id))
            .select(count(ledger_entries::entry_id))
            .first(conn)?;

        if existing == 0 {
            return Err(PersistenceError::EntryNotFound(entry.entry_id.clone()));
        }
        return Err(PersistenceError::RevisionConflict {
            entry_id: entry.entry_id.clone(),
        });
    }

    Ok(())
}
}

/// Persists a ledger transition (`SQLite` version).
///
/// Writes the guarded status update, then the audit event. Idempotent
/// re-assertions carry no revision bump, so only the audit event is
/// stored for them.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `transition` - The transition to persist
///
/// # Returns
///
/// The event ID assigned to the persisted audit event.
///
/// # Errors
///
/// Returns an error if persistence fails, including `RevisionConflict`
/// when a concurrent writer got there first.
pub fn persist_ledger_transition_sqlite(
    conn: &mut SqliteConnection,
    transition: &LedgerTransition,
) -> Result<i64, PersistenceError> {
    if transition.already_applied {
        debug!(
            entry_id = %transition.entry.entry_id,
            "Status already applied; storing audit event only"
        );
    } else {
        update_ledger_entry_guarded_sqlite(conn, &transition.entry, transition.entry.revision - 1)?;
    }

    let event_id: i64 = persist_audit_event_sqlite(conn, &transition.audit_event)?;
    info!(
        event_id,
        entry_id = %transition.entry.entry_id,
        status = transition.entry.status.as_str(),
        "Persisted ledger transition"
    );

    Ok(event_id)
}

/// Persists a ledger transition (`MySQL` version).
///
/// Writes the guarded status update, then the audit event. Idempotent
/// re-assertions carry no revision bump, so only the audit event is
/// stored for them.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `transition` - The transition to persist
///
/// # Returns
///
/// The event ID assigned to the persisted audit event.
///
/// # Errors
///
/// Returns an error if persistence fails, including `RevisionConflict`
/// when a concurrent writer got there first.
pub fn persist_ledger_transition_mysql(
    conn: &mut MysqlConnection,
    transition: &LedgerTransition,
) -> Result<i64, PersistenceError> {
    if transition.already_applied {
        debug!(
            entry_id = %transition.entry.entry_id,
            "Status already applied; storing audit event only"
        );
    } else {
        update_ledger_entry_guarded_mysql(conn, &transition.entry, transition.entry.revision - 1)?;
    }

    let event_id: i64 = persist_audit_event_mysql(conn, &transition.audit_event)?;
    info!(
        event_id,
        entry_id = %transition.entry.entry_id,
        status = transition.entry.status.as_str(),
        "Persisted ledger transition"
    );

    Ok(event_id)
}
