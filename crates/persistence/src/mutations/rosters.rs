// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster document mutations.
//!
//! Documents are written whole: the JSON column carries the full document
//! and the scoping columns are refreshed from it on every save. The
//! insert-or-update split uses plain Diesel DSL so the same body works on
//! both backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crewdesk::RosterTransition;
use crewdesk_domain::RosterDocument;

use crate::diesel_schema::roster_documents;
use crate::error::PersistenceError;
use crate::mutations::audit::{persist_audit_event_mysql, persist_audit_event_sqlite};

backend_fn! {
/// Inserts or updates the roster document for its `(department, event)` scope.
///
/// The caller is responsible for the merge semantics; by the time a
/// document reaches this function it is the complete new state, with
/// `created_at` preserved and `updated_at` refreshed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `document` - The full document to store
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn upsert_roster_document(
    conn: &mut _,
    document: &RosterDocument,
) -> Result<(), PersistenceError> {
    let json: String = serde_json::to_string(document)?;
    let created_at: &str = document.created_at.as_deref().unwrap_or_default();
    let updated_at: &str = document.updated_at.as_deref().unwrap_or_default();

    let rows_updated: usize = diesel::update(
        roster_documents::table
            .filter(roster_documents::department.eq(&document.department))
            .filter(roster_documents::event_id.eq(&document.event_id)),
    )
    .set((
        roster_documents::event_code.eq(document.event_code.as_deref()),
        roster_documents::status.eq(document.status.as_str()),
        roster_documents::document_json.eq(&json),
        roster_documents::updated_at.eq(updated_at),
    ))
    .execute(conn)?;

    if rows_updated == 0 {
        diesel::insert_into(roster_documents::table)
            .values((
                roster_documents::department.eq(&document.department),
                roster_documents::event_id.eq(&document.event_id),
                roster_documents::event_code.eq(document.event_code.as_deref()),
                roster_documents::status.eq(document.status.as_str()),
                roster_documents::document_json.eq(&json),
                roster_documents::created_at.eq(created_at),
                roster_documents::updated_at.eq(updated_at),
            ))
            .execute(conn)?;

        debug!(
            department = %document.department,
            event_id = %document.event_id,
            "Inserted roster document"
        );
    } else {
        debug!(
            department = %document.department,
            event_id = %document.event_id,
            "Updated roster document"
        );
    }

    Ok(())
}
}

/// Persists a roster transition (`SQLite` version).
///
/// Stores the new document state, then the audit event that produced it.
/// An idempotent re-confirm leaves the document untouched, so only the
/// audit event is stored for it.
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
/// Returns an error if persistence fails.
pub fn persist_roster_transition_sqlite(
    conn: &mut SqliteConnection,
    transition: &RosterTransition,
) -> Result<i64, PersistenceError> {
    if transition.already_confirmed {
        debug!(
            department = %transition.document.department,
            event_id = %transition.document.event_id,
            "Roster already confirmed; storing audit event only"
        );
    } else {
        upsert_roster_document_sqlite(conn, &transition.document)?;
    }

    let event_id: i64 = persist_audit_event_sqlite(conn, &transition.audit_event)?;
    info!(
        event_id,
        department = %transition.document.department,
        event = %transition.document.event_id,
        "Persisted roster transition"
    );

    Ok(event_id)
}

/// Persists a roster transition (`MySQL` version).
///
/// Stores the new document state, then the audit event that produced it.
/// An idempotent re-confirm leaves the document untouched, so only the
/// audit event is stored for it.
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
/// Returns an error if persistence fails.
pub fn persist_roster_transition_mysql(
    conn: &mut MysqlConnection,
    transition: &RosterTransition,
) -> Result<i64, PersistenceError> {
    if transition.already_confirmed {
        debug!(
            department = %transition.document.department,
            event_id = %transition.document.event_id,
            "Roster already confirmed; storing audit event only"
        );
    } else {
        upsert_roster_document_mysql(conn, &transition.document)?;
    }

    let event_id: i64 = persist_audit_event_mysql(conn, &transition.audit_event)?;
    info!(
        event_id,
        department = %transition.document.department,
        event = %transition.document.event_id,
        "Persisted roster transition"
    );

    Ok(event_id)
}
