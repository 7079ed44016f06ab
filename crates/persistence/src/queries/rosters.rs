// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster document queries.
//!
//! Documents are stored whole as JSON, with the scoping columns
//! (`department`, `event_id`, `event_code`, `status`) denormalized for
//! lookup, so every read is a fetch-and-deserialize. All queries use
//! Diesel DSL and work across all supported database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crewdesk_domain::RosterDocument;

use crate::diesel_schema::roster_documents;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves the roster document for a `(department, event)` scope.
///
/// `department` must already be in canonical folded form; the store never
/// folds on the way in or out.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `department` - The canonical department key
/// * `event_id` - The event identifier
///
/// # Errors
///
/// Returns an error if the database query fails or the stored JSON does
/// not deserialize. Returns `Ok(None)` if no document exists.
pub fn get_roster_document(
    conn: &mut _,
    department: &str,
    event_id: &str,
) -> Result<Option<RosterDocument>, PersistenceError> {
    debug!(department, event_id, "Looking up roster document");

    let result: Result<String, diesel::result::Error> = roster_documents::table
        .filter(roster_documents::department.eq(department))
        .filter(roster_documents::event_id.eq(event_id))
        .select(roster_documents::document_json)
        .first(conn);

    match result {
        Ok(json) => {
            let document: RosterDocument = serde_json::from_str(&json)?;
            Ok(Some(document))
        }
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists roster documents, optionally scoped to one department.
///
/// Results are ordered by department key, then event id, so calendar
/// views render deterministically.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `department` - Optional canonical department key filter
///
/// # Errors
///
/// Returns an error if the database query fails or a stored document
/// does not deserialize.
pub fn list_roster_documents(
    conn: &mut _,
    department: Option<&str>,
) -> Result<Vec<RosterDocument>, PersistenceError> {
    debug!(?department, "Listing roster documents");

    let rows: Vec<String> = match department {
        Some(dept) => roster_documents::table
            .filter(roster_documents::department.eq(dept))
            .order_by(roster_documents::event_id.asc())
            .select(roster_documents::document_json)
            .load(conn)?,
        None => roster_documents::table
            .order_by((
                roster_documents::department.asc(),
                roster_documents::event_id.asc(),
            ))
            .select(roster_documents::document_json)
            .load(conn)?,
    };

    let documents: Result<Vec<RosterDocument>, PersistenceError> = rows
        .iter()
        .map(|json| serde_json::from_str(json).map_err(PersistenceError::from))
        .collect();

    documents
}
}

backend_fn! {
/// Finds the roster document carrying a business event code.
///
/// Legacy row saves address rosters by `(department, event_code)` rather
/// than by event id. When several documents share the code, the one with
/// the lowest event id wins, matching the original first-match behavior.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `department` - The canonical department key
/// * `event_code` - The business event code
///
/// # Errors
///
/// Returns an error if the database query fails or the stored JSON does
/// not deserialize. Returns `Ok(None)` if no document carries the code.
pub fn find_roster_by_event_code(
    conn: &mut _,
    department: &str,
    event_code: &str,
) -> Result<Option<RosterDocument>, PersistenceError> {
    debug!(department, event_code, "Resolving roster by event code");

    let result: Result<String, diesel::result::Error> = roster_documents::table
        .filter(roster_documents::department.eq(department))
        .filter(roster_documents::event_code.eq(event_code))
        .order_by(roster_documents::event_id.asc())
        .select(roster_documents::document_json)
        .first(conn);

    match result {
        Ok(json) => {
            let document: RosterDocument = serde_json::from_str(&json)?;
            Ok(Some(document))
        }
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
