// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event record queries.
//!
//! The events table is a read-mostly lookup behind business event codes;
//! roster confirmation copies the code onto the document from here.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::EventRecord;
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: String,
    code: String,
    name: String,
    destination_address: Option<String>,
    created_at: Option<String>,
}

backend_fn! {
/// Retrieves an event record by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event identifier
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the event is not found.
pub fn get_event(
    conn: &mut _,
    event_id: &str,
) -> Result<Option<EventRecord>, PersistenceError> {
    debug!(event_id, "Looking up event record");

    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EventRecord {
            event_id: row.event_id,
            code: row.code,
            name: row.name,
            destination_address: row.destination_address,
            created_at: row.created_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
