// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event record mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::diesel_schema::events;
use crate::error::PersistenceError;

backend_fn! {
/// Creates an event record.
///
/// `created_at` is assigned by the database.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event identifier
/// * `code` - The business event code
/// * `name` - The event display name
/// * `destination_address` - Optional venue address used for distance enrichment
///
/// # Errors
///
/// Returns an error if the insert fails, including when the event id
/// already exists.
pub fn create_event(
    conn: &mut _,
    event_id: &str,
    code: &str,
    name: &str,
    destination_address: Option<&str>,
) -> Result<(), PersistenceError> {
    info!(event_id, code, "Creating event record");

    diesel::insert_into(events::table)
        .values((
            events::event_id.eq(event_id),
            events::code.eq(code),
            events::name.eq(name),
            events::destination_address.eq(destination_address),
        ))
        .execute(conn)?;

    Ok(())
}
}
