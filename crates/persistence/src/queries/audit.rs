// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.
//!
//! This module contains backend-agnostic queries for retrieving audit
//! events and audit timelines. All queries use Diesel DSL and work across
//! all supported database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crewdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData, StoredAuditEvent};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventFullRow {
    event_id: i64,
    #[allow(dead_code)]
    actor_id: String,
    #[allow(dead_code)]
    actor_type: String,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    department: Option<String>,
    event_ref: Option<String>,
    created_at: Option<String>,
}

/// Rebuilds the domain event from its JSON columns.
fn event_from_row(row: AuditEventFullRow) -> Result<StoredAuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let event: AuditEvent = AuditEvent::new(
        Actor::new(
            actor_data.id,
            actor_data.actor_type,
            actor_data.display_name,
        ),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        row.department,
        row.event_ref,
    );

    Ok(StoredAuditEvent {
        event_id: row.event_id,
        created_at: row.created_at,
        event,
    })
}

backend_fn! {
/// Retrieves an audit event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID to retrieve
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut _,
    event_id: i64,
) -> Result<StoredAuditEvent, PersistenceError> {
    debug!(event_id, "Looking up audit event");

    let result = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventFullRow::as_select())
        .first::<AuditEventFullRow>(conn);

    let row: AuditEventFullRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::EventNotFound(event_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    event_from_row(row)
}
}

backend_fn! {
/// Retrieves the audit timeline for an optional `(department, event)` scope.
///
/// Both filters are optional; passing neither returns the global timeline.
/// Events are ordered by id ascending, which is insertion order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `department` - Optional canonical department key filter
/// * `event_ref` - Optional event id or business code filter
///
/// # Errors
///
/// Returns an error if the database query fails or a stored event cannot
/// be deserialized.
pub fn get_audit_timeline(
    conn: &mut _,
    department: Option<&str>,
    event_ref: Option<&str>,
) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
    debug!(?department, ?event_ref, "Loading audit timeline");

    let mut query = audit_events::table.into_boxed();

    if let Some(department) = department {
        query = query.filter(audit_events::department.eq(department));
    }
    if let Some(event_ref) = event_ref {
        query = query.filter(audit_events::event_ref.eq(event_ref));
    }

    let rows: Vec<AuditEventFullRow> = query
        .order_by(audit_events::event_id.asc())
        .select(AuditEventFullRow::as_select())
        .load(conn)?;

    rows.into_iter().map(event_from_row).collect()
}
}
