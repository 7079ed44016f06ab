// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session mutations.
//!
//! This module contains backend-agnostic mutations for operator accounts
//! and login sessions. Password hashing happens here so plain passwords
//! never cross the persistence boundary outward.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new operator account.
///
/// The password is hashed with bcrypt before storage, and the login name
/// is normalized to uppercase so lookups are case-insensitive.
/// `is_disabled` and `created_at` come from the table defaults.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The login name (must be unique)
/// * `display_name` - The display name
/// * `password` - The plain-text password (will be hashed)
/// * `role` - The role tag, stored as given
/// * `department` - Optional home department for department-scoped roles
///
/// # Errors
///
/// Returns an error if the operator cannot be created or if the login name
/// already exists.
pub fn create_operator(
    conn: &mut _,
    login_name: &str,
    display_name: &str,
    password: &str,
    role: &str,
    department: Option<&str>,
) -> Result<i64, PersistenceError> {
    let normalized_login: String = login_name.to_uppercase();

    info!(
        "Creating operator with login_name: {}, display_name: {}, role: {}",
        normalized_login, display_name, role
    );

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(operators::table)
        .values((
            operators::login_name.eq(&normalized_login),
            operators::display_name.eq(display_name),
            operators::password_hash.eq(&password_hash),
            operators::role.eq(role),
            operators::department.eq(department),
        ))
        .execute(conn)?;

    let operator_id: i64 = conn.get_last_insert_rowid()?;

    info!(operator_id, "Operator created successfully");

    Ok(operator_id)
}
}

backend_fn! {
/// Updates the last login timestamp for an operator.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `operator_id` - The operator ID
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(conn: &mut _, operator_id: i64) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for operator ID: {}", operator_id);

    diesel::update(operators::table)
        .filter(operators::operator_id.eq(operator_id))
        .set(operators::last_login_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Sets the disabled flag on an operator account.
///
/// Disabling keeps the row and any open sessions; the authentication
/// layer rejects disabled operators at login and session validation.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `operator_id` - The operator ID
/// * `disabled` - The new flag value
///
/// # Errors
///
/// Returns `OperatorNotFound` if no operator has this id, or an error
/// if the database update fails.
pub fn set_operator_disabled(
    conn: &mut _,
    operator_id: i64,
    disabled: bool,
) -> Result<(), PersistenceError> {
    info!(operator_id, disabled, "Setting operator disabled flag");

    let rows_affected: usize = diesel::update(operators::table)
        .filter(operators::operator_id.eq(operator_id))
        .set(operators::is_disabled.eq(i32::from(disabled)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::OperatorNotFound(operator_id.to_string()));
    }

    Ok(())
}
}

backend_fn! {
/// Creates a new session for an operator.
///
/// The token is generated by the caller; `created_at` comes from the
/// table default.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `operator_id` - The operator ID
/// * `expires_at` - The expiration timestamp
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    operator_id: i64,
    expires_at: &str,
) -> Result<(), PersistenceError> {
    debug!(
        "Creating session for operator ID: {} with expiration: {}",
        operator_id, expires_at
    );

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::operator_id.eq(operator_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    debug!(operator_id, "Session created");
    Ok(())
}
}

backend_fn! {
/// Deletes a session by token.
///
/// This is used for logout operations. Deleting a token that does not
/// exist is not an error, which makes logout idempotent.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token to delete
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes all expired sessions.
///
/// This is a cleanup operation that should be run periodically.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut _) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(
            sessions::expires_at.lt(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        )
        .execute(conn)?;

    if rows_affected > 0 {
        info!("Deleted {} expired sessions", rows_affected);
    }

    Ok(rows_affected)
}
}
