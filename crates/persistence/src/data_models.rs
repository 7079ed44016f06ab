// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crewdesk_audit::AuditEvent;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
    pub display_name: Option<String>,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// An operator account as stored in the database.
///
/// `password_hash` is the bcrypt hash, never the plain password. Callers
/// that expose operators over the wire must strip it first.
#[derive(Debug, Clone)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub department: Option<String>,
    pub is_disabled: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A login session as stored in the database.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

/// An event-record row, the lookup table behind business event codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: String,
    pub code: String,
    pub name: String,
    pub destination_address: Option<String>,
    pub created_at: Option<String>,
}

/// An audit event as read back from the database, paired with the
/// identifier and timestamp the database assigned on insert.
#[derive(Debug, Clone)]
pub struct StoredAuditEvent {
    pub event_id: i64,
    pub created_at: Option<String>,
    pub event: AuditEvent,
}
