// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Most mutations use Diesel DSL and are backend-agnostic, with
//! minimal use of backend-specific helpers (e.g., `last_insert_rowid()`
//! for `SQLite`).
//!
//! ## Module Organization
//!
//! - `audit` — Audit event persistence
//! - `events` — Event record seeding
//! - `ledger` — Ledger inserts and revision-guarded status writes
//! - `operators` — Operator and session mutations
//! - `rosters` — Roster document upserts and transition persistence
//!
//! ## Backend-Specific Code
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are imported
//! from the `backend` module. All other code uses Diesel DSL exclusively.

pub mod audit;
pub mod events;
pub mod ledger;
pub mod operators;
pub mod rosters;

// Re-export backend-specific mutation functions used by lib.rs
pub use audit::{persist_audit_event_mysql, persist_audit_event_sqlite};
pub use events::{create_event_mysql, create_event_sqlite};
pub use ledger::{
    insert_ledger_entry_mysql, insert_ledger_entry_sqlite, persist_ledger_transition_mysql,
    persist_ledger_transition_sqlite, update_ledger_entry_guarded_mysql,
    update_ledger_entry_guarded_sqlite,
};
pub use operators::{
    create_operator_mysql, create_operator_sqlite, create_session_mysql, create_session_sqlite,
    delete_expired_sessions_mysql, delete_expired_sessions_sqlite, delete_session_mysql,
    delete_session_sqlite, set_operator_disabled_mysql, set_operator_disabled_sqlite,
    update_last_login_mysql, update_last_login_sqlite,
};
pub use rosters::{
    persist_roster_transition_mysql, persist_roster_transition_sqlite,
    upsert_roster_document_mysql, upsert_roster_document_sqlite,
};
