// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit` — Audit event and timeline queries
//! - `events` — Event record lookups
//! - `ledger` — Assignment ledger reads and report filters
//! - `operators` — Operator and session queries
//! - `rosters` — Roster document reads
//!
//! ## Backend-Specific Functions
//!
//! All query functions are generated in backend-specific monomorphic versions:
//! - Functions suffixed with `_sqlite` for `SQLite`
//! - Functions suffixed with `_mysql` for `MySQL`/`MariaDB`
//!
//! The `Persistence` adapter in `lib.rs` dispatches to the appropriate version
//! based on the active backend connection.

pub mod audit;
pub mod events;
pub mod ledger;
pub mod operators;
pub mod rosters;

// Re-export the bcrypt helper (not backend-specific)
pub use operators::verify_password;

// Re-export backend-specific query functions used by lib.rs
pub use audit::{
    get_audit_event_mysql, get_audit_event_sqlite, get_audit_timeline_mysql,
    get_audit_timeline_sqlite,
};
pub use events::{get_event_mysql, get_event_sqlite};
pub use ledger::{
    get_ledger_entry_mysql, get_ledger_entry_sqlite, list_all_ledger_entries_mysql,
    list_all_ledger_entries_sqlite, list_ledger_entries_mysql, list_ledger_entries_sqlite,
};
pub use operators::{
    count_operators_mysql, count_operators_sqlite, get_operator_by_id_mysql,
    get_operator_by_id_sqlite, get_operator_by_login_mysql, get_operator_by_login_sqlite,
    get_session_by_token_mysql, get_session_by_token_sqlite, list_operators_mysql,
    list_operators_sqlite,
};
pub use rosters::{
    find_roster_by_event_code_mysql, find_roster_by_event_code_sqlite, get_roster_document_mysql,
    get_roster_document_sqlite, list_roster_documents_mysql, list_roster_documents_sqlite,
};
