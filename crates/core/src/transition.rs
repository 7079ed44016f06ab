// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewdesk_audit::AuditEvent;
use crewdesk_domain::{AssignmentLedgerEntry, RosterDocument};

/// The result of a successful roster operation.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects. The caller persists the document and the
/// audit event together.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterTransition {
    /// The roster document after the operation.
    pub document: RosterDocument,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
    /// Set when a confirm found the roster already confirmed and
    /// left the confirmation stamps untouched.
    pub already_confirmed: bool,
}

/// The result of a successful ledger operation.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTransition {
    /// The ledger entry after the operation.
    pub entry: AssignmentLedgerEntry,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
    /// Set when the entry already held the requested status and
    /// nothing was changed.
    pub already_applied: bool,
}
