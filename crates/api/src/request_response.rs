// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use crewdesk_domain::{AssignmentLedgerEntry, RosterLine};

/// API request to replace a department's roster lines for an event.
///
/// This is a whole-document write: the four role buckets are rebuilt
/// from `lines` and any line omitted here is dropped from the stored
/// roster.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpsertRosterRequest {
    /// The department whose roster is written.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
    /// The full set of roster lines, across all roles.
    pub lines: Vec<RosterLine>,
    /// Denormalized event code, if the client knows it.
    #[serde(default)]
    pub event_code: Option<String>,
    /// Denormalized event name, if the client knows it.
    #[serde(default)]
    pub event_name: Option<String>,
    /// Destination address, input to distance enrichment.
    #[serde(default)]
    pub destination_address: Option<String>,
}

/// API response for a successful roster upsert.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpsertRosterResponse {
    /// Canonical department key.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
    /// Lifecycle status after the write.
    pub status: String,
    /// Number of responsible lines.
    pub responsible_count: u32,
    /// Number of driver lines.
    pub driver_count: u32,
    /// Number of worker lines.
    pub worker_count: u32,
    /// Total people across temp-crew blocks.
    pub temp_crew_headcount: u32,
    /// The audit event recorded for this write.
    pub audit_event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to confirm a department's roster for an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConfirmRosterRequest {
    /// The department whose roster is confirmed.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
}

/// API response for a roster confirmation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConfirmRosterResponse {
    /// Canonical department key.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
    /// Lifecycle status after the call.
    pub status: String,
    /// Whether the roster was already confirmed and the call changed nothing.
    pub already_confirmed: bool,
    /// When the roster was confirmed, RFC 3339.
    pub confirmed_at: Option<String>,
    /// The audit event recorded for this call.
    pub audit_event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to revert a confirmed roster to draft.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnconfirmRosterRequest {
    /// The department whose roster is reverted.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
}

/// API response for a roster reversion to draft.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnconfirmRosterResponse {
    /// Canonical department key.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
    /// Lifecycle status after the call, always draft.
    pub status: String,
    /// The audit event recorded for this call.
    pub audit_event_id: i64,
    /// A success message.
    pub message: String,
}

/// One close-out correction for a named person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CloseOutUpdateRequest {
    /// The person the correction applies to, matched by folded name.
    pub person_name: String,
    /// The time the person actually finished, `HH:MM`.
    #[serde(default)]
    pub actual_end_time: Option<String>,
    /// The person did not show up.
    #[serde(default)]
    pub no_show: bool,
    /// The person left before the planned end.
    #[serde(default)]
    pub left_early: bool,
    /// Free-text close-out notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request to record end-of-day corrections on a roster.
///
/// Close-out never touches the roster lifecycle status: a confirmed
/// roster stays confirmed while its lines gain correction fields.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CloseRosterRequest {
    /// The department whose roster is closed out.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
    /// Per-person corrections to apply.
    pub updates: Vec<CloseOutUpdateRequest>,
    /// Whether to stamp the department as closed for this event.
    #[serde(default)]
    pub close_department: bool,
}

/// API response for a roster close-out.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CloseRosterResponse {
    /// Canonical department key.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
    /// Number of corrections that matched a roster line.
    pub updated: u32,
    /// Person names that matched no roster line.
    pub unmatched: Vec<String>,
    /// Whether the department close-out stamp was written.
    pub closed: bool,
    /// The audit event recorded for this call.
    pub audit_event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to list stored rosters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListRostersRequest {
    /// Restrict to this department, or all departments when absent.
    #[serde(default)]
    pub department: Option<String>,
}

/// Summary of one stored roster.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RosterSummary {
    /// Canonical department key.
    pub department: String,
    /// The event the roster staffs.
    pub event_id: String,
    /// Denormalized event code.
    pub event_code: Option<String>,
    /// Denormalized event name.
    pub event_name: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Number of responsible lines.
    pub responsible_count: u32,
    /// Number of driver lines.
    pub driver_count: u32,
    /// Number of worker lines.
    pub worker_count: u32,
    /// Total people across temp-crew blocks.
    pub temp_crew_headcount: u32,
    /// Last write time, RFC 3339.
    pub updated_at: Option<String>,
}

/// API response listing stored rosters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListRostersResponse {
    /// The stored rosters, summarized.
    pub rosters: Vec<RosterSummary>,
}

/// One committed interval in a vehicle's occupancy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OccupancyRecordInfo {
    /// Which booking source holds the commitment (`roster` or `ledger`).
    pub source: String,
    /// The originating record: a roster line reference or a ledger entry id.
    pub reference: String,
    /// The department owning the roster, for roster-sourced records.
    pub department: Option<String>,
    /// The event the commitment belongs to, when known.
    pub event_ref: Option<String>,
    /// Start of the committed interval, `YYYY-MM-DDTHH:MM`.
    pub interval_start: String,
    /// End of the committed interval, `YYYY-MM-DDTHH:MM`.
    pub interval_end: String,
    /// Lifecycle status of the commitment.
    pub status: String,
}

/// API response describing a vehicle's current occupancy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OccupancyResponse {
    /// The vehicle plate, canonical form.
    pub plate: String,
    /// Committed intervals, ordered by start.
    pub records: Vec<OccupancyRecordInfo>,
}

/// API request to book a vehicle through the assignment ledger.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateAssignmentRequest {
    /// The vehicle plate to book.
    pub plate_number: String,
    /// Vehicle category, free text.
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// The person who will drive, when known.
    #[serde(default)]
    pub driver_name: Option<String>,
    /// The department requesting the booking.
    #[serde(default)]
    pub department: Option<String>,
    /// Booking start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Booking start time, `HH:MM`.
    pub start_time: String,
    /// Booking end date, `YYYY-MM-DD`.
    pub end_date: String,
    /// Booking end time, `HH:MM`.
    pub end_time: String,
    /// The event this booking serves, when known.
    #[serde(default)]
    pub event_code: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// API response for a successful booking request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateAssignmentResponse {
    /// The generated ledger entry id.
    pub entry_id: String,
    /// The booked plate, canonical form.
    pub plate_number: String,
    /// Lifecycle status, always pending on creation.
    pub status: String,
    /// Booking start date.
    pub start_date: String,
    /// Booking start time.
    pub start_time: String,
    /// Booking end date.
    pub end_date: String,
    /// Booking end time.
    pub end_time: String,
    /// The audit event recorded for this booking.
    pub audit_event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to move a ledger entry to a new lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcceptAssignmentRequest {
    /// The ledger entry to update.
    pub entry_id: String,
    /// The requested status: `confirmed`, `addedToTorns`, or `cancelled`.
    pub target_status: String,
}

/// API response for a ledger status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcceptAssignmentResponse {
    /// The ledger entry id.
    pub entry_id: String,
    /// Lifecycle status after the call.
    pub status: String,
    /// Whether the entry already held this status and nothing changed.
    pub already_applied: bool,
    /// When the entry was confirmed, RFC 3339.
    pub confirmed_at: Option<String>,
    /// Revision after the call.
    pub revision: i64,
    /// The audit event recorded for this call.
    pub audit_event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to list assignment ledger entries.
///
/// All filters are optional; cancelled entries are excluded unless
/// asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ListAssignmentsRequest {
    /// Restrict to this plate, compared normalized.
    #[serde(default)]
    pub plate: Option<String>,
    /// Keep entries starting on or after this date, `YYYY-MM-DD`.
    #[serde(default)]
    pub from: Option<String>,
    /// Keep entries starting on or before this date, `YYYY-MM-DD`.
    #[serde(default)]
    pub to: Option<String>,
    /// Whether cancelled entries are included.
    #[serde(default)]
    pub include_cancelled: bool,
}

/// API response listing assignment ledger entries.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListAssignmentsResponse {
    /// The matching entries, ordered by start date then start time.
    pub entries: Vec<AssignmentLedgerEntry>,
}

/// API request to save one vehicle row on a department's roster.
///
/// The roster is addressed by event code rather than event id; this is
/// the entry point used by the vehicle planning grid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveVehicleRowRequest {
    /// The event code addressing the roster.
    pub event_code: String,
    /// The department whose roster holds the row.
    pub department: String,
    /// The row to update, when the client knows its id.
    #[serde(default)]
    pub row_id: Option<String>,
    /// The plate the row held before this save, for plate changes.
    #[serde(default)]
    pub previous_plate: Option<String>,
    /// Zero-based position of the row in the grid, the last-resort match.
    #[serde(default)]
    pub row_index: Option<usize>,
    /// Identifier of the assigned driver, when known.
    #[serde(default)]
    pub person_id: Option<String>,
    /// Denormalized driver name.
    #[serde(default)]
    pub person_name: Option<String>,
    /// Where the driver reports before the event.
    #[serde(default)]
    pub meeting_point: Option<String>,
    /// Shift start date, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Shift start time, `HH:MM`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Shift end date.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Shift end time.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Vehicle category, free text.
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// The vehicle plate. Required; a row without a plate is not saved.
    pub plate_number: String,
    /// Time the vehicle must arrive at the venue.
    #[serde(default)]
    pub arrival_time: Option<String>,
}

/// API response for a vehicle row save.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveVehicleRowResponse {
    /// Canonical department key.
    pub department: String,
    /// The event id the roster staffs.
    pub event_id: String,
    /// The id of the written row, generated when the row was appended.
    pub row_id: String,
    /// The saved plate, as stored on the row.
    pub plate_number: String,
    /// The audit event recorded for this save.
    pub audit_event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to register an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateEventRequest {
    /// The unique event id.
    pub event_id: String,
    /// The short business code.
    pub code: String,
    /// The event name.
    pub name: String,
    /// The destination address, input to distance enrichment.
    #[serde(default)]
    pub destination_address: Option<String>,
}

/// API response for a successful event registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateEventResponse {
    /// The event id.
    pub event_id: String,
    /// The short business code.
    pub code: String,
    /// The event name.
    pub name: String,
    /// A success message.
    pub message: String,
}

/// API request to log in as an operator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The operator login name.
    pub login_name: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The session token (opaque).
    pub session_token: String,
    /// The operator's login name.
    pub login_name: String,
    /// The operator's display name.
    pub display_name: String,
    /// The operator's role, canonical form.
    pub role: String,
    /// The operator's department, if role-scoped.
    pub department: Option<String>,
    /// When the session expires, `YYYY-MM-DD HH:MM:SS` UTC.
    pub expires_at: String,
}

/// API response for a logout.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogoutResponse {
    /// Confirmation message.
    pub message: String,
}

/// API response describing the current session's operator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The operator's login name.
    pub login_name: String,
    /// The operator's display name.
    pub display_name: String,
    /// The operator's role, canonical form.
    pub role: String,
    /// The operator's department, if role-scoped.
    pub department: Option<String>,
    /// Whether the operator is disabled.
    pub is_disabled: bool,
}

/// API request to create an operator account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateOperatorRequest {
    /// The operator login name.
    pub login_name: String,
    /// The operator's display name.
    pub display_name: String,
    /// The initial plain-text password.
    pub password: String,
    /// The role, in canonical or legacy spelling.
    pub role: String,
    /// The operator's department, required for department-scoped roles.
    #[serde(default)]
    pub department: Option<String>,
}

/// API response for a successful operator creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateOperatorResponse {
    /// The assigned operator id.
    pub operator_id: i64,
    /// The operator's login name.
    pub login_name: String,
    /// The stored role, canonical form.
    pub role: String,
    /// A success message.
    pub message: String,
}

/// One operator account, without credential material.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperatorInfo {
    /// The operator id.
    pub operator_id: i64,
    /// The operator's login name.
    pub login_name: String,
    /// The operator's display name.
    pub display_name: String,
    /// The operator's role as stored.
    pub role: String,
    /// The operator's department, if role-scoped.
    pub department: Option<String>,
    /// Whether the operator is disabled.
    pub is_disabled: bool,
    /// When the account was created.
    pub created_at: String,
    /// When the operator last logged in.
    pub last_login_at: Option<String>,
}

/// API response listing operator accounts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListOperatorsResponse {
    /// The operators, ordered by login name.
    pub operators: Vec<OperatorInfo>,
}

/// API request to read the audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineRequest {
    /// Restrict to this department's events.
    #[serde(default)]
    pub department: Option<String>,
    /// Restrict to this event reference.
    #[serde(default)]
    pub event_ref: Option<String>,
}

/// One recorded audit event, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The stored event id.
    pub audit_event_id: i64,
    /// When the event was recorded.
    pub created_at: Option<String>,
    /// Who performed the action.
    pub actor_id: String,
    /// The actor's role at the time.
    pub actor_type: String,
    /// The actor's display name, when recorded.
    pub actor_display_name: Option<String>,
    /// The action performed.
    pub action: String,
    /// Action detail, when recorded.
    pub details: Option<String>,
    /// Why the action was performed.
    pub cause: String,
    /// The department the action touched, when scoped.
    pub department: Option<String>,
    /// The event the action touched, when scoped.
    pub event_ref: Option<String>,
}

/// API response carrying the ordered audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineResponse {
    /// The recorded events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
