// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the crewdesk roster system.
//!
//! Everything above this crate speaks HTTP; everything below it speaks
//! domain types. Handlers live in [`handlers`], the wire contract in
//! [`request_response`], and authentication in [`auth`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod distance;
pub mod error;
pub mod handlers;
pub mod password_policy;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedActor, AuthenticationService, AuthorizationService, Role, SESSION_TTL_HOURS,
};
pub use distance::{DistanceProvider, RouteTable};
pub use error::{ApiError, AuthError, ConflictEvidence};
pub use handlers::{
    accept_assignment, close_roster, confirm_roster, create_assignment, create_event,
    create_operator, enrich_distance, get_audit_timeline, get_occupancy, get_roster,
    list_assignments, list_operators, list_rosters, login, logout, save_vehicle_row,
    unconfirm_roster, upsert_roster, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AcceptAssignmentRequest, AcceptAssignmentResponse, AuditEventInfo, AuditTimelineRequest,
    AuditTimelineResponse, CloseOutUpdateRequest, CloseRosterRequest, CloseRosterResponse,
    ConfirmRosterRequest, ConfirmRosterResponse, CreateAssignmentRequest, CreateAssignmentResponse,
    CreateEventRequest, CreateEventResponse, CreateOperatorRequest, CreateOperatorResponse,
    ListAssignmentsRequest, ListAssignmentsResponse, ListOperatorsResponse, ListRostersRequest,
    ListRostersResponse, LoginRequest, LoginResponse, LogoutResponse, OccupancyRecordInfo,
    OccupancyResponse, OperatorInfo, RosterSummary, SaveVehicleRowRequest, SaveVehicleRowResponse,
    UnconfirmRosterRequest, UnconfirmRosterResponse, UpsertRosterRequest, UpsertRosterResponse,
    WhoAmIResponse,
};
