// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for authenticated endpoints.
//!
//! This module provides the Axum extractor that turns a bearer token
//! into an authenticated operator context at the server boundary.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use crewdesk_api::{AuthenticatedActor, AuthenticationService};
use crewdesk_persistence::OperatorData;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for authenticated operators.
///
/// This extractor validates the session token from the Authorization
/// header and returns the authenticated operator context. Handlers that
/// take a `SessionOperator` never run for unauthenticated requests.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionOperator(actor, operator): SessionOperator,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     // operator: OperatorData
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if:
/// - Authorization header is missing
/// - Authorization header format is invalid
/// - Session token is unknown or expired
/// - Operator is disabled
pub struct SessionOperator(pub AuthenticatedActor, pub OperatorData);

impl FromRequestParts<AppState> for SessionOperator {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let (actor, operator) = AuthenticationService::validate_session(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;
        drop(persistence);

        debug!(
            login_name = %operator.login_name,
            role = ?actor.role,
            "Session validated"
        );

        Ok(Self(actor, operator))
    }
}

/// Session extraction failures, rendered as HTTP 401 responses.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => {
                String::from("Invalid Authorization header format. Expected: 'Bearer <token>'")
            }
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: true,
                message,
                conflict: None,
            }),
        )
            .into_response()
    }
}
