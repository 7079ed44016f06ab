// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use chrono::{Duration, NaiveDateTime, Utc};
use crewdesk_audit::Actor;
use crewdesk_domain::{Department, fold_key};
use crewdesk_persistence::{OperatorData, SessionData, SqlitePersistence};

use crate::error::{ApiError, AuthError, translate_persistence_error};

/// How long a session stays valid after login.
pub const SESSION_TTL_HOURS: i64 = 8;

/// Timestamp format used for session expiry stamps, UTC.
const SESSION_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Operator roles for authorization.
///
/// Roles determine which roster and booking actions an authenticated
/// operator may perform. Legacy operator records carry the role under
/// several historical spellings; [`Role::parse`] folds all of them onto
/// this closed set and maps anything unrecognized to [`Role::Unknown`]
/// rather than rejecting the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full structural and corrective authority over every department.
    Admin,
    /// Company direction: same reach as admin for roster and booking
    /// operations, but may not create operators.
    Direction,
    /// Head of a department. Writes rosters for their own department and
    /// may close out the working day for any department.
    DepartmentHead,
    /// Department staff. Writes rosters for their own department only.
    Worker,
    /// Commercial staff: read access only, no roster writes.
    Commercial,
    /// Role string not in the closed set. Kept rather than rejected so
    /// legacy operators can still sign in; grants almost nothing.
    Unknown,
}

impl Role {
    /// Parses a stored role string, tolerating legacy spellings.
    ///
    /// Matching is diacritic- and case-insensitive, so `"Direcció"`,
    /// `"direccion"` and `"direction"` all map to [`Role::Direction`].
    /// Unrecognized strings fold to [`Role::Unknown`]; this never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match fold_key(raw).as_str() {
            "admin" => Self::Admin,
            "direction" | "direccio" | "direccion" => Self::Direction,
            "department-head" | "cap" | "cap departament" | "capdepartament" => {
                Self::DepartmentHead
            }
            "worker" | "treballador" => Self::Worker,
            "commercial" | "comercial" => Self::Commercial,
            _ => Self::Unknown,
        }
    }

    /// Returns the canonical string form stored for new operators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Direction => "direction",
            Self::DepartmentHead => "department-head",
            Self::Worker => "worker",
            Self::Commercial => "commercial",
            Self::Unknown => "unknown",
        }
    }
}

/// An authenticated operator with an associated role and department scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The operator's login name, used as the audit actor id.
    pub id: String,
    /// Human-readable name recorded on audit events.
    pub display_name: String,
    /// The role assigned to this operator.
    pub role: Role,
    /// The department this operator belongs to, if role-scoped.
    pub department: Option<String>,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
        department: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role,
            department,
        }
    }

    /// Builds an actor from a stored operator record.
    #[must_use]
    pub fn from_operator(operator: &OperatorData) -> Self {
        Self {
            id: operator.login_name.clone(),
            display_name: operator.display_name.clone(),
            role: Role::parse(&operator.role),
            department: operator.department.clone(),
        }
    }

    /// Whether this operator's own department matches the given one,
    /// compared under key folding.
    #[must_use]
    pub fn is_own_department(&self, department: &Department) -> bool {
        self.department
            .as_deref()
            .is_some_and(|own| fold_key(own) == department.key())
    }

    /// Converts to an audit actor for event recording.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(
            self.id.clone(),
            self.role.as_str().to_string(),
            Some(self.display_name.clone()),
        )
    }
}

/// Authorization service enforcing role requirements.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Authorizes a roster write (upsert, confirm, vehicle row save).
    ///
    /// Admin and direction may write any department's roster. Department
    /// heads and workers may write their own department only.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor's role does not
    /// permit the write.
    pub fn authorize_roster_write(
        actor: &AuthenticatedActor,
        department: &Department,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Direction => Ok(()),
            Role::DepartmentHead | Role::Worker => {
                if actor.is_own_department(department) {
                    Ok(())
                } else {
                    Err(AuthError::Unauthorized {
                        action: action.to_string(),
                        required_role: format!(
                            "admin, direction, or a {} role scoped to '{}'",
                            actor.role.as_str(),
                            department.key()
                        ),
                    })
                }
            }
            Role::Commercial | Role::Unknown => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("admin, direction, department-head, or worker"),
            }),
        }
    }

    /// Authorizes reverting a confirmed roster to draft.
    ///
    /// Same rules as [`Self::authorize_roster_write`], except an operator
    /// whose role is unrecognized may still unconfirm their own
    /// department's roster. Legacy operator records predate the closed
    /// role set and unconfirm is the correction path they most need.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor may not unconfirm
    /// this department's roster.
    pub fn authorize_unconfirm(
        actor: &AuthenticatedActor,
        department: &Department,
    ) -> Result<(), AuthError> {
        match Self::authorize_roster_write(actor, department, "unconfirm roster") {
            Ok(()) => Ok(()),
            Err(err) => {
                if actor.role == Role::Unknown && actor.is_own_department(department) {
                    Ok(())
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Authorizes closing out a department's working day.
    ///
    /// A department head may close any department, not only their own;
    /// on event days heads routinely sign off each other's crews.
    /// Workers may close their own department only.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor may not close
    /// this department's roster.
    pub fn authorize_close(
        actor: &AuthenticatedActor,
        department: &Department,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Direction | Role::DepartmentHead => Ok(()),
            Role::Worker => {
                if actor.is_own_department(department) {
                    Ok(())
                } else {
                    Err(AuthError::Unauthorized {
                        action: String::from("close roster"),
                        required_role: format!(
                            "admin, direction, department-head, or a worker in '{}'",
                            department.key()
                        ),
                    })
                }
            }
            Role::Commercial | Role::Unknown => Err(AuthError::Unauthorized {
                action: String::from("close roster"),
                required_role: String::from("admin, direction, department-head, or worker"),
            }),
        }
    }

    /// Authorizes writing to the assignment ledger.
    ///
    /// Bookings are company-wide rather than department-scoped, so any
    /// staff role may raise or accept them. Commercial and unrecognized
    /// roles may not.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor's role does not
    /// permit ledger writes.
    pub fn authorize_ledger_write(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Direction | Role::DepartmentHead | Role::Worker => Ok(()),
            Role::Commercial | Role::Unknown => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("admin, direction, department-head, or worker"),
            }),
        }
    }

    /// Authorizes creating an operator account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor is not an admin.
    pub fn authorize_create_operator(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("create operator"),
                required_role: String::from("admin"),
            })
        }
    }

    /// Authorizes creating an event record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor is neither admin
    /// nor direction.
    pub fn authorize_event_create(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Direction => Ok(()),
            _ => Err(AuthError::Unauthorized {
                action: String::from("create event"),
                required_role: String::from("admin or direction"),
            }),
        }
    }
}

/// Authentication service handling login, session validation, and logout.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates an operator and opens a session.
    ///
    /// Unknown login names and wrong passwords produce the same error
    /// message so the response does not reveal which accounts exist.
    /// An unrecognized role string does not block login.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the credentials are
    /// wrong or the operator is disabled, or an internal error if the
    /// session cannot be stored.
    pub fn login(
        persistence: &mut SqlitePersistence,
        login_name: &str,
        password: &str,
    ) -> Result<(OperatorData, SessionData), ApiError> {
        let Some(operator) = persistence
            .get_operator_by_login(login_name)
            .map_err(translate_persistence_error)?
        else {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Invalid login name or password"),
            });
        };

        if operator.is_disabled {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let password_ok = persistence
            .verify_password(password, &operator.password_hash)
            .map_err(translate_persistence_error)?;
        if !password_ok {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Invalid login name or password"),
            });
        }

        let session_token = generate_session_token();
        let expires_at = (Utc::now() + Duration::hours(SESSION_TTL_HOURS))
            .format(SESSION_STAMP_FORMAT)
            .to_string();
        persistence
            .create_session(&session_token, operator.operator_id, &expires_at)
            .map_err(translate_persistence_error)?;
        persistence
            .update_last_login(operator.operator_id)
            .map_err(translate_persistence_error)?;

        let session = persistence
            .get_session_by_token(&session_token)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::Internal {
                message: String::from("Session was not persisted"),
            })?;

        Ok((operator, session))
    }

    /// Validates a session token and resolves the operator behind it.
    ///
    /// Expired sessions are deleted when encountered.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the token is unknown,
    /// the session has expired, or the operator is gone or disabled.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, OperatorData), ApiError> {
        let Some(session) = persistence
            .get_session_by_token(session_token)
            .map_err(translate_persistence_error)?
        else {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Session not found"),
            });
        };

        let expires_at = NaiveDateTime::parse_from_str(&session.expires_at, SESSION_STAMP_FORMAT)
            .map_err(|_| ApiError::AuthenticationFailed {
                reason: String::from("Session is not valid"),
            })?;
        if expires_at <= Utc::now().naive_utc() {
            if let Err(err) = persistence.delete_session(session_token) {
                tracing::warn!("Failed to delete expired session: {err}");
            }
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let Some(operator) = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(translate_persistence_error)?
        else {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Session operator no longer exists"),
            });
        };

        if operator.is_disabled {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let actor = AuthenticatedActor::from_operator(&operator);
        Ok((actor, operator))
    }

    /// Ends a session. Deleting an already-absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the session store cannot be reached.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), ApiError> {
        persistence
            .delete_session(session_token)
            .map_err(translate_persistence_error)
    }
}

/// Generates a session token from the current time and a random suffix.
fn generate_session_token() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    format!("session_{millis}_{}", rand::random::<u64>())
}
