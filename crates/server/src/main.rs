// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use crewdesk_api::{
    AcceptAssignmentRequest, AcceptAssignmentResponse, ApiError, AuditTimelineRequest,
    AuditTimelineResponse, CloseRosterRequest, CloseRosterResponse, ConfirmRosterRequest,
    ConfirmRosterResponse, ConflictEvidence, CreateAssignmentRequest, CreateAssignmentResponse,
    CreateEventRequest, CreateEventResponse, CreateOperatorRequest, CreateOperatorResponse,
    ListAssignmentsRequest, ListAssignmentsResponse, ListOperatorsResponse, ListRostersRequest,
    ListRostersResponse, LoginRequest, LoginResponse, LogoutResponse, OccupancyResponse,
    RouteTable, SaveVehicleRowRequest, SaveVehicleRowResponse, UnconfirmRosterRequest,
    UnconfirmRosterResponse, UpsertRosterRequest, UpsertRosterResponse, WhoAmIResponse,
    accept_assignment, close_roster, confirm_roster, create_assignment, create_event,
    create_operator, enrich_distance, get_audit_timeline, get_occupancy, get_roster,
    list_assignments, list_operators, list_rosters, login, logout, save_vehicle_row,
    unconfirm_roster, upsert_roster, whoami,
};
use crewdesk_audit::Cause;
use crewdesk_domain::RosterDocument;
use crewdesk_persistence::{PersistenceError, SqlitePersistence};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

mod session;

use session::SessionOperator;

/// Crewdesk server - HTTP API for duty rosters and vehicle bookings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Path to the route table CSV. Without it, distance enrichment is disabled.
    #[arg(long)]
    route_table: Option<String>,

    /// Origin address the route table distances are measured from
    #[arg(long, default_value = "Mas Vinyoles")]
    origin: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the optional route table backing the
/// distance side effect.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for rosters, bookings, operators, and sessions.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Loaded route distances, when the server was started with a route table.
    route_table: Option<Arc<RouteTable>>,
}

/// Query parameters for listing rosters.
#[derive(Debug, Deserialize)]
struct ListRostersQuery {
    /// Restrict to this department.
    #[serde(default)]
    department: Option<String>,
}

/// Query parameters for listing assignment ledger entries.
#[derive(Debug, Deserialize)]
struct ListAssignmentsQuery {
    /// Restrict to this plate.
    #[serde(default)]
    plate: Option<String>,
    /// Keep entries starting on or after this date.
    #[serde(default)]
    from: Option<String>,
    /// Keep entries starting on or before this date.
    #[serde(default)]
    to: Option<String>,
    /// Whether cancelled entries are included.
    #[serde(default)]
    include_cancelled: bool,
}

/// Query parameters for the audit timeline endpoint.
#[derive(Debug, Deserialize)]
struct AuditTimelineQuery {
    /// Restrict to this department's events.
    #[serde(default)]
    department: Option<String>,
    /// Restrict to this event reference.
    #[serde(default)]
    event_ref: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// The colliding booking, present on 409 conflict responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conflict: Option<ConflictEvidence>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Conflict evidence carried on booking collisions.
    conflict: Option<ConflictEvidence>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            conflict: self.conflict,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message,
                conflict: None,
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message,
                conflict: None,
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                conflict: None,
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message,
                conflict: None,
            },
            ApiError::BookingConflict { conflict } => Self {
                status: StatusCode::CONFLICT,
                message,
                conflict: Some(conflict),
            },
            ApiError::ConcurrentUpdate { .. } => Self {
                status: StatusCode::CONFLICT,
                message,
                conflict: None,
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message,
                conflict: None,
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal API error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    conflict: None,
                }
            }
        }
    }
}

/// Monotonic suffix for request cause identifiers.
static CAUSE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Builds the audit cause recorded for one HTTP request.
fn request_cause(action: &str) -> Cause {
    let serial: u64 = CAUSE_COUNTER.fetch_add(1, Ordering::SeqCst);
    Cause::new(format!("http-{serial}"), format!("HTTP {action}"))
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, HttpError> {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing or malformed Authorization header"),
            conflict: None,
        })
}

/// Spawns the background distance enrichment for a saved roster.
///
/// Enrichment is best effort: failures are logged and never surface to
/// the caller that saved the roster.
fn spawn_distance_enrichment(app_state: &AppState, department: String, event_id: String) {
    let Some(route_table) = app_state.route_table.clone() else {
        return;
    };
    let persistence: Arc<Mutex<SqlitePersistence>> = Arc::clone(&app_state.persistence);

    tokio::spawn(async move {
        let mut persistence = persistence.lock().await;
        let result: Result<bool, ApiError> =
            enrich_distance(&mut persistence, route_table.as_ref(), &department, &event_id);
        drop(persistence);

        match result {
            Ok(true) => {
                info!(
                    department = %department,
                    event_id = %event_id,
                    "Distance enrichment applied"
                );
            }
            Ok(false) => {
                debug!(
                    department = %department,
                    event_id = %event_id,
                    "Distance enrichment skipped"
                );
            }
            Err(e) => {
                warn!(
                    error = %e,
                    department = %department,
                    event_id = %event_id,
                    "Distance enrichment failed"
                );
            }
        }
    });
}

/// Creates the bootstrap admin account when the operator table is empty.
///
/// The generated password is logged exactly once; the account is meant
/// to create the named operators and should be disabled afterwards.
fn bootstrap_admin(persistence: &mut SqlitePersistence) -> Result<(), PersistenceError> {
    if persistence.count_operators()? > 0 {
        return Ok(());
    }

    let password: String = format!(
        "{:016x}{:016x}",
        rand::random::<u64>(),
        rand::random::<u64>()
    );
    let operator_id: i64 =
        persistence.create_operator("admin", "Bootstrap Admin", &password, "admin", None)?;

    warn!(
        operator_id = operator_id,
        "Created bootstrap admin operator 'ADMIN'; initial password: {password}"
    );

    Ok(())
}

/// Handler for POST `/login` endpoint.
///
/// The only endpoint that does not require a session token.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, HttpError> {
    info!("Handling logout request");

    let token: &str = bearer_token(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LogoutResponse = logout(&mut persistence, token)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/whoami` endpoint.
#[allow(clippy::unused_async)]
async fn handle_whoami(SessionOperator(actor, operator): SessionOperator) -> Json<WhoAmIResponse> {
    Json(whoami(&actor, &operator))
}

/// Handler for POST `/rosters` endpoint.
///
/// Replaces a department's roster for an event and kicks off distance
/// enrichment in the background.
async fn handle_upsert_roster(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<UpsertRosterRequest>,
) -> Result<Json<UpsertRosterResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        department = %req.department,
        event_id = %req.event_id,
        "Handling upsert_roster request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: UpsertRosterResponse =
        upsert_roster(&mut persistence, req, &actor, request_cause("roster upsert"))?;
    drop(persistence);

    spawn_distance_enrichment(
        &app_state,
        response.department.clone(),
        response.event_id.clone(),
    );

    Ok(Json(response))
}

/// Handler for GET `/rosters` endpoint.
async fn handle_list_rosters(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(_actor, _operator): SessionOperator,
    Query(query): Query<ListRostersQuery>,
) -> Result<Json<ListRostersResponse>, HttpError> {
    info!(department = ?query.department, "Handling list_rosters request");

    let request: ListRostersRequest = ListRostersRequest {
        department: query.department,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListRostersResponse = list_rosters(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/rosters/{department}/{event_id}` endpoint.
async fn handle_get_roster(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(_actor, _operator): SessionOperator,
    Path((department, event_id)): Path<(String, String)>,
) -> Result<Json<RosterDocument>, HttpError> {
    info!(
        department = %department,
        event_id = %event_id,
        "Handling get_roster request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let document: RosterDocument = get_roster(&mut persistence, &department, &event_id)?;
    drop(persistence);

    Ok(Json(document))
}

/// Handler for POST `/rosters/confirm` endpoint.
async fn handle_confirm_roster(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<ConfirmRosterRequest>,
) -> Result<Json<ConfirmRosterResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        department = %req.department,
        event_id = %req.event_id,
        "Handling confirm_roster request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ConfirmRosterResponse = confirm_roster(
        &mut persistence,
        &req,
        &actor,
        request_cause("roster confirm"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/rosters/unconfirm` endpoint.
async fn handle_unconfirm_roster(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<UnconfirmRosterRequest>,
) -> Result<Json<UnconfirmRosterResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        department = %req.department,
        event_id = %req.event_id,
        "Handling unconfirm_roster request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: UnconfirmRosterResponse = unconfirm_roster(
        &mut persistence,
        &req,
        &actor,
        request_cause("roster unconfirm"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/rosters/close` endpoint.
async fn handle_close_roster(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<CloseRosterRequest>,
) -> Result<Json<CloseRosterResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        department = %req.department,
        event_id = %req.event_id,
        updates = req.updates.len(),
        "Handling close_roster request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CloseRosterResponse = close_roster(
        &mut persistence,
        &req,
        &actor,
        request_cause("roster close-out"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/rosters/vehicle-row` endpoint.
async fn handle_save_vehicle_row(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<SaveVehicleRowRequest>,
) -> Result<Json<SaveVehicleRowResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        department = %req.department,
        event_code = %req.event_code,
        plate = %req.plate_number,
        "Handling save_vehicle_row request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SaveVehicleRowResponse = save_vehicle_row(
        &mut persistence,
        req,
        &actor,
        request_cause("vehicle row save"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/occupancy/{plate}` endpoint.
async fn handle_get_occupancy(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(_actor, _operator): SessionOperator,
    Path(plate): Path<String>,
) -> Result<Json<OccupancyResponse>, HttpError> {
    info!(plate = %plate, "Handling get_occupancy request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OccupancyResponse = get_occupancy(&mut persistence, &plate)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments` endpoint.
async fn handle_create_assignment(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<Json<CreateAssignmentResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        plate = %req.plate_number,
        start_date = %req.start_date,
        "Handling create_assignment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateAssignmentResponse = create_assignment(
        &mut persistence,
        req,
        &actor,
        request_cause("booking create"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/assignments` endpoint.
async fn handle_list_assignments(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(_actor, _operator): SessionOperator,
    Query(query): Query<ListAssignmentsQuery>,
) -> Result<Json<ListAssignmentsResponse>, HttpError> {
    info!(plate = ?query.plate, "Handling list_assignments request");

    let request: ListAssignmentsRequest = ListAssignmentsRequest {
        plate: query.plate,
        from: query.from,
        to: query.to,
        include_cancelled: query.include_cancelled,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListAssignmentsResponse = list_assignments(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments/accept` endpoint.
async fn handle_accept_assignment(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<AcceptAssignmentRequest>,
) -> Result<Json<AcceptAssignmentResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        entry_id = %req.entry_id,
        target_status = %req.target_status,
        "Handling accept_assignment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AcceptAssignmentResponse = accept_assignment(
        &mut persistence,
        &req,
        &actor,
        request_cause("booking status change"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/events` endpoint.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        event_id = %req.event_id,
        code = %req.code,
        "Handling create_event request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse =
        create_event(&mut persistence, req, &actor, request_cause("event create"))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/timeline` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(_actor, _operator): SessionOperator,
    Query(query): Query<AuditTimelineQuery>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    info!(
        department = ?query.department,
        event_ref = ?query.event_ref,
        "Handling get_audit_timeline request"
    );

    let request: AuditTimelineRequest = AuditTimelineRequest {
        department: query.department,
        event_ref: query.event_ref,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AuditTimelineResponse = get_audit_timeline(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/operators` endpoint.
async fn handle_create_operator(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
    Json(req): Json<CreateOperatorRequest>,
) -> Result<Json<CreateOperatorResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        login_name = %req.login_name,
        role = %req.role,
        "Handling create_operator request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateOperatorResponse = create_operator(
        &mut persistence,
        req,
        &actor,
        request_cause("operator create"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/operators` endpoint.
async fn handle_list_operators(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _operator): SessionOperator,
) -> Result<Json<ListOperatorsResponse>, HttpError> {
    info!(actor_id = %actor.id, "Handling list_operators request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListOperatorsResponse = list_operators(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route("/rosters", post(handle_upsert_roster))
        .route("/rosters", get(handle_list_rosters))
        .route("/rosters/confirm", post(handle_confirm_roster))
        .route("/rosters/unconfirm", post(handle_unconfirm_roster))
        .route("/rosters/close", post(handle_close_roster))
        .route("/rosters/vehicle-row", post(handle_save_vehicle_row))
        .route("/rosters/{department}/{event_id}", get(handle_get_roster))
        .route("/occupancy/{plate}", get(handle_get_occupancy))
        .route("/assignments", post(handle_create_assignment))
        .route("/assignments", get(handle_list_assignments))
        .route("/assignments/accept", post(handle_accept_assignment))
        .route("/events", post(handle_create_event))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .route("/operators", post(handle_create_operator))
        .route("/operators", get(handle_list_operators))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Crewdesk server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    bootstrap_admin(&mut persistence)?;

    // Load the route table, when configured
    let route_table: Option<Arc<RouteTable>> = if let Some(path) = &args.route_table {
        let table: RouteTable = RouteTable::from_csv_path(args.origin.as_str(), path)?;
        info!(
            routes = table.len(),
            origin = %args.origin,
            "Loaded route table"
        );
        Some(Arc::new(table))
    } else {
        info!("No route table configured; distance enrichment is disabled");
        None
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        route_table,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
