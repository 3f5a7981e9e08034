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
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod identity;
mod live;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use absence_board_api::{
    ApiError, BoardRegistry, CalendarResponse, ClickDayRequest, ConfigureYearRequest,
    CoordinatorConfig, CreatePersonRequest, DailyResponse, DayRef, DayWriteResponse,
    GlobalDayRequest, GlobalDayResponse, ImportHolidaysResponse, ListPersonsResponse,
    LoadYearResponse, MonthSummaryResponse, PersonInfo, RemovePersonResponse,
    SetDayStatusRequest, UpdatePersonRequest, YearConfigurationResponse, YearSummaryResponse,
    click_day, configure_year, create_person, delete_global_day, export_year, get_calendar,
    get_daily, get_month_summary, get_year_summary, import_holidays, list_persons, load_year,
    remove_person, set_day_status, set_global_day, update_person,
};
use absence_board_persistence::{RemoteStore, SqliteStore};

use crate::identity::Identity;

/// Absence Board Server - HTTP server for the team absence calendar
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Debounce window for person-day writes, in milliseconds
    #[arg(long, default_value_t = 1000)]
    debounce_ms: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The loaded boards of every tenant.
    registry: Arc<BoardRegistry>,
}

/// Path parameters addressing a month.
#[derive(Debug, Deserialize)]
struct MonthPath {
    year: i32,
    month: u8,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::YearNotLoaded { .. } => StatusCode::CONFLICT,
            ApiError::RemoteWriteFailed { .. } => {
                warn!(error = %err, "Remote store rejected a write");
                StatusCode::BAD_GATEWAY
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/years/{year}/load`.
///
/// Loads a year for the caller's tenant, flushing the previous board first.
async fn handle_load_year(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(year): Path<i32>,
) -> Result<Json<LoadYearResponse>, HttpError> {
    info!(user_id = %actor.user_id, year, "Handling load_year request");
    Ok(Json(load_year(&app_state.registry, &actor, year).await?))
}

/// Handler for GET `/persons`.
async fn handle_list_persons(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<ListPersonsResponse>, HttpError> {
    Ok(Json(list_persons(&app_state.registry, &actor).await?))
}

/// Handler for POST `/persons`.
async fn handle_create_person(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<PersonInfo>), HttpError> {
    info!(user_id = %actor.user_id, person = %req.id, "Handling create_person request");
    let person: PersonInfo = create_person(&app_state.registry, &actor, req).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// Handler for PUT `/persons/{id}`.
async fn handle_update_person(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(person_id): Path<String>,
    Json(req): Json<UpdatePersonRequest>,
) -> Result<Json<PersonInfo>, HttpError> {
    info!(user_id = %actor.user_id, person = %person_id, "Handling update_person request");
    Ok(Json(
        update_person(&app_state.registry, &actor, &person_id, req).await?,
    ))
}

/// Handler for DELETE `/persons/{id}`.
async fn handle_remove_person(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(person_id): Path<String>,
) -> Result<Json<RemovePersonResponse>, HttpError> {
    info!(user_id = %actor.user_id, person = %person_id, "Handling remove_person request");
    Ok(Json(
        remove_person(&app_state.registry, &actor, &person_id).await?,
    ))
}

/// Handler for POST `/days/click`.
///
/// Applies the click cycle locally and schedules the remote write.
async fn handle_click_day(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<ClickDayRequest>,
) -> Result<Json<DayWriteResponse>, HttpError> {
    Ok(Json(click_day(&app_state.registry, &actor, req).await?))
}

/// Handler for PUT `/days/status`.
async fn handle_set_day_status(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<SetDayStatusRequest>,
) -> Result<Json<DayWriteResponse>, HttpError> {
    Ok(Json(set_day_status(&app_state.registry, &actor, req).await?))
}

/// Handler for PUT `/global-days`.
async fn handle_set_global_day(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<GlobalDayRequest>,
) -> Result<Json<GlobalDayResponse>, HttpError> {
    info!(
        user_id = %actor.user_id,
        year = req.year,
        month = req.month,
        day = req.day,
        status = ?req.status,
        "Handling set_global_day request"
    );
    Ok(Json(set_global_day(&app_state.registry, &actor, req).await?))
}

/// Handler for DELETE `/global-days?year=&month=&day=`.
async fn handle_delete_global_day(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Query(day): Query<DayRef>,
) -> Result<Json<GlobalDayResponse>, HttpError> {
    info!(
        user_id = %actor.user_id,
        year = day.year,
        month = day.month,
        day = day.day,
        "Handling delete_global_day request"
    );
    Ok(Json(
        delete_global_day(&app_state.registry, &actor, day).await?,
    ))
}

/// Handler for POST `/years/{year}/holidays/import`.
async fn handle_import_holidays(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(year): Path<i32>,
) -> Result<Json<ImportHolidaysResponse>, HttpError> {
    info!(user_id = %actor.user_id, year, "Handling import_holidays request");
    Ok(Json(
        import_holidays(&app_state.registry, &actor, year).await?,
    ))
}

/// Handler for PUT `/years/{year}/configuration`.
async fn handle_configure_year(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(year): Path<i32>,
    Json(req): Json<ConfigureYearRequest>,
) -> Result<Json<YearConfigurationResponse>, HttpError> {
    info!(
        user_id = %actor.user_id,
        year,
        vacation_entitlement_days = req.vacation_entitlement_days,
        "Handling configure_year request"
    );
    Ok(Json(
        configure_year(&app_state.registry, &actor, year, req).await?,
    ))
}

/// Handler for GET `/calendar/{year}/{month}`.
async fn handle_get_calendar(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(path): Path<MonthPath>,
) -> Result<Json<CalendarResponse>, HttpError> {
    Ok(Json(
        get_calendar(&app_state.registry, &actor, path.year, path.month).await?,
    ))
}

/// Handler for GET `/summary/{year}/{month}`.
async fn handle_get_month_summary(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(path): Path<MonthPath>,
) -> Result<Json<MonthSummaryResponse>, HttpError> {
    Ok(Json(
        get_month_summary(&app_state.registry, &actor, path.year, path.month).await?,
    ))
}

/// Handler for GET `/summary/{year}`.
async fn handle_get_year_summary(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(year): Path<i32>,
) -> Result<Json<YearSummaryResponse>, HttpError> {
    Ok(Json(
        get_year_summary(&app_state.registry, &actor, year).await?,
    ))
}

/// Handler for GET `/daily/{year}/{month}/{day}`.
async fn handle_get_daily(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(day): Path<DayRef>,
) -> Result<Json<DailyResponse>, HttpError> {
    Ok(Json(get_daily(&app_state.registry, &actor, day).await?))
}

/// Handler for GET `/export/{year}`.
///
/// Returns the CSV export as a download.
async fn handle_export_year(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(year): Path<i32>,
) -> Result<Response, HttpError> {
    let csv: String = export_year(&app_state.registry, &actor, year).await?;
    let disposition: String = format!("attachment; filename=\"abwesenheiten-{year}.csv\"");
    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/years/{year}/load", post(handle_load_year))
        .route(
            "/years/{year}/holidays/import",
            post(handle_import_holidays),
        )
        .route("/years/{year}/configuration", put(handle_configure_year))
        .route(
            "/persons",
            get(handle_list_persons).post(handle_create_person),
        )
        .route(
            "/persons/{id}",
            put(handle_update_person).delete(handle_remove_person),
        )
        .route("/days/click", post(handle_click_day))
        .route("/days/status", put(handle_set_day_status))
        .route(
            "/global-days",
            put(handle_set_global_day).delete(handle_delete_global_day),
        )
        .route("/calendar/{year}/{month}", get(handle_get_calendar))
        .route("/summary/{year}/{month}", get(handle_get_month_summary))
        .route("/summary/{year}", get(handle_get_year_summary))
        .route("/daily/{year}/{month}/{day}", get(handle_get_daily))
        .route("/export/{year}", get(handle_export_year))
        .route("/live", get(live::live_notifications_handler))
        .with_state(app_state)
}

/// Resolves once the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Absence Board Server");

    let store: SqliteStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteStore::new_in_memory()?
    };

    let config: CoordinatorConfig = CoordinatorConfig::from_millis(args.debounce_ms);
    info!(debounce_ms = args.debounce_ms, "Write coordinator configured");

    let registry: Arc<BoardRegistry> = Arc::new(BoardRegistry::new(
        Arc::new(store) as Arc<dyn RemoteStore>,
        config,
    ));
    let app_state: AppState = AppState {
        registry: Arc::clone(&registry),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let flushed: usize = registry.flush_all().await;
    info!(flushed, "Pending writes flushed, exiting");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use absence_board_domain::StatusValue;
    use absence_board_persistence::InMemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    use crate::identity::{TENANT_ID_HEADER, USER_ID_HEADER, USER_ROLE_HEADER};

    const YEAR: i32 = 2025;

    /// Helper to create test app state over an in-memory store.
    fn create_test_app_state() -> (Arc<InMemoryStore>, AppState) {
        let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
        let registry: BoardRegistry = BoardRegistry::new(
            Arc::clone(&store) as Arc<dyn RemoteStore>,
            CoordinatorConfig::default(),
        );
        (
            store,
            AppState {
                registry: Arc::new(registry),
            },
        )
    }

    fn request(method: &str, uri: &str, role: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, if role == "admin" { "admin-1" } else { "user-bob" })
            .header(USER_ROLE_HEADER, role)
            .header(TENANT_ID_HEADER, "acme");
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (HttpStatusCode, Vec<u8>) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status: HttpStatusCode = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    /// Creates Alice and Bob (Bob linked to `user-bob`) and loads 2025.
    async fn create_seeded_app() -> (Arc<InMemoryStore>, Router) {
        let (store, app_state) = create_test_app_state();
        let app: Router = build_router(app_state);

        for (id, name, order, user) in [
            ("p-alice", "Alice", 1, None),
            ("p-bob", "Bob", 0, Some("user-bob")),
        ] {
            let (status, _) = send(
                &app,
                request(
                    "POST",
                    "/persons",
                    "admin",
                    Some(serde_json::json!({
                        "id": id,
                        "name": name,
                        "orderIndex": order,
                        "userId": user,
                    })),
                ),
            )
            .await;
            assert_eq!(status, HttpStatusCode::CREATED);
        }

        let (status, _) = send(&app, request("POST", "/years/2025/load", "admin", None)).await;
        assert_eq!(status, HttpStatusCode::OK);
        (store, app)
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let (_store, app) = create_seeded_app().await;

        let (status, body) = send(
            &app,
            Request::builder()
                .method("GET")
                .uri("/persons")
                .header(USER_ID_HEADER, "admin-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error_response.error);
        assert!(error_response.message.contains("Authentication failed"));
    }

    #[tokio::test]
    async fn test_member_cannot_create_person() {
        let (store, app) = create_seeded_app().await;

        let (status, _) = send(
            &app,
            request(
                "POST",
                "/persons",
                "member",
                Some(serde_json::json!({ "id": "p-carol", "name": "Carol", "orderIndex": 2 })),
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(
            store
                .list_persons(&absence_board_domain::TenantId::new("acme").unwrap())
                .await
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn test_duplicate_person_is_unprocessable() {
        let (_store, app) = create_seeded_app().await;

        let (status, _) = send(
            &app,
            request(
                "POST",
                "/persons",
                "admin",
                Some(serde_json::json!({ "id": "p-alice", "name": "Alice", "orderIndex": 3 })),
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_remove_unknown_person_is_not_found() {
        let (_store, app) = create_seeded_app().await;

        let (status, _) = send(&app, request("DELETE", "/persons/p-nobody", "admin", None)).await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_calendar_lists_persons_in_display_order() {
        let (_store, app) = create_seeded_app().await;

        let (status, body) = send(&app, request("GET", "/calendar/2025/2", "member", None)).await;

        assert_eq!(status, HttpStatusCode::OK);
        let calendar: CalendarResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(calendar.year, YEAR);
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.rows[0].name, "Bob");
        assert_eq!(calendar.rows[1].name, "Alice");
    }

    #[tokio::test]
    async fn test_other_year_is_conflict() {
        let (_store, app) = create_seeded_app().await;

        let (status, _) = send(&app, request("GET", "/calendar/2026/0", "admin", None)).await;

        assert_eq!(status, HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_month_out_of_range_is_bad_request() {
        let (_store, app) = create_seeded_app().await;

        let (status, _) = send(&app, request("GET", "/summary/2025/12", "admin", None)).await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_member_clicks_own_row_and_write_survives_reload() {
        let (_store, app) = create_seeded_app().await;

        let (status, body) = send(
            &app,
            request(
                "POST",
                "/days/click",
                "member",
                Some(serde_json::json!({ "personId": "p-bob", "year": 2025, "month": 2, "day": 12 })),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let write: DayWriteResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(write.current, Some(StatusValue::Vacation));

        let (status, _) = send(
            &app,
            request(
                "POST",
                "/days/click",
                "member",
                Some(serde_json::json!({ "personId": "p-alice", "year": 2025, "month": 2, "day": 12 })),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);

        // Reloading flushes the pending write before reading the store again.
        let (status, _) = send(&app, request("POST", "/years/2025/load", "admin", None)).await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send(&app, request("GET", "/daily/2025/2/12", "member", None)).await;
        assert_eq!(status, HttpStatusCode::OK);
        let daily: DailyResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(daily.absences.len(), 1);
        assert_eq!(daily.absences[0].person_id, "p-bob");
        assert_eq!(daily.absences[0].status, Some(StatusValue::Vacation));
    }

    #[tokio::test]
    async fn test_global_day_set_and_delete() {
        let (_store, app) = create_seeded_app().await;

        let (status, _) = send(
            &app,
            request(
                "PUT",
                "/global-days",
                "admin",
                Some(serde_json::json!({ "year": 2025, "month": 2, "day": 12, "status": "internal-team-day" })),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (_, body) = send(&app, request("GET", "/daily/2025/2/12", "admin", None)).await;
        let daily: DailyResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(daily.absences.len(), 2);

        let (status, body) = send(
            &app,
            request("DELETE", "/global-days?year=2025&month=2&day=12", "admin", None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let deleted: GlobalDayResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(deleted.previous, Some(StatusValue::InternalTeamDay));
    }

    #[tokio::test]
    async fn test_failed_global_write_is_bad_gateway() {
        let (store, app) = create_seeded_app().await;
        store.fail_next_writes(1);

        let (status, _) = send(
            &app,
            request(
                "PUT",
                "/global-days",
                "admin",
                Some(serde_json::json!({ "year": 2025, "month": 2, "day": 12, "status": "holiday" })),
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_member_cannot_import_holidays() {
        let (_store, app) = create_seeded_app().await;

        let (status, _) = send(
            &app,
            request("POST", "/years/2025/holidays/import", "member", None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            request("POST", "/years/2025/holidays/import", "admin", None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let imported: ImportHolidaysResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(imported.holidays.len(), 9);
    }

    #[tokio::test]
    async fn test_configure_year_and_read_summary() {
        let (_store, app) = create_seeded_app().await;

        let (status, _) = send(
            &app,
            request(
                "PUT",
                "/years/2025/configuration",
                "admin",
                Some(serde_json::json!({ "vacationEntitlementDays": 24 })),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send(&app, request("GET", "/summary/2025", "member", None)).await;
        assert_eq!(status, HttpStatusCode::OK);
        let summary: YearSummaryResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(summary.vacation_entitlement_days, 24);
        assert!(
            summary
                .persons
                .iter()
                .all(|person| person.balance.remaining_days == 24)
        );
    }

    #[tokio::test]
    async fn test_export_is_csv_download() {
        let (_store, app) = create_seeded_app().await;

        let response = app
            .clone()
            .oneshot(request("GET", "/export/2025", "admin", None))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let csv: String = String::from_utf8(body.to_vec()).unwrap();
        assert!(csv.starts_with("Name;Monat;Urlaub"));
    }

    #[test]
    fn test_error_status_mapping() {
        let cases: Vec<(ApiError, HttpStatusCode)> = vec![
            (
                ApiError::YearNotLoaded {
                    requested: 2026,
                    loaded: None,
                },
                HttpStatusCode::CONFLICT,
            ),
            (
                ApiError::RemoteWriteFailed {
                    message: String::from("down"),
                },
                HttpStatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::Internal {
                    message: String::from("bug"),
                },
                HttpStatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::ResourceNotFound {
                    resource_type: String::from("Person"),
                    message: String::from("gone"),
                },
                HttpStatusCode::NOT_FOUND,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(HttpError::from(err).status, expected);
        }
    }
}
