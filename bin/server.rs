// 🌐 Market Intelligence - JSON API Server
// Same Dashboard as the terminal UI, behind REST endpoints with Axum

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use market_intel::config::DEFAULT_CONFIG_FILE;
use market_intel::loader::fetch_dataset;
use market_intel::{
    login, CategoryFilter, CategoryRanking, CurationOverlay, Dashboard, DashboardConfig, MapView,
    SummaryProjection, User, VERSION,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Signed-in analyst plus the dashboard that belongs to them
struct Session {
    user: Option<User>,
    dashboard: Dashboard,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    config: DashboardConfig,
    session: Arc<Mutex<Session>>,
}

impl AppState {
    fn new(config: DashboardConfig) -> Self {
        let dashboard = Dashboard::new(config.clone());
        Self {
            config,
            session: Arc::new(Mutex::new(Session { user: None, dashboard })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // A panicked handler leaves plain data behind; keep serving it
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Sign in first")
    }

    fn loading() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "Loading competitor data...")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse {
            success: false,
            data: (),
            error: Some(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn signed_in(session: &Session) -> Result<(), ApiError> {
    match session.user {
        Some(_) => Ok(()),
        None => Err(ApiError::unauthorized()),
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
struct MapQuery {
    filter: Option<String>,
}

#[derive(Deserialize)]
struct SuggestionQuery {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct CategoriesResponse {
    active: Option<String>,
    categories: Vec<CategoryRanking>,
}

#[derive(Serialize)]
struct OverlayResponse {
    changed: bool,
    overlay: CurationOverlay,
}

#[derive(Serialize)]
struct ReloadResponse {
    applied: bool,
    records: usize,
    categories: usize,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/login - Start a fresh session and load the competitor data
async fn post_login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> ApiResult<User> {
    let user = login(&request.email, &request.password)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;

    let ticket = {
        let mut session = state.lock();
        session.user = Some(user.clone());
        session.dashboard = Dashboard::new(state.config.clone());
        session.dashboard.begin_load()
    };

    let dataset = fetch_dataset(state.config.data_path.clone()).await;

    let mut session = state.lock();
    if session.user.as_ref().map(|u| &u.session_id) == Some(&user.session_id) {
        session.dashboard.finish_load(ticket, dataset);
    }

    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/logout - End the session
async fn post_logout(State(state): State<AppState>) -> impl IntoResponse {
    let mut session = state.lock();
    if let Some(user) = session.user.take() {
        info!(user = %user.name, "analyst signed out");
    }
    Json(ApiResponse::ok("signed out"))
}

/// POST /api/reload - Re-read the CSV; only the newest reload is applied
async fn post_reload(State(state): State<AppState>) -> ApiResult<ReloadResponse> {
    let (ticket, session_id) = {
        let mut session = state.lock();
        signed_in(&session)?;
        let session_id = session.user.as_ref().map(|u| u.session_id.clone());
        (session.dashboard.begin_load(), session_id)
    };

    let dataset = fetch_dataset(state.config.data_path.clone()).await;

    let mut session = state.lock();
    let same_session = session.user.as_ref().map(|u| u.session_id.clone()) == session_id;
    let applied = same_session && session.dashboard.finish_load(ticket, dataset);
    let (records, categories) = session
        .dashboard
        .dataset()
        .map(|d| (d.records.len(), d.categories.len()))
        .unwrap_or((0, 0));

    Ok(Json(ApiResponse::ok(ReloadResponse {
        applied,
        records,
        categories,
    })))
}

/// GET /api/categories - Priority ranking and the active filter
async fn get_categories(State(state): State<AppState>) -> ApiResult<CategoriesResponse> {
    let session = state.lock();
    signed_in(&session)?;

    let dataset = session.dashboard.dataset().ok_or_else(ApiError::loading)?;
    let response = CategoriesResponse {
        active: session.dashboard.active_filter().map(|f| f.to_string()),
        categories: dataset.categories.ranking.clone(),
    };

    Ok(Json(ApiResponse::ok(response)))
}

/// GET /api/map?filter= - Geographic projection; `filter` also changes the selection
async fn get_map(State(state): State<AppState>, Query(query): Query<MapQuery>) -> ApiResult<MapView> {
    let mut session = state.lock();
    signed_in(&session)?;

    if let Some(filter) = query.filter.as_deref().filter(|f| !f.trim().is_empty()) {
        session.dashboard.select_filter(CategoryFilter::parse(filter));
    }

    let view = session.dashboard.map_view().ok_or_else(ApiError::loading)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// GET /api/summary - Per-category tables
async fn get_summary(State(state): State<AppState>) -> ApiResult<SummaryProjection> {
    let session = state.lock();
    signed_in(&session)?;

    let summary = session.dashboard.summary_view().ok_or_else(ApiError::loading)?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/suggestions?q= - Colleges the analyst may add
async fn get_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> ApiResult<Vec<&'static str>> {
    let session = state.lock();
    signed_in(&session)?;

    Ok(Json(ApiResponse::ok(session.dashboard.suggestions(&query.q))))
}

/// GET /api/overlay - Current removals and additions
async fn get_overlay(State(state): State<AppState>) -> ApiResult<CurationOverlay> {
    let session = state.lock();
    signed_in(&session)?;

    Ok(Json(ApiResponse::ok(session.dashboard.overlay().clone())))
}

#[derive(Clone, Copy)]
enum Curation {
    Remove,
    Restore,
    Add,
}

/// `name` arrives already percent-decoded by the `Path` extractor.
fn curate(state: &AppState, name: &str, action: Curation) -> ApiResult<OverlayResponse> {
    let mut session = state.lock();
    signed_in(&session)?;

    let changed = match action {
        Curation::Remove => session.dashboard.remove_school(name),
        Curation::Restore => session.dashboard.restore_school(name),
        Curation::Add => {
            if !session.dashboard.registry().contains(name) {
                warn!(school = %name, "rejected addition of unknown college");
                return Err(ApiError::new(
                    StatusCode::NOT_FOUND,
                    format!("{} is not in the college list", name),
                ));
            }
            session.dashboard.add_school(name)
        }
    };

    Ok(Json(ApiResponse::ok(OverlayResponse {
        changed,
        overlay: session.dashboard.overlay().clone(),
    })))
}

/// POST /api/schools/:name/remove
async fn remove_school(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<OverlayResponse> {
    curate(&state, &name, Curation::Remove)
}

/// POST /api/schools/:name/restore
async fn restore_school(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<OverlayResponse> {
    curate(&state, &name, Curation::Restore)
}

/// POST /api/schools/:name/add
async fn add_school(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<OverlayResponse> {
    curate(&state, &name, Curation::Add)
}

// ============================================================================
// Router
// ============================================================================

fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/login", post(post_login))
        .route("/logout", post(post_logout))
        .route("/reload", post(post_reload))
        .route("/categories", get(get_categories))
        .route("/map", get(get_map))
        .route("/summary", get(get_summary))
        .route("/suggestions", get(get_suggestions))
        .route("/overlay", get(get_overlay))
        .route("/schools/:name/remove", post(remove_school))
        .route("/schools/:name/restore", post(restore_school))
        .route("/schools/:name/add", post(add_school))
        .with_state(state);

    Router::new().nest("/api", api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("market_intel=info,tower_http=info")),
        )
        .init();

    println!("🌐 Market Intelligence v{} - API Server", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = match DashboardConfig::load_or_default(DEFAULT_CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    if !config.data_path.exists() {
        eprintln!("⚠️  Competitor data not found at {}", config.data_path.display());
        eprintln!("   Sessions will start with an empty dataset.");
    }

    let addr = config.server_addr.clone();
    let router = app(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("❌ Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/health", addr);
    println!("\n   Press Ctrl+C to stop\n");

    if let Err(e) = axum::serve(listener, router).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
