//! Web API module for hallseat.
//!
//! This module provides a REST API for building seating plans from roster
//! rows posted by a browser frontend.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/strategies` - List ordering strategies
//! - `GET /api/config` - Get the configured defaults
//! - `POST /api/allocate` - Build a plan and return it as JSON
//! - `POST /api/allocate/html` - Build a plan and return it rendered as HTML
//! - `POST /api/export/workbook` - Build a plan and download it as xlsx

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cli::strategies::{strategy_list, StrategyInfo};
use crate::config::Config;
use crate::error::AllocationError;
use crate::export::{self, ExportFormat};
use crate::models::{AllocationResult, Cell, LayoutConfig};
use crate::parser::{normalize_rows, NormalizeOptions};
use crate::services::PlanService;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the configuration the server was started with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Strategy list response.
#[derive(Debug, Serialize)]
pub struct StrategyListResponse {
    /// Strategies in menu order.
    pub strategies: Vec<StrategyInfo>,
}

/// Configuration response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// Default layout used when a request omits one.
    pub layout: LayoutConfig,
    /// Default export format.
    pub default_format: ExportFormat,
}

/// Allocation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateRequest {
    /// Roster rows, header first.
    pub rows: Vec<Vec<Cell>>,
    /// Layout; the configured default when omitted.
    #[serde(default)]
    pub layout: Option<LayoutConfig>,
    /// Seed for the random strategy; overrides `layout.seed`.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Pad short rows instead of rejecting them.
    #[serde(default)]
    pub lenient: bool,
}

/// Rendered HTML response.
#[derive(Debug, Serialize)]
pub struct HtmlResponse {
    /// Standalone HTML document.
    pub html: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn bad_request(err: &AllocationError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_details("Invalid input", err.to_string())),
    )
}

fn internal_error(message: &str, err: &anyhow::Error) -> (StatusCode, Json<ApiError>) {
    warn!("{message}: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(message, format!("{err:#}"))),
    )
}

/// Normalizes the posted rows and runs the allocation.
fn build_plan(state: &AppState, request: AllocateRequest) -> ApiResult<AllocationResult> {
    let mut layout = request
        .layout
        .unwrap_or_else(|| state.config.layout.clone());
    if request.seed.is_some() {
        layout.seed = request.seed;
    }

    let options = NormalizeOptions {
        lenient: request.lenient,
    };
    let roster = normalize_rows(&request.rows, options).map_err(|e| bad_request(&e))?;

    PlanService::allocate(&roster, &layout).map_err(|e| match e.downcast_ref::<AllocationError>() {
        Some(domain) => bad_request(domain),
        None => internal_error("Allocation failed", &e),
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/strategies - List ordering strategies.
async fn list_strategies() -> Json<StrategyListResponse> {
    Json(StrategyListResponse {
        strategies: strategy_list(),
    })
}

/// GET /api/config - Get the configured defaults.
async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        layout: state.config.layout.clone(),
        default_format: state.config.export.default_format,
    })
}

/// POST /api/allocate - Build a plan.
async fn allocate(
    State(state): State<AppState>,
    Json(request): Json<AllocateRequest>,
) -> ApiResult<Json<AllocationResult>> {
    build_plan(&state, request).map(Json)
}

/// POST /api/allocate/html - Build a plan and render it.
async fn allocate_html(
    State(state): State<AppState>,
    Json(request): Json<AllocateRequest>,
) -> ApiResult<Json<HtmlResponse>> {
    let result = build_plan(&state, request)?;
    Ok(Json(HtmlResponse {
        html: export::render_html(&result),
    }))
}

/// POST /api/export/workbook - Build a plan and return it as an xlsx download.
async fn export_workbook(
    State(state): State<AppState>,
    Json(request): Json<AllocateRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = build_plan(&state, request)?;
    let bytes = PlanService::render(&result, ExportFormat::Xlsx)
        .map_err(|e| internal_error("Failed to build workbook", &e))?;

    let today = chrono::Local::now().date_naive();
    let filename = PlanService::default_file_name(ExportFormat::Xlsx, today);
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins; the server is meant to run
    // locally next to the frontend.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .route("/api/strategies", get(list_strategies))
        .route("/api/config", get(get_config))
        // Allocation endpoints
        .route("/api/allocate", post(allocate))
        .route("/api/allocate/html", post(allocate_html))
        .route("/api/export/workbook", post(export_workbook))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the web server.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(AppState::new(config));

    info!("Starting hallseat web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
