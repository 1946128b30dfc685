//! # Kurosu HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /puzzles` - Generate a puzzle from candidate words
//! - `GET /puzzles` - List stored puzzles, newest first
//! - `GET /puzzles/{id}` - Fetch one puzzle (answers stripped)
//! - `POST /puzzles/{id}/check` - Check submitted answers
//! - `GET /puzzles/{id}/hint` - Reveal the first grapheme of an answer
//! - `DELETE /puzzles/{id}` - Delete a puzzle
//! - `GET /health` - Health check
//!
//! ## Configuration (Environment Variables)
//!
//! - `KUROSU_CORS_ORIGINS`: comma-separated origin list; `*` opens every
//!   origin; unset serves localhost only

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `kurosu::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    check_handler, delete_handler, generate_handler, get_handler, health_handler, hint_handler,
    list_handler,
};
#[allow(unused_imports)]
pub use types::{
    CandidateJson, CheckRequest, CheckResponse, DeleteResponse, ErrorResponse, GenerateRequest,
    HealthResponse, HintQuery, HintResponse, ListResponse, PuzzleSummaryJson,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use kurosu_core::{KurosuError, PuzzleService};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the puzzle service.
#[derive(Clone)]
pub struct AppState {
    /// The service owning the puzzle store.
    pub service: Arc<RwLock<PuzzleService>>,
}

impl AppState {
    /// Create new app state with a service.
    #[must_use]
    pub fn new(service: PuzzleService) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Origins served when `KUROSU_CORS_ORIGINS` is not set.
const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Cross-origin policy from `KUROSU_CORS_ORIGINS`.
///
/// Unset keeps the restrictive localhost default. The literal `*`
/// serves every origin (development only). Anything else is read as a
/// comma-separated origin list; entries that fail to parse are skipped
/// with a warning, and an empty result falls back to the default.
fn cors_layer() -> CorsLayer {
    let configured = std::env::var("KUROSU_CORS_ORIGINS").ok();

    if configured.as_deref() == Some("*") {
        tracing::warn!(
            "CORS is open to every origin; unset KUROSU_CORS_ORIGINS=* outside development"
        );
        return CorsLayer::permissive();
    }

    let spec = configured.unwrap_or_else(|| DEFAULT_ORIGINS.join(","));
    let mut origins: Vec<HeaderValue> = Vec::new();
    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse() {
            Ok(origin) => origins.push(origin),
            Err(_) => tracing::warn!(entry, "skipping unparseable CORS origin"),
        }
    }
    if origins.is_empty() {
        tracing::warn!("no usable CORS origin configured; serving localhost only");
        origins = DEFAULT_ORIGINS
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
    }
    tracing::debug!(count = origins.len(), "CORS origin list ready");

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Request tracing wraps everything; inside it sit the CORS policy and
/// a 2 MB body cap, so oversized payloads die before JSON parsing.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer();

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/puzzles", post(handlers::generate_handler))
        .route("/puzzles", get(handlers::list_handler))
        .route("/puzzles/{id}", get(handlers::get_handler))
        .route("/puzzles/{id}", delete(handlers::delete_handler))
        .route("/puzzles/{id}/check", post(handlers::check_handler))
        .route("/puzzles/{id}/hint", get(handlers::hint_handler))
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, service: PuzzleService) -> Result<(), KurosuError> {
    let state = AppState::new(service);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| KurosuError::IoError(format!("Bind failed: {e}")))?;

    tracing::info!("Kurosu HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| KurosuError::IoError(format!("Server error: {e}")))
}
