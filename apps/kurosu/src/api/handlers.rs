//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Synthesis is CPU-bound, so the generate handler dispatches it to a
//! blocking worker and keeps the I/O path free. Every other operation
//! is a cheap lookup against the store.

use super::{
    AppState,
    types::{
        CheckRequest, CheckResponse, DeleteResponse, ErrorResponse, GenerateRequest,
        HealthResponse, HintQuery, HintResponse, ListResponse, PuzzleSummaryJson,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kurosu_core::{KurosuError, PuzzleId};
use std::str::FromStr;

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Map a core error to an HTTP status.
///
/// `NotFound` and `UnknownClue` are 404; malformed input is 400; a
/// candidate set that cannot build a puzzle is 422; storage failures
/// surface as an opaque 500.
fn error_status(error: &KurosuError) -> StatusCode {
    match error {
        KurosuError::NotFound(_) | KurosuError::UnknownClue(_, _) => StatusCode::NOT_FOUND,
        KurosuError::BadRequest(_) => StatusCode::BAD_REQUEST,
        KurosuError::InsufficientWords => StatusCode::UNPROCESSABLE_ENTITY,
        KurosuError::SerializationError(_) | KurosuError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: &KurosuError) -> Response {
    (
        error_status(error),
        Json(ErrorResponse::new(error.to_string())),
    )
        .into_response()
}

fn parse_id(id: &str) -> Result<PuzzleId, KurosuError> {
    PuzzleId::from_str(id)
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// GENERATE HANDLER
// =============================================================================

/// Generate a puzzle from candidate words.
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    let (params, candidates) = match request.into_inputs() {
        Ok(inputs) => inputs,
        Err(e) => return error_response(&e),
    };

    tracing::info!(
        size = params.size,
        candidates = candidates.len(),
        "generating puzzle"
    );

    // Synthesis is a pure CPU burn; run it off the async executor.
    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut service = service.blocking_write();
        service.generate(&params, &candidates)
    })
    .await;

    match result {
        Ok(Ok(public)) => {
            tracing::info!(
                id = %public.id,
                words = public.word_count,
                density = public.grid.density(),
                "puzzle generated"
            );
            (StatusCode::OK, Json(public)).into_response()
        }
        Ok(Err(e)) => error_response(&e),
        Err(e) => error_response(&KurosuError::IoError(format!("worker failed: {e}"))),
    }
}

// =============================================================================
// LOOKUP HANDLERS
// =============================================================================

/// Fetch a puzzle by id, answers stripped.
pub async fn get_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let service = state.service.read().await;
    match service.get(id) {
        Ok(public) => (StatusCode::OK, Json(public)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// List stored puzzles, newest first.
pub async fn list_handler(State(state): State<AppState>) -> Response {
    let service = state.service.read().await;
    match service.list() {
        Ok(summaries) => {
            let puzzles = summaries
                .into_iter()
                .map(|s| PuzzleSummaryJson {
                    id: s.id.to_string(),
                    title: s.title,
                    size: s.size,
                    word_count: s.word_count,
                    created_at: s.created_at,
                })
                .collect();
            (StatusCode::OK, Json(ListResponse { puzzles })).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Delete a puzzle.
pub async fn delete_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let mut service = state.service.write().await;
    match service.delete(id) {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse { deleted: true })).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// PLAY HANDLERS
// =============================================================================

/// Check submitted answers.
pub async fn check_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CheckRequest>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let answers = match request.into_answers() {
        Ok(answers) => answers,
        Err(e) => return error_response(&e),
    };

    let service = state.service.read().await;
    match service.check(id, &answers) {
        Ok(result) => (
            StatusCode::OK,
            Json(CheckResponse {
                correct: result.correct,
                incorrect: result.incorrect,
            }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Reveal the first grapheme of one answer.
pub async fn hint_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HintQuery>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let (number, orientation) = match query.into_parts() {
        Ok(parts) => parts,
        Err(e) => return error_response(&e),
    };

    let service = state.service.read().await;
    match service.hint(id, number, orientation) {
        Ok(result) => (
            StatusCode::OK,
            Json(HintResponse {
                hint: result.hint,
                revealed: result.revealed,
                total: result.total,
            }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}
