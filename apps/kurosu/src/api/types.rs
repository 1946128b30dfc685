//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use kurosu_core::{
    CandidateWord, GenerateParams, KurosuError, Orientation,
    primitives::{MAX_ANSWER_LENGTH, MAX_CANDIDATE_WORDS, MAX_CLUE_LENGTH},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Uniform error body for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =============================================================================
// GENERATE REQUEST
// =============================================================================

/// One candidate word on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateJson {
    pub answer: String,
    pub clue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_ref: Option<String>,
}

/// Puzzle generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Requested grid size; out-of-range values are clamped by the core.
    pub size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Base seed for reproducible builds; omitted for OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub candidate_words: Vec<CandidateJson>,
}

impl GenerateRequest {
    /// Validate the request and split it into core inputs.
    ///
    /// Length limits are checked here, at the boundary, so oversized
    /// payloads never reach the synthesis path.
    pub fn into_inputs(self) -> Result<(GenerateParams, Vec<CandidateWord>), KurosuError> {
        if self.candidate_words.is_empty() {
            return Err(KurosuError::BadRequest(
                "candidate_words must not be empty".to_string(),
            ));
        }
        if self.candidate_words.len() > MAX_CANDIDATE_WORDS {
            return Err(KurosuError::BadRequest(format!(
                "candidate count {} exceeds maximum {}",
                self.candidate_words.len(),
                MAX_CANDIDATE_WORDS
            )));
        }

        let mut candidates = Vec::with_capacity(self.candidate_words.len());
        for word in self.candidate_words {
            if word.answer.is_empty() {
                return Err(KurosuError::BadRequest(
                    "candidate answer must not be empty".to_string(),
                ));
            }
            if word.answer.len() > MAX_ANSWER_LENGTH {
                return Err(KurosuError::BadRequest(format!(
                    "answer length {} exceeds maximum {} bytes",
                    word.answer.len(),
                    MAX_ANSWER_LENGTH
                )));
            }
            if word.clue.len() > MAX_CLUE_LENGTH {
                return Err(KurosuError::BadRequest(format!(
                    "clue length {} exceeds maximum {} bytes",
                    word.clue.len(),
                    MAX_CLUE_LENGTH
                )));
            }
            candidates.push(CandidateWord {
                answer: word.answer,
                clue: word.clue,
                article_ref: word.article_ref,
            });
        }

        let params = GenerateParams {
            size: self.size,
            title: self.title,
            seed: self.seed,
        };
        Ok((params, candidates))
    }
}

// =============================================================================
// CHECK REQUEST/RESPONSE
// =============================================================================

/// Answer check request.
///
/// `answers` maps `"{number}-{orientation}"` keys to submitted strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub answers: Option<BTreeMap<String, String>>,
}

impl CheckRequest {
    /// Extract the answer map, failing when the field is missing.
    pub fn into_answers(self) -> Result<BTreeMap<String, String>, KurosuError> {
        self.answers
            .ok_or_else(|| KurosuError::BadRequest("answers field is required".to_string()))
    }
}

/// Answer check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub correct: Vec<String>,
    pub incorrect: Vec<String>,
}

// =============================================================================
// HINT QUERY/RESPONSE
// =============================================================================

/// Hint query parameters: `?number=4&orientation=across`.
#[derive(Debug, Clone, Deserialize)]
pub struct HintQuery {
    pub number: Option<u32>,
    pub orientation: Option<String>,
}

impl HintQuery {
    /// Validate the query, failing when either field is missing.
    pub fn into_parts(self) -> Result<(u32, Orientation), KurosuError> {
        let number = self
            .number
            .ok_or_else(|| KurosuError::BadRequest("number parameter is required".to_string()))?;
        let orientation = self
            .orientation
            .ok_or_else(|| {
                KurosuError::BadRequest("orientation parameter is required".to_string())
            })?
            .parse()?;
        Ok((number, orientation))
    }
}

/// Hint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintResponse {
    pub hint: String,
    pub revealed: usize,
    pub total: usize,
}

// =============================================================================
// LIST & DELETE RESPONSES
// =============================================================================

/// One row of the puzzle listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleSummaryJson {
    pub id: String,
    pub title: String,
    pub size: usize,
    pub word_count: usize,
    pub created_at: u64,
}

/// Puzzle listing response, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub puzzles: Vec<PuzzleSummaryJson>,
}

/// Delete confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

// =============================================================================
// TESTS
// =============================================================================
