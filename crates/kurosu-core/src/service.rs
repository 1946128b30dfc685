//! # Puzzle Service
//!
//! The generation driver and query interface over a storage backend.
//!
//! `generate` runs the whole build path — normalize, synthesize,
//! number, assemble, persist — and returns the record with the answer
//! table stripped. The play operations (`check`, `hint`) are the only
//! consumers of the persisted answer table.

use crate::numbering::number_puzzle;
use crate::primitives::{
    MAX_ANSWER_LENGTH, MAX_CANDIDATE_WORDS, MAX_CLUE_LENGTH, MAX_GRID_SIZE, MIN_GRID_SIZE,
};
use crate::puzzle::{CheckResult, HintResult, PublicPuzzle, PuzzleRecord};
use crate::storage::{PuzzleStore, PuzzleSummary, RedbStore, StoreBackend};
use crate::synthesis::{SynthesisConfig, Synthesizer};
use crate::types::{CandidateWord, KurosuError, Orientation, PuzzleId};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Parameters for one generation request.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    /// Requested grid size; clamped silently into the supported range.
    pub size: usize,
    /// Optional display title; defaults to `"{N}x{N} crossword"`.
    pub title: Option<String>,
    /// Base seed for the synthesis RNG; `None` draws OS entropy.
    pub seed: Option<u64>,
}

/// The puzzle service: generation driver plus player queries, bound to
/// one storage backend.
#[derive(Debug, Default)]
pub struct PuzzleService {
    backend: StoreBackend,
}

impl PuzzleService {
    /// Create a service over a volatile in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service over persistent redb storage.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, KurosuError> {
        Ok(Self {
            backend: StoreBackend::Persistent(RedbStore::open(path)?),
        })
    }

    /// Create a service over an explicit backend.
    #[must_use]
    pub fn with_backend(backend: StoreBackend) -> Self {
        Self { backend }
    }

    /// Whether the service uses persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StoreBackend::Persistent(_))
    }

    // =========================================================================
    // PRODUCER INTERFACE
    // =========================================================================

    /// Build, persist, and return a puzzle (answers stripped).
    ///
    /// Synthesis is CPU-bound and synchronous; request-serving callers
    /// should dispatch this onto a blocking worker.
    pub fn generate(
        &mut self,
        params: &GenerateParams,
        candidates: &[CandidateWord],
    ) -> Result<PublicPuzzle, KurosuError> {
        validate_candidates(candidates)?;

        // Out-of-range sizes clamp rather than fail.
        let size = params.size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);

        let mut config = SynthesisConfig::new(size);
        config.seed = params.seed;
        let result = Synthesizer::synthesize(candidates, &config)?;

        let mut grid = result.grid;
        let (words, clues) = number_puzzle(&mut grid, result.placed)?;

        let title = params
            .title
            .clone()
            .unwrap_or_else(|| format!("{size}x{size} crossword"));
        let record = PuzzleRecord::assemble(
            PuzzleId::generate(),
            title,
            now_millis(),
            grid,
            words,
            clues,
        );

        self.backend.put(&record)?;
        Ok(record.to_public())
    }

    /// Persist an externally built record (archive import).
    pub fn import(&mut self, record: &PuzzleRecord) -> Result<(), KurosuError> {
        self.backend.put(record)
    }

    // =========================================================================
    // PLAYER INTERFACE
    // =========================================================================

    /// Fetch a puzzle by id, answers stripped.
    pub fn get(&self, id: PuzzleId) -> Result<PublicPuzzle, KurosuError> {
        let record = self.fetch(id)?;
        Ok(record.to_public())
    }

    /// Fetch the full record, answer table included.
    ///
    /// For callers inside the persistence boundary only (archive
    /// export); everything user-facing goes through [`Self::get`].
    pub fn get_record(&self, id: PuzzleId) -> Result<PuzzleRecord, KurosuError> {
        self.fetch(id)
    }

    /// List stored puzzles, newest first.
    pub fn list(&self) -> Result<Vec<PuzzleSummary>, KurosuError> {
        self.backend.list()
    }

    /// Delete a puzzle. `NotFound` when the id is unknown.
    pub fn delete(&mut self, id: PuzzleId) -> Result<(), KurosuError> {
        if self.backend.delete(id)? {
            Ok(())
        } else {
            Err(KurosuError::NotFound(id))
        }
    }

    /// Check submitted answers against the stored answer table.
    pub fn check(
        &self,
        id: PuzzleId,
        user_answers: &BTreeMap<String, String>,
    ) -> Result<CheckResult, KurosuError> {
        let record = self.fetch_with_answers(id)?;
        Ok(record.check(user_answers))
    }

    /// Reveal the first grapheme of one answer.
    pub fn hint(
        &self,
        id: PuzzleId,
        number: u32,
        orientation: Orientation,
    ) -> Result<HintResult, KurosuError> {
        let record = self.fetch_with_answers(id)?;
        record.hint(number, orientation)
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn fetch(&self, id: PuzzleId) -> Result<PuzzleRecord, KurosuError> {
        self.backend.get(id)?.ok_or(KurosuError::NotFound(id))
    }

    /// Fetch a record for the play path. A record whose answer table is
    /// missing fails as `NotFound`, never as silent success.
    fn fetch_with_answers(&self, id: PuzzleId) -> Result<PuzzleRecord, KurosuError> {
        let record = self.fetch(id)?;
        if record.answers.is_empty() && !record.words.is_empty() {
            return Err(KurosuError::NotFound(id));
        }
        Ok(record)
    }
}

/// Reject candidate lists the synthesis search cannot handle safely.
fn validate_candidates(candidates: &[CandidateWord]) -> Result<(), KurosuError> {
    if candidates.len() > MAX_CANDIDATE_WORDS {
        return Err(KurosuError::BadRequest(format!(
            "candidate count {} exceeds maximum {}",
            candidates.len(),
            MAX_CANDIDATE_WORDS
        )));
    }
    for candidate in candidates {
        if candidate.answer.len() > MAX_ANSWER_LENGTH {
            return Err(KurosuError::BadRequest(format!(
                "answer length {} exceeds maximum {} bytes",
                candidate.answer.len(),
                MAX_ANSWER_LENGTH
            )));
        }
        if candidate.clue.len() > MAX_CLUE_LENGTH {
            return Err(KurosuError::BadRequest(format!(
                "clue length {} exceeds maximum {} bytes",
                candidate.clue.len(),
                MAX_CLUE_LENGTH
            )));
        }
    }
    Ok(())
}

/// Current time as unix milliseconds.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<CandidateWord> {
        vec![
            CandidateWord::new("ネコ", "cat"),
            CandidateWord::new("コト", "thing"),
            CandidateWord::new("トリ", "bird"),
            CandidateWord::new("リス", "squirrel"),
        ]
    }

    fn params(size: usize) -> GenerateParams {
        GenerateParams {
            size,
            title: None,
            seed: Some(11),
        }
    }

    #[test]
    fn generate_persists_and_strips_answers() {
        let mut service = PuzzleService::new();
        let public = service.generate(&params(7), &candidates()).expect("generate");

        assert!(public.word_count >= 2);
        let json = serde_json::to_string(&public).expect("serialize");
        assert!(!json.contains("answers"));

        // The stored record still carries the table.
        let record = service.get_record(public.id).expect("record");
        assert_eq!(record.answers.len(), record.words.len());
    }

    #[test]
    fn generate_clamps_size() {
        let mut service = PuzzleService::new();
        let public = service.generate(&params(3), &candidates()).expect("generate");
        assert_eq!(public.size, MIN_GRID_SIZE);

        let public = service.generate(&params(99), &candidates()).expect("generate");
        assert_eq!(public.size, MAX_GRID_SIZE);
    }

    #[test]
    fn generate_default_title() {
        let mut service = PuzzleService::new();
        let public = service.generate(&params(7), &candidates()).expect("generate");
        assert_eq!(public.title, "7x7 crossword");
    }

    #[test]
    fn generate_rejects_oversized_input() {
        let mut service = PuzzleService::new();
        let too_many: Vec<CandidateWord> = (0..=MAX_CANDIDATE_WORDS)
            .map(|i| CandidateWord::new(format!("ネコ{i}"), "x"))
            .collect();
        let err = service
            .generate(&params(7), &too_many)
            .expect_err("must fail");
        assert!(matches!(err, KurosuError::BadRequest(_)));
    }

    #[test]
    fn get_unknown_id_not_found() {
        let service = PuzzleService::new();
        let err = service.get(PuzzleId::generate()).expect_err("must fail");
        assert!(matches!(err, KurosuError::NotFound(_)));
    }

    #[test]
    fn delete_then_not_found() {
        let mut service = PuzzleService::new();
        let public = service.generate(&params(7), &candidates()).expect("generate");

        service.delete(public.id).expect("delete");
        assert!(matches!(
            service.get(public.id),
            Err(KurosuError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(public.id),
            Err(KurosuError::NotFound(_))
        ));
    }

    #[test]
    fn check_and_hint_through_service() {
        let mut service = PuzzleService::new();
        let public = service.generate(&params(7), &candidates()).expect("generate");
        let record = service.get_record(public.id).expect("record");

        // Submit every stored answer: all correct.
        let result = service.check(public.id, &record.answers).expect("check");
        assert_eq!(result.correct.len(), record.answers.len());
        assert!(result.incorrect.is_empty());

        // Hint for the first word matches the stored answer's head.
        let word = &record.words[0];
        let hint = service
            .hint(public.id, word.number, word.orientation)
            .expect("hint");
        assert_eq!(hint.total, word.length);
        assert_eq!(hint.hint.chars().next(), word.answer.chars().next());
    }

    #[test]
    fn list_newest_first_through_service() {
        let mut service = PuzzleService::new();
        let first = service.generate(&params(7), &candidates()).expect("generate");
        let second = service.generate(&params(7), &candidates()).expect("generate");

        let listing = service.list().expect("list");
        assert_eq!(listing.len(), 2);
        // Either ordering of equal timestamps is fine, but both rows exist.
        let ids: Vec<PuzzleId> = listing.iter().map(|s| s.id).collect();
        assert!(ids.contains(&first.id));
        assert!(ids.contains(&second.id));
        assert!(listing[0].created_at >= listing[1].created_at);
    }

    #[test]
    fn missing_answer_table_is_not_found() {
        let mut service = PuzzleService::new();
        let public = service.generate(&params(7), &candidates()).expect("generate");

        // Strip the answer table behind the service's back.
        let mut record = service.get_record(public.id).expect("record");
        record.answers.clear();
        service.import(&record).expect("import");

        assert!(matches!(
            service.check(public.id, &BTreeMap::new()),
            Err(KurosuError::NotFound(_))
        ));
        assert!(matches!(
            service.hint(public.id, 1, Orientation::Across),
            Err(KurosuError::NotFound(_))
        ));
    }
}
