//! # Puzzle Record & Play Contract
//!
//! The immutable puzzle artifact produced at synthesis completion, plus
//! the post-build operations: answer checking and hint reveal.
//!
//! The `answers` table is persisted but never crosses the external
//! interface; [`PublicPuzzle`] is the record with answers stripped.

use crate::grid::Grid;
use crate::normalize::normalize_to_string;
use crate::primitives::HINT_PLACEHOLDER;
use crate::types::{Clues, ClueKey, KurosuError, Orientation, PlacedWord, PuzzleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// PUZZLE RECORD
// =============================================================================

/// A completed puzzle. Created exactly once at synthesis completion,
/// persisted, and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub id: PuzzleId,
    pub title: String,
    /// Grid side length N.
    pub size: usize,
    /// Creation time, unix milliseconds.
    pub created_at: u64,
    pub grid: Grid,
    pub words: Vec<PlacedWord>,
    pub clues: Clues,
    /// `"{number}-{orientation}"` key to normalized answer. Consulted
    /// only by `check` and `hint`.
    pub answers: BTreeMap<String, String>,
}

impl PuzzleRecord {
    /// Assemble a record from a numbered synthesis result.
    ///
    /// The answer table is derived from the placed words; the candidates
    /// they were built from are no longer referenced.
    #[must_use]
    pub fn assemble(
        id: PuzzleId,
        title: String,
        created_at: u64,
        grid: Grid,
        words: Vec<PlacedWord>,
        clues: Clues,
    ) -> Self {
        let answers = words
            .iter()
            .map(|w| (w.key().to_string(), w.answer.clone()))
            .collect();
        Self {
            id,
            title,
            size: grid.size(),
            created_at,
            grid,
            words,
            clues,
            answers,
        }
    }

    /// Number of placed words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The record with the answer table stripped, safe to return across
    /// the external interface.
    #[must_use]
    pub fn to_public(&self) -> PublicPuzzle {
        PublicPuzzle {
            id: self.id,
            title: self.title.clone(),
            size: self.size,
            created_at: self.created_at,
            grid: self.grid.clone(),
            clues: self.clues.clone(),
            word_count: self.words.len(),
        }
    }

    /// Classify submitted answers against the stored table.
    ///
    /// Keys absent from `user_answers` are omitted from the result;
    /// keys unknown to the puzzle are silently ignored. Comparison is
    /// always `normalize(user) == stored`.
    #[must_use]
    pub fn check(&self, user_answers: &BTreeMap<String, String>) -> CheckResult {
        let mut result = CheckResult::default();
        for (key, submitted) in user_answers {
            let Some(stored) = self.answers.get(key) else {
                continue;
            };
            if normalize_to_string(submitted) == *stored {
                result.correct.push(key.clone());
            } else {
                result.incorrect.push(key.clone());
            }
        }
        result
    }

    /// Reveal the first grapheme of a stored answer.
    ///
    /// The rest of the word is padded with full-width underscores so the
    /// hint always has the answer's grapheme length.
    pub fn hint(&self, number: u32, orientation: Orientation) -> Result<HintResult, KurosuError> {
        let key = ClueKey::new(number, orientation).to_string();
        let answer = self
            .answers
            .get(&key)
            .ok_or(KurosuError::UnknownClue(number, orientation))?;

        let total = answer.chars().count();
        let mut hint = String::new();
        for (i, c) in answer.chars().enumerate() {
            hint.push(if i == 0 { c } else { HINT_PLACEHOLDER });
        }

        Ok(HintResult {
            hint,
            revealed: 1,
            total,
        })
    }
}

// =============================================================================
// PUBLIC PUZZLE
// =============================================================================

/// A puzzle record as seen outside the persistence boundary: no answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicPuzzle {
    pub id: PuzzleId,
    pub title: String,
    pub size: usize,
    pub created_at: u64,
    pub grid: Grid,
    pub clues: Clues,
    pub word_count: usize,
}

// =============================================================================
// PLAY RESULTS
// =============================================================================

/// Result of an answer check: submitted keys bucketed by correctness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub correct: Vec<String>,
    pub incorrect: Vec<String>,
}

/// Result of a hint reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResult {
    /// First grapheme followed by `＿` padding, `total` graphemes long.
    pub hint: String,
    pub revealed: usize,
    pub total: usize,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PuzzleRecord {
        let mut grid = Grid::new(7);
        let words = vec![
            PlacedWord {
                answer: "ネコ".to_string(),
                clue: "cat".to_string(),
                article_ref: Some("article-1".to_string()),
                row: 3,
                col: 2,
                orientation: Orientation::Across,
                length: 2,
                number: 1,
            },
            PlacedWord {
                answer: "ウクライナ".to_string(),
                clue: "country".to_string(),
                article_ref: None,
                row: 0,
                col: 0,
                orientation: Orientation::Down,
                length: 5,
                number: 4,
            },
        ];
        // The grid content is irrelevant to check/hint; keep it minimal.
        let _ = grid.set(
            3,
            2,
            crate::types::Cell::Letter {
                grapheme: crate::types::Grapheme('ネ'),
                number: Some(1),
            },
        );
        PuzzleRecord::assemble(
            PuzzleId::generate(),
            "test".to_string(),
            0,
            grid,
            words,
            Clues::default(),
        )
    }

    #[test]
    fn assemble_builds_answer_table() {
        let record = sample_record();
        assert_eq!(record.answers.get("1-across").map(String::as_str), Some("ネコ"));
        assert_eq!(
            record.answers.get("4-down").map(String::as_str),
            Some("ウクライナ")
        );
        assert_eq!(record.word_count(), 2);
    }

    #[test]
    fn public_puzzle_has_no_answers() {
        let record = sample_record();
        let public = record.to_public();
        let json = serde_json::to_string(&public).expect("serialize");
        assert!(!json.contains("ウクライナ"));
        assert!(!json.contains("answers"));
        assert_eq!(public.word_count, 2);
    }

    #[test]
    fn check_round_trip() {
        let record = sample_record();
        let mut submitted = BTreeMap::new();
        submitted.insert("1-across".to_string(), "ネコ".to_string());
        submitted.insert("4-down".to_string(), "ウクライナ".to_string());

        let result = record.check(&submitted);
        assert_eq!(result.correct.len(), 2);
        assert!(result.incorrect.is_empty());
    }

    #[test]
    fn check_normalizes_user_input() {
        // S2: hiragana submission for a katakana answer is correct.
        let record = sample_record();
        let mut submitted = BTreeMap::new();
        submitted.insert("1-across".to_string(), "ねこ".to_string());

        let result = record.check(&submitted);
        assert_eq!(result.correct, vec!["1-across".to_string()]);
    }

    #[test]
    fn check_classifies_wrong_answers() {
        let record = sample_record();
        let mut submitted = BTreeMap::new();
        submitted.insert("1-across".to_string(), "イヌ".to_string());

        let result = record.check(&submitted);
        assert!(result.correct.is_empty());
        assert_eq!(result.incorrect, vec!["1-across".to_string()]);
    }

    #[test]
    fn check_ignores_unknown_keys() {
        let record = sample_record();
        let mut submitted = BTreeMap::new();
        submitted.insert("99-across".to_string(), "ネコ".to_string());

        let result = record.check(&submitted);
        assert!(result.correct.is_empty());
        assert!(result.incorrect.is_empty());
    }

    #[test]
    fn hint_shape() {
        // S3: word 4 across... stored here as 4-down with ウクライナ.
        let record = sample_record();
        let hint = record.hint(4, Orientation::Down).expect("hint");
        assert_eq!(hint.hint, "ウ＿＿＿＿");
        assert_eq!(hint.revealed, 1);
        assert_eq!(hint.total, 5);
        assert_eq!(hint.hint.chars().count(), hint.total);
    }

    #[test]
    fn hint_unknown_clue() {
        let record = sample_record();
        let err = record.hint(9, Orientation::Across).expect_err("must fail");
        assert!(matches!(err, KurosuError::UnknownClue(9, Orientation::Across)));
    }
}
