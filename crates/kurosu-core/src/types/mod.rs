//! # Core Type Definitions
//!
//! This module contains all core types for the kurosu crossword substrate:
//! - The grapheme and cell model (`Grapheme`, `Cell`)
//! - Word material (`CandidateWord`, `PlacedWord`, `ClueEntry`, `Clues`)
//! - Keys and identifiers (`Orientation`, `ClueKey`, `PuzzleId`)
//! - Error types (`KurosuError`)
//!
//! ## Determinism Guarantees
//!
//! Types that participate in scoring or serialization implement `Ord`
//! where ordering matters, so `BTreeMap`/`BTreeSet` containers and sorted
//! output stay deterministic for a given seed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// GRAPHEME
// =============================================================================

/// One normalized character as seen by the solver; the unit of cell content.
///
/// After normalization this is full-width katakana, the prolonged-sound
/// mark ー, an ASCII capital, or a digit. Graphemes are compared by
/// equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grapheme(pub char);

impl Grapheme {
    /// Get the underlying scalar.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Grapheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ORIENTATION
// =============================================================================

/// Direction of a placed word: `across` (left-to-right) or `down`
/// (top-to-bottom).
///
/// The wire representation is the literal lowercase word; answer keys are
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Across,
    Down,
}

impl Orientation {
    /// The literal key fragment for this orientation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Across => "across",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = KurosuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "across" => Ok(Self::Across),
            "down" => Ok(Self::Down),
            other => Err(KurosuError::BadRequest(format!(
                "invalid orientation: {other:?}"
            ))),
        }
    }
}

// =============================================================================
// CLUE KEY
// =============================================================================

/// Key into the answer table: `"{number}-{orientation}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClueKey {
    /// Clue number as assigned in reading order, starting at 1.
    pub number: u32,
    /// Word direction.
    pub orientation: Orientation,
}

impl ClueKey {
    /// Create a new key.
    #[must_use]
    pub const fn new(number: u32, orientation: Orientation) -> Self {
        Self {
            number,
            orientation,
        }
    }
}

impl fmt::Display for ClueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.number, self.orientation)
    }
}

impl FromStr for ClueKey {
    type Err = KurosuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, orientation) = s
            .split_once('-')
            .ok_or_else(|| KurosuError::BadRequest(format!("invalid clue key: {s:?}")))?;
        let number: u32 = number
            .parse()
            .map_err(|_| KurosuError::BadRequest(format!("invalid clue number in key: {s:?}")))?;
        Ok(Self::new(number, orientation.parse()?))
    }
}

// =============================================================================
// PUZZLE ID
// =============================================================================

/// Opaque unique handle for a persisted puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PuzzleId(pub Uuid);

impl PuzzleId {
    /// Mint a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PuzzleId {
    type Err = KurosuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| KurosuError::BadRequest(format!("invalid puzzle id: {s:?}")))
    }
}

// =============================================================================
// CANDIDATE WORD
// =============================================================================

/// Input material for synthesis: a raw answer, its clue, and an optional
/// back-reference to the news article the pair was generated from.
///
/// The reference is strictly one-way; articles never reference puzzles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateWord {
    /// Raw answer text; normalized by the synthesizer before any use.
    pub answer: String,
    /// Natural-language clue. Opaque to the core.
    pub clue: String,
    /// Opaque handle to the source article, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_ref: Option<String>,
}

impl CandidateWord {
    /// Create a candidate without an article reference.
    #[must_use]
    pub fn new(answer: impl Into<String>, clue: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            clue: clue.into(),
            article_ref: None,
        }
    }

    /// Create a candidate with an article reference.
    #[must_use]
    pub fn with_article(
        answer: impl Into<String>,
        clue: impl Into<String>,
        article_ref: impl Into<String>,
    ) -> Self {
        Self {
            answer: answer.into(),
            clue: clue.into(),
            article_ref: Some(article_ref.into()),
        }
    }
}

// =============================================================================
// CELL
// =============================================================================

/// One grid cell.
///
/// `number` is present only if this cell is the start of at least one
/// across or down word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    /// No letter; rendered opaque.
    Blocked,
    /// A letter cell, optionally carrying a clue number.
    Letter {
        grapheme: Grapheme,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number: Option<u32>,
    },
}

impl Cell {
    /// Whether this cell carries a letter.
    #[must_use]
    pub const fn is_letter(self) -> bool {
        matches!(self, Self::Letter { .. })
    }

    /// Whether this cell is blocked.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// The grapheme in this cell, if any.
    #[must_use]
    pub const fn grapheme(self) -> Option<Grapheme> {
        match self {
            Self::Letter { grapheme, .. } => Some(grapheme),
            Self::Blocked => None,
        }
    }
}

// =============================================================================
// PLACED WORD
// =============================================================================

/// A word written onto the grid, wholly owned by the puzzle record.
///
/// `answer` is the normalized grapheme string; the candidate it was built
/// from is no longer referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub answer: String,
    pub clue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_ref: Option<String>,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    /// Grapheme count of `answer`.
    pub length: usize,
    /// Clue number at the starting cell.
    pub number: u32,
}

impl PlacedWord {
    /// The answer key for this word.
    #[must_use]
    pub const fn key(&self) -> ClueKey {
        ClueKey::new(self.number, self.orientation)
    }
}

// =============================================================================
// CLUE LISTS
// =============================================================================

/// One entry in an across/down clue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    pub number: u32,
    pub clue: String,
    pub length: usize,
    pub row: usize,
    pub col: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_ref: Option<String>,
}

/// The numbered clue lists, each in ascending-number order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clues {
    pub across: Vec<ClueEntry>,
    pub down: Vec<ClueEntry>,
}

impl Clues {
    /// Total number of clues across both lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.across.len() + self.down.len()
    }

    /// Whether both lists are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.across.is_empty() && self.down.is_empty()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the kurosu core.
///
/// - No silent failures except the documented size clamp
/// - Use `Result<T, KurosuError>` for fallible operations
/// - The core never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum KurosuError {
    /// After normalization and filtering no buildable word set remains,
    /// or no attempt placed a single word.
    #[error("insufficient words to build a puzzle")]
    InsufficientWords,

    /// An operation referenced an unknown puzzle id.
    #[error("puzzle not found: {0}")]
    NotFound(PuzzleId),

    /// `hint` referenced a (number, orientation) pair absent from the
    /// stored answer table.
    #[error("unknown clue: {0}-{1}")]
    UnknownClue(u32, Orientation),

    /// A request was missing required fields or carried malformed values.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// An I/O or storage-backend error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
