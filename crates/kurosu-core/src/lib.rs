//! # kurosu-core
//!
//! The crossword synthesis core for kurosu - THE LOGIC.
//!
//! Given a bag of candidate answer words (normalized Japanese katakana
//! strings) paired with clues, this crate fills an N×N grid by
//! randomized combinatorial search, numbers the result in reading
//! order, and serves the interactive contract: answer checking, hint
//! reveal, and persistence of immutable puzzle records.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is pure over its inputs: synthesis is a function of
//!   `(candidates, size, seed)` with no I/O and no suspension points
//! - Enforces the two structural grid invariants (adjacency,
//!   termination) in one place, the placement engine
//! - Works on normalized graphemes only; raw text never reaches the grid
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod formats;
pub mod grid;
pub mod normalize;
pub mod numbering;
pub mod placement;
pub mod primitives;
pub mod puzzle;
pub mod service;
pub mod storage;
pub mod synthesis;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    CandidateWord, Cell, ClueEntry, ClueKey, Clues, Grapheme, KurosuError, Orientation, PlacedWord,
    PuzzleId,
};

// =============================================================================
// RE-EXPORTS: Synthesis Pipeline
// =============================================================================

pub use grid::Grid;
pub use normalize::{normalize, normalize_to_string};
pub use numbering::{assign_numbers, number_puzzle};
pub use placement::{Placement, PlacementEngine};
pub use synthesis::{PlacedCandidate, SynthesisConfig, SynthesisResult, Synthesizer};

// =============================================================================
// RE-EXPORTS: Record, Service & Storage
// =============================================================================

pub use puzzle::{CheckResult, HintResult, PublicPuzzle, PuzzleRecord};
pub use service::{GenerateParams, PuzzleService};
pub use storage::{MemoryStore, PuzzleStore, PuzzleSummary, RedbStore, StoreBackend};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{ArchiveHeader, puzzle_from_bytes, puzzle_to_bytes};
