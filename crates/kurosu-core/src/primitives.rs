//! # Innate Constants
//!
//! Hardcoded runtime constants for the kurosu CORE.
//!
//! These values are compiled into the binary and immutable at runtime.
//! They bound both the synthesis search and the input surface.

/// Smallest grid size accepted by the generation driver.
///
/// Requests below this are clamped, not rejected.
pub const MIN_GRID_SIZE: usize = 5;

/// Largest grid size accepted by the generation driver.
///
/// Requests above this are clamped, not rejected.
pub const MAX_GRID_SIZE: usize = 15;

/// Minimum grapheme length of a usable answer.
///
/// Single-grapheme answers cannot intersect anything and are filtered out.
pub const MIN_ANSWER_GRAPHEMES: usize = 2;

/// Number of independent synthesis attempts per build.
pub const MAX_ATTEMPTS: usize = 100;

/// Fill-rate goal: synthesis exits early once this percentage of cells
/// carries a letter and the word-count target is met.
pub const TARGET_DENSITY_PERCENT: usize = 80;

/// Maximum grapheme length of candidates admitted to the edge-fill pass.
///
/// Short words are the only ones worth placing without an intersection;
/// longer ones would fence off too much of the grid.
pub const EDGE_FILL_MAX_GRAPHEMES: usize = 3;

/// Hint placeholder for unrevealed graphemes: full-width underscore U+FF3F.
pub const HINT_PLACEHOLDER: char = '＿';

/// Magic bytes for the kurosu binary puzzle format header.
pub const MAGIC_BYTES: &[u8; 4] = b"KURO";

/// Current serialization format version.
///
/// Increment this when making breaking changes to the puzzle file format.
pub const FORMAT_VERSION: u8 = 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of candidate words accepted per generation request.
///
/// Requests beyond this are rejected to bound synthesis time and memory.
pub const MAX_CANDIDATE_WORDS: usize = 1000;

/// Maximum byte length for a clue string.
///
/// Clues longer than this are rejected at the boundary.
pub const MAX_CLUE_LENGTH: usize = 1024;

/// Maximum byte length for a raw answer string.
pub const MAX_ANSWER_LENGTH: usize = 256;

/// Minimum number of words a puzzle should reach for a given grid size.
///
/// Small grids saturate quickly; larger grids need more material before
/// the layout reads as a real crossword.
#[must_use]
pub const fn min_word_target(size: usize) -> usize {
    match size {
        0..=7 => 6,
        8..=10 => 18,
        11..=12 => 25,
        _ => 35,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_bounds_ordered() {
        assert!(MIN_GRID_SIZE < MAX_GRID_SIZE);
    }

    #[test]
    fn word_target_table() {
        assert_eq!(min_word_target(5), 6);
        assert_eq!(min_word_target(7), 6);
        assert_eq!(min_word_target(8), 18);
        assert_eq!(min_word_target(10), 18);
        assert_eq!(min_word_target(11), 25);
        assert_eq!(min_word_target(12), 25);
        assert_eq!(min_word_target(13), 35);
        assert_eq!(min_word_target(15), 35);
    }

    #[test]
    fn hint_placeholder_is_fullwidth_underscore() {
        assert_eq!(HINT_PLACEHOLDER as u32, 0xFF3F);
    }
}
