//! # Clue Numbering
//!
//! Assigns clue numbers over the finished grid in standard reading
//! order and splits placements into across/down clue lists.
//!
//! Numbering is computed from the final grid contents, never from
//! placement order, so two grids with the same letters always number
//! identically.

use crate::grid::Grid;
use crate::synthesis::PlacedCandidate;
use crate::types::{Cell, Clues, ClueEntry, KurosuError, Orientation, PlacedWord};
use std::collections::BTreeMap;

/// Scan the grid in reading order and assign sequential numbers to every
/// cell that starts an across or down word.
///
/// Returns the `(row, col) -> number` map; the grid's letter cells are
/// updated in place. A cell that starts both directions gets one number.
pub fn assign_numbers(grid: &mut Grid) -> BTreeMap<(usize, usize), u32> {
    let size = grid.size();
    let mut numbers = BTreeMap::new();
    let mut next = 1u32;

    for row in 0..size {
        for col in 0..size {
            if !grid.is_letter(row, col) {
                continue;
            }

            let starts_across = (col == 0 || !grid.is_letter(row, col - 1))
                && col + 1 < size
                && grid.is_letter(row, col + 1);
            let starts_down = (row == 0 || !grid.is_letter(row - 1, col))
                && row + 1 < size
                && grid.is_letter(row + 1, col);

            if starts_across || starts_down {
                numbers.insert((row, col), next);
                if let Some(Cell::Letter { grapheme, .. }) = grid.get(row, col) {
                    let _ = grid.set(
                        row,
                        col,
                        Cell::Letter {
                            grapheme,
                            number: Some(next),
                        },
                    );
                }
                next += 1;
            }
        }
    }

    numbers
}

/// Number a synthesis result: write numbers onto the grid, attach each
/// placement's number, and build the across/down clue lists.
pub fn number_puzzle(
    grid: &mut Grid,
    placed: Vec<PlacedCandidate>,
) -> Result<(Vec<PlacedWord>, Clues), KurosuError> {
    let numbers = assign_numbers(grid);

    let mut words = Vec::with_capacity(placed.len());
    for p in placed {
        let number = *numbers.get(&(p.row, p.col)).ok_or_else(|| {
            KurosuError::SerializationError(format!(
                "placed word {:?} at ({}, {}) has no numbered start cell",
                p.answer, p.row, p.col
            ))
        })?;
        words.push(PlacedWord {
            answer: p.answer,
            clue: p.clue,
            article_ref: p.article_ref,
            row: p.row,
            col: p.col,
            orientation: p.orientation,
            length: p.length,
            number,
        });
    }

    let mut clues = Clues::default();
    for word in &words {
        let entry = ClueEntry {
            number: word.number,
            clue: word.clue.clone(),
            length: word.length,
            row: word.row,
            col: word.col,
            article_ref: word.article_ref.clone(),
        };
        match word.orientation {
            Orientation::Across => clues.across.push(entry),
            Orientation::Down => clues.down.push(entry),
        }
    }
    clues.across.sort_by_key(|e| e.number);
    clues.down.sort_by_key(|e| e.number);

    Ok((words, clues))
}

// =============================================================================
// TESTS
// =============================================================================
