//! # Placement Engine
//!
//! Enumerates and scores candidate positions for a word against a partial
//! grid, enforcing the structural invariants that distinguish a crossword
//! from arbitrary letter placements:
//!
//! - *Termination*: the in-bounds cell before the first and after the
//!   last grapheme of a placed word is blocked.
//! - *Adjacency*: a newly written cell may not sit orthogonally next to a
//!   letter of another word unless the two words share that cell.
//!
//! The engine is pure over its inputs; all grid mutation happens in
//! [`PlacementEngine::place`] after a successful check.

use crate::grid::Grid;
use crate::types::{Cell, Grapheme, Orientation};
use std::collections::BTreeSet;

// =============================================================================
// PLACEMENT
// =============================================================================

/// A candidate position for a word: start cell, direction, and how many
/// existing letters the word would cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    /// Number of cells shared with already-placed words.
    pub intersections: usize,
}

impl Placement {
    /// Step deltas for the placement's orientation.
    #[must_use]
    const fn deltas(orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Across => (0, 1),
            Orientation::Down => (1, 0),
        }
    }

    /// Whether the start or end of the run lies on a grid edge.
    #[must_use]
    pub fn touches_edge(&self, len: usize, size: usize) -> bool {
        let (dr, dc) = Self::deltas(self.orientation);
        let end_row = self.row + dr * (len - 1);
        let end_col = self.col + dc * (len - 1);
        self.row == 0 || self.col == 0 || end_row == size - 1 || end_col == size - 1
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// The placement engine: placement legality, enumeration, and writes.
pub struct PlacementEngine;

impl PlacementEngine {
    /// Decide whether `word` may occupy the run starting at `(row, col)`
    /// in `orientation`.
    ///
    /// True iff the run is in bounds, terminated by blocked cells (or the
    /// grid edge) at both ends, every overlapped letter matches the
    /// word's grapheme at that position, every newly written cell has
    /// blocked perpendicular neighbours, and — when
    /// `require_intersection` — at least one cell is shared with an
    /// existing word.
    #[must_use]
    pub fn can_place(
        grid: &Grid,
        word: &[Grapheme],
        row: usize,
        col: usize,
        orientation: Orientation,
        require_intersection: bool,
    ) -> bool {
        Self::check(grid, word, row, col, orientation, require_intersection).is_some()
    }

    /// Like [`Self::can_place`], but returns the intersection count.
    fn check(
        grid: &Grid,
        word: &[Grapheme],
        row: usize,
        col: usize,
        orientation: Orientation,
        require_intersection: bool,
    ) -> Option<usize> {
        let len = word.len();
        if len == 0 {
            return None;
        }

        let (dr, dc) = Placement::deltas(orientation);
        let end_row = row + dr * (len - 1);
        let end_col = col + dc * (len - 1);
        if end_row >= grid.size() || end_col >= grid.size() {
            return None;
        }

        // Termination: the cells just before and just after the run must
        // be blocked when they exist.
        let before = (row as isize - dr as isize, col as isize - dc as isize);
        let after = (
            end_row as isize + dr as isize,
            end_col as isize + dc as isize,
        );
        if !grid.is_blocked_or_edge(before.0, before.1) || !grid.is_blocked_or_edge(after.0, after.1)
        {
            return None;
        }

        let mut intersections = 0;
        for (i, &g) in word.iter().enumerate() {
            let r = row + dr * i;
            let c = col + dc * i;
            match grid.get(r, c)? {
                Cell::Letter { grapheme, .. } => {
                    if grapheme != g {
                        return None;
                    }
                    intersections += 1;
                }
                Cell::Blocked => {
                    // Adjacency: a fresh letter may not run alongside an
                    // existing one.
                    let (pr, pc) = (dc as isize, dr as isize);
                    let side_a = (r as isize - pr, c as isize - pc);
                    let side_b = (r as isize + pr, c as isize + pc);
                    if !grid.is_blocked_or_edge(side_a.0, side_a.1)
                        || !grid.is_blocked_or_edge(side_b.0, side_b.1)
                    {
                        return None;
                    }
                }
            }
        }

        if require_intersection && intersections == 0 {
            return None;
        }
        Some(intersections)
    }

    /// Enumerate all valid placements for `word`.
    ///
    /// The primary strategy anchors on every placed letter cell matching
    /// a grapheme of the word. When that yields nothing and
    /// `require_intersection` is false, the engine falls back to a full
    /// scan of every start cell and orientation.
    ///
    /// The result is sorted by intersections descending, with a fixed
    /// `(row, col, orientation)` tiebreak so the order is deterministic.
    #[must_use]
    pub fn find_placements(
        grid: &Grid,
        word: &[Grapheme],
        require_intersection: bool,
    ) -> Vec<Placement> {
        let mut candidates: BTreeSet<(usize, usize, Orientation)> = BTreeSet::new();

        for (r, c, g) in grid.letter_cells() {
            for (i, &wg) in word.iter().enumerate() {
                if wg != g {
                    continue;
                }
                // Align word position i onto the anchor cell.
                if c >= i {
                    candidates.insert((r, c - i, Orientation::Across));
                }
                if r >= i {
                    candidates.insert((r - i, c, Orientation::Down));
                }
            }
        }

        let mut placements: Vec<Placement> = candidates
            .into_iter()
            .filter_map(|(row, col, orientation)| {
                Self::check(grid, word, row, col, orientation, require_intersection).map(
                    |intersections| Placement {
                        row,
                        col,
                        orientation,
                        intersections,
                    },
                )
            })
            .collect();

        if placements.is_empty() && !require_intersection {
            for row in 0..grid.size() {
                for col in 0..grid.size() {
                    for orientation in [Orientation::Across, Orientation::Down] {
                        if let Some(intersections) =
                            Self::check(grid, word, row, col, orientation, false)
                        {
                            placements.push(Placement {
                                row,
                                col,
                                orientation,
                                intersections,
                            });
                        }
                    }
                }
            }
        }

        placements.sort_by(|a, b| {
            b.intersections
                .cmp(&a.intersections)
                .then_with(|| a.row.cmp(&b.row))
                .then_with(|| a.col.cmp(&b.col))
                .then_with(|| a.orientation.cmp(&b.orientation))
        });
        placements
    }

    /// Write the graphemes onto the grid.
    ///
    /// Must be preceded by a successful [`Self::can_place`] check;
    /// behavior otherwise undefined. Numbers are assigned later by the
    /// numbering pass, so every written cell carries `number: None`.
    pub fn place(
        grid: &mut Grid,
        word: &[Grapheme],
        row: usize,
        col: usize,
        orientation: Orientation,
    ) {
        let (dr, dc) = Placement::deltas(orientation);
        for (i, &g) in word.iter().enumerate() {
            // In-bounds per the preceding can_place; a failed write here
            // would mean the caller skipped it.
            let _ = grid.set(
                row + dr * i,
                col + dc * i,
                Cell::Letter {
                    grapheme: g,
                    number: None,
                },
            );
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn word(s: &str) -> Vec<Grapheme> {
        normalize(s)
    }

    fn grid_with(entries: &[(&str, usize, usize, Orientation)]) -> Grid {
        let mut grid = Grid::new(7);
        for (s, row, col, orientation) in entries {
            let w = word(s);
            assert!(
                PlacementEngine::can_place(&grid, &w, *row, *col, *orientation, false),
                "test fixture placement invalid: {s} at ({row},{col})"
            );
            PlacementEngine::place(&mut grid, &w, *row, *col, *orientation);
        }
        grid
    }

    #[test]
    fn place_on_empty_grid() {
        let grid = Grid::new(7);
        assert!(PlacementEngine::can_place(
            &grid,
            &word("ネコ"),
            3,
            2,
            Orientation::Across,
            false
        ));
        // But an intersection cannot be required on an empty grid.
        assert!(!PlacementEngine::can_place(
            &grid,
            &word("ネコ"),
            3,
            2,
            Orientation::Across,
            true
        ));
    }

    #[test]
    fn out_of_bounds_rejected() {
        let grid = Grid::new(5);
        assert!(!PlacementEngine::can_place(
            &grid,
            &word("ウクライナ"),
            0,
            1,
            Orientation::Across,
            false
        ));
        assert!(!PlacementEngine::can_place(
            &grid,
            &word("ウクライナ"),
            1,
            0,
            Orientation::Down,
            false
        ));
        // Exactly fits.
        assert!(PlacementEngine::can_place(
            &grid,
            &word("ウクライナ"),
            0,
            0,
            Orientation::Across,
            false
        ));
    }

    #[test]
    fn termination_invariant_enforced() {
        let grid = grid_with(&[("ネコ", 3, 2, Orientation::Across)]);
        // Head-to-tail in the same row: the new word's first cell is
        // immediately after the existing word's last cell.
        assert!(!PlacementEngine::can_place(
            &grid,
            &word("コト"),
            3,
            4,
            Orientation::Across,
            false
        ));
        // One blocked cell of separation is enough.
        assert!(PlacementEngine::can_place(
            &grid,
            &word("コト"),
            3,
            5,
            Orientation::Across,
            false
        ));
    }

    #[test]
    fn adjacency_invariant_rejects_side_by_side() {
        // S5: ネコ at (0,0)-(0,1); リス directly below must be rejected.
        let mut grid = Grid::new(7);
        PlacementEngine::place(&mut grid, &word("ネコ"), 0, 0, Orientation::Across);
        assert!(!PlacementEngine::can_place(
            &grid,
            &word("リス"),
            1,
            0,
            Orientation::Across,
            false
        ));
    }

    #[test]
    fn crossing_placement_accepted() {
        let grid = grid_with(&[("ネコ", 3, 2, Orientation::Across)]);
        // コト down through the コ cell at (3,3).
        assert!(PlacementEngine::can_place(
            &grid,
            &word("コト"),
            3,
            3,
            Orientation::Down,
            true
        ));
        // Mismatched grapheme on the shared cell.
        assert!(!PlacementEngine::can_place(
            &grid,
            &word("トリ"),
            3,
            3,
            Orientation::Down,
            false
        ));
    }

    #[test]
    fn find_placements_anchors_on_intersections() {
        let grid = grid_with(&[("ネコ", 3, 2, Orientation::Across)]);
        let placements = PlacementEngine::find_placements(&grid, &word("コト"), true);
        assert!(!placements.is_empty());
        // Best placement crosses at the コ cell.
        let best = placements[0];
        assert_eq!(best.intersections, 1);
        assert_eq!(
            (best.row, best.col, best.orientation),
            (3, 3, Orientation::Down)
        );
    }

    #[test]
    fn find_placements_requires_intersection_when_asked() {
        let grid = grid_with(&[("ネコ", 3, 2, Orientation::Across)]);
        let placements = PlacementEngine::find_placements(&grid, &word("リス"), true);
        assert!(placements.is_empty());
    }

    #[test]
    fn find_placements_falls_back_to_full_scan() {
        let grid = Grid::new(5);
        let placements = PlacementEngine::find_placements(&grid, &word("ネコ"), false);
        assert!(!placements.is_empty());
        assert!(placements.iter().all(|p| p.intersections == 0));
    }

    #[test]
    fn find_placements_sorted_by_intersections_then_position() {
        let grid = grid_with(&[
            ("ネコ", 3, 2, Orientation::Across),
            ("コト", 3, 3, Orientation::Down),
        ]);
        let placements = PlacementEngine::find_placements(&grid, &word("トマト"), true);
        for pair in placements.windows(2) {
            assert!(pair[0].intersections >= pair[1].intersections);
            if pair[0].intersections == pair[1].intersections {
                let a = (pair[0].row, pair[0].col, pair[0].orientation);
                let b = (pair[1].row, pair[1].col, pair[1].orientation);
                assert!(a < b);
            }
        }
    }

    #[test]
    fn place_writes_graphemes() {
        let mut grid = Grid::new(7);
        PlacementEngine::place(&mut grid, &word("ネコ"), 3, 2, Orientation::Across);
        assert_eq!(grid.get(3, 2).and_then(Cell::grapheme), Some(Grapheme('ネ')));
        assert_eq!(grid.get(3, 3).and_then(Cell::grapheme), Some(Grapheme('コ')));
        assert_eq!(grid.letter_count(), 2);
    }

    #[test]
    fn touches_edge() {
        let p = Placement {
            row: 0,
            col: 2,
            orientation: Orientation::Across,
            intersections: 0,
        };
        assert!(p.touches_edge(2, 7));

        let mid = Placement {
            row: 3,
            col: 2,
            orientation: Orientation::Across,
            intersections: 0,
        };
        assert!(!mid.touches_edge(2, 7));
        // Run ending on the last column counts.
        let ends = Placement {
            row: 3,
            col: 5,
            orientation: Orientation::Across,
            intersections: 0,
        };
        assert!(ends.touches_edge(2, 7));
    }
}
