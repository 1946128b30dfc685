//! # Synthesizer
//!
//! Randomized multi-attempt driver that fills a grid from a bag of
//! candidate words and selects the best result by a density-dominated
//! score.
//!
//! Synthesis is a pure function of `(candidates, size, seed)`: no I/O,
//! no suspension points, single-threaded. Callers that serve requests
//! dispatch it to a blocking worker; the core itself never yields.

use crate::grid::Grid;
use crate::normalize::{normalize, normalize_to_string};
use crate::placement::PlacementEngine;
use crate::primitives::{
    EDGE_FILL_MAX_GRAPHEMES, MAX_ATTEMPTS, MIN_ANSWER_GRAPHEMES, TARGET_DENSITY_PERCENT,
    min_word_target,
};
use crate::types::{CandidateWord, Grapheme, KurosuError, Orientation};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Tuning for one synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Grid side length N.
    pub size: usize,
    /// Independent attempts before settling for the best result.
    pub max_attempts: usize,
    /// Fill-rate goal for the early exit.
    pub target_density_percent: usize,
    /// Base seed; `None` draws OS entropy once per run. Attempt `i`
    /// derives its RNG from `base + i`, so a logged base seed reproduces
    /// the whole run.
    pub seed: Option<u64>,
    /// Optional wall-clock budget, checked between attempts.
    pub time_budget: Option<Duration>,
}

impl SynthesisConfig {
    /// Default configuration for a grid of the given size.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            max_attempts: MAX_ATTEMPTS,
            target_density_percent: TARGET_DENSITY_PERCENT,
            seed: None,
            time_budget: None,
        }
    }

    /// Fix the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound the run by wall-clock time.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Minimum placed-word count this configuration aims for.
    #[must_use]
    pub fn word_target(&self) -> usize {
        min_word_target(self.size)
    }
}

// =============================================================================
// SYNTHESIS OUTPUT
// =============================================================================

/// A word placed during synthesis, not yet numbered.
///
/// Numbering happens in a later pass over the finished grid; only then
/// does this become a `PlacedWord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCandidate {
    /// Normalized answer string.
    pub answer: String,
    pub clue: String,
    pub article_ref: Option<String>,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    /// Grapheme count of `answer`.
    pub length: usize,
}

/// The best grid found across all attempts, plus its placements.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub grid: Grid,
    pub placed: Vec<PlacedCandidate>,
    /// Index of the attempt that produced this result.
    pub attempt: usize,
}

// =============================================================================
// INTERNAL WORD MATERIAL
// =============================================================================

/// A candidate after normalization, ready for placement.
#[derive(Debug, Clone)]
struct WordEntry {
    answer: String,
    graphemes: Vec<Grapheme>,
    clue: String,
    article_ref: Option<String>,
}

// =============================================================================
// SYNTHESIZER
// =============================================================================

/// The multi-attempt synthesis driver.
pub struct Synthesizer;

impl Synthesizer {
    /// Build a grid from `candidates`, or fail with
    /// [`KurosuError::InsufficientWords`] when no placement can be built.
    pub fn synthesize(
        candidates: &[CandidateWord],
        config: &SynthesisConfig,
    ) -> Result<SynthesisResult, KurosuError> {
        let words = Self::prepare(candidates, config.size);
        if words.is_empty() {
            return Err(KurosuError::InsufficientWords);
        }

        let base_seed = match config.seed {
            Some(seed) => seed,
            None => StdRng::from_os_rng().random(),
        };

        let started = Instant::now();
        let mut best: Option<SynthesisResult> = None;

        for attempt in 0..config.max_attempts {
            if let Some(budget) = config.time_budget
                && started.elapsed() >= budget
            {
                break;
            }

            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(attempt as u64));
            let Some((grid, placed)) = Self::attempt(&words, config.size, &mut rng) else {
                continue;
            };

            let better = match &best {
                None => true,
                Some(current) => {
                    let (letters, count) = (grid.letter_count(), placed.len());
                    let (best_letters, best_count) =
                        (current.grid.letter_count(), current.placed.len());
                    letters > best_letters || (letters == best_letters && count > best_count)
                }
            };
            if better {
                best = Some(SynthesisResult {
                    grid,
                    placed,
                    attempt,
                });
            }

            if let Some(current) = &best
                && current
                    .grid
                    .meets_density_percent(config.target_density_percent)
                && current.placed.len() >= config.word_target()
            {
                break;
            }
        }

        match best {
            Some(result) if !result.placed.is_empty() => Ok(result),
            _ => Err(KurosuError::InsufficientWords),
        }
    }

    /// Normalize, filter, dedup, and order the candidate material.
    ///
    /// Lengths 3–5 come first (they yield the most intersections per
    /// cell); the remainder is sorted shorter-first. Both orderings are
    /// stable, so input order breaks ties.
    fn prepare(candidates: &[CandidateWord], size: usize) -> Vec<WordEntry> {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut words: Vec<WordEntry> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let graphemes = normalize(&candidate.answer);
            let len = graphemes.len();
            if len < MIN_ANSWER_GRAPHEMES || len > size {
                continue;
            }
            let answer = normalize_to_string(&candidate.answer);
            if !seen.insert(answer.clone()) {
                continue;
            }
            words.push(WordEntry {
                answer,
                graphemes,
                clue: candidate.clue.clone(),
                article_ref: candidate.article_ref.clone(),
            });
        }

        words.sort_by_key(|w| {
            let len = w.graphemes.len();
            if (3..=5).contains(&len) {
                (0, 0)
            } else {
                (1, len)
            }
        });
        words
    }

    /// One independent attempt: shuffle, seed the center, fill by
    /// intersections, then patch edges with short leftovers.
    fn attempt(
        words: &[WordEntry],
        size: usize,
        rng: &mut StdRng,
    ) -> Option<(Grid, Vec<PlacedCandidate>)> {
        let mut order: Vec<usize> = (0..words.len()).collect();
        order.shuffle(rng);

        let mut grid = Grid::new(size);
        let mut placed: Vec<PlacedCandidate> = Vec::new();
        let mut placed_idx: BTreeSet<usize> = BTreeSet::new();

        // Seed word: horizontal, centered.
        let first = &words[order[0]];
        let seed_row = size / 2;
        let seed_col = (size - first.graphemes.len()) / 2;
        if !PlacementEngine::can_place(
            &grid,
            &first.graphemes,
            seed_row,
            seed_col,
            Orientation::Across,
            false,
        ) {
            return None;
        }
        PlacementEngine::place(
            &mut grid,
            &first.graphemes,
            seed_row,
            seed_col,
            Orientation::Across,
        );
        placed.push(Self::record(first, seed_row, seed_col, Orientation::Across));
        placed_idx.insert(order[0]);

        // Main pass: every remaining word must cross something.
        for &idx in &order[1..] {
            let entry = &words[idx];
            let placements = PlacementEngine::find_placements(&grid, &entry.graphemes, true);
            if let Some(p) = placements.first() {
                PlacementEngine::place(&mut grid, &entry.graphemes, p.row, p.col, p.orientation);
                placed.push(Self::record(entry, p.row, p.col, p.orientation));
                placed_idx.insert(idx);
            }
        }

        // Edge-fill pass: short leftovers may sit on an edge without a
        // crossing, as long as every structural invariant still holds.
        for &idx in &order {
            if placed_idx.contains(&idx) {
                continue;
            }
            let entry = &words[idx];
            let len = entry.graphemes.len();
            if len > EDGE_FILL_MAX_GRAPHEMES {
                continue;
            }
            let candidate = PlacementEngine::find_placements(&grid, &entry.graphemes, false)
                .into_iter()
                .find(|p| p.touches_edge(len, size));
            if let Some(p) = candidate {
                PlacementEngine::place(&mut grid, &entry.graphemes, p.row, p.col, p.orientation);
                placed.push(Self::record(entry, p.row, p.col, p.orientation));
                placed_idx.insert(idx);
            }
        }

        Some((grid, placed))
    }

    fn record(
        entry: &WordEntry,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> PlacedCandidate {
        PlacedCandidate {
            answer: entry.answer.clone(),
            clue: entry.clue.clone(),
            article_ref: entry.article_ref.clone(),
            row,
            col,
            orientation,
            length: entry.graphemes.len(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(pairs: &[(&str, &str)]) -> Vec<CandidateWord> {
        pairs
            .iter()
            .map(|(a, c)| CandidateWord::new(*a, *c))
            .collect()
    }

    #[test]
    fn trivial_three_word_set_builds() {
        let input = candidates(&[("ネコ", "cat"), ("コト", "thing"), ("トリ", "bird")]);
        let config = SynthesisConfig::new(7).with_seed(1);
        let result = Synthesizer::synthesize(&input, &config).expect("synthesize");
        assert_eq!(result.placed.len(), 3);
        assert!(result.grid.letter_count() >= 5);
    }

    #[test]
    fn empty_candidates_fail() {
        let config = SynthesisConfig::new(7).with_seed(1);
        let err = Synthesizer::synthesize(&[], &config).expect_err("must fail");
        assert!(matches!(err, KurosuError::InsufficientWords));
    }

    #[test]
    fn single_grapheme_answers_filtered_out() {
        // S4: a length-1 candidate leaves nothing to place.
        let input = candidates(&[("ア", "A")]);
        let config = SynthesisConfig::new(7).with_seed(1);
        let err = Synthesizer::synthesize(&input, &config).expect_err("must fail");
        assert!(matches!(err, KurosuError::InsufficientWords));
    }

    #[test]
    fn over_long_answers_filtered_out() {
        let input = candidates(&[("アイウエオカキクケコサシ", "too long")]);
        let config = SynthesisConfig::new(5).with_seed(1);
        assert!(Synthesizer::synthesize(&input, &config).is_err());
    }

    #[test]
    fn duplicates_after_normalization_collapse() {
        // ねこ and ネコ normalize identically; only one can be placed.
        let input = candidates(&[("ねこ", "cat-hira"), ("ネコ", "cat-kata"), ("コト", "thing")]);
        let config = SynthesisConfig::new(7).with_seed(3);
        let result = Synthesizer::synthesize(&input, &config).expect("synthesize");
        let cats: Vec<_> = result
            .placed
            .iter()
            .filter(|p| p.answer == "ネコ")
            .collect();
        assert_eq!(cats.len(), 1);
        // First occurrence wins.
        assert_eq!(cats[0].clue, "cat-hira");
    }

    #[test]
    fn deterministic_under_seed() {
        let input = candidates(&[
            ("ネコ", "cat"),
            ("コト", "thing"),
            ("トリ", "bird"),
            ("リス", "squirrel"),
            ("スイカ", "melon"),
            ("カラス", "crow"),
        ]);
        let config = SynthesisConfig::new(9).with_seed(42);
        let a = Synthesizer::synthesize(&input, &config).expect("synthesize");
        let b = Synthesizer::synthesize(&input, &config).expect("synthesize");
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.placed, b.placed);
        assert_eq!(a.attempt, b.attempt);
    }

    #[test]
    fn placed_words_lie_on_the_grid() {
        let input = candidates(&[
            ("ネコ", "cat"),
            ("コト", "thing"),
            ("トリ", "bird"),
            ("リス", "squirrel"),
        ]);
        let config = SynthesisConfig::new(7).with_seed(7);
        let result = Synthesizer::synthesize(&input, &config).expect("synthesize");

        for word in &result.placed {
            for (i, g) in normalize(&word.answer).into_iter().enumerate() {
                let (r, c) = match word.orientation {
                    Orientation::Across => (word.row, word.col + i),
                    Orientation::Down => (word.row + i, word.col),
                };
                assert_eq!(
                    result.grid.get(r, c).and_then(|cell| cell.grapheme()),
                    Some(g),
                    "grid letter mismatch for {} at ({r},{c})",
                    word.answer
                );
            }
        }
    }

    #[test]
    fn time_budget_zero_returns_insufficient() {
        let input = candidates(&[("ネコ", "cat"), ("コト", "thing")]);
        let config = SynthesisConfig::new(7)
            .with_seed(1)
            .with_time_budget(Duration::ZERO);
        // No attempt runs, so no placements exist.
        assert!(Synthesizer::synthesize(&input, &config).is_err());
    }
}
