//! # Text Normalizer
//!
//! Canonicalizes Japanese answer strings and user input into the grapheme
//! sequence used for cell-by-cell comparison.
//!
//! - Hiragana is mapped to katakana
//! - Small katakana is folded to full size
//! - ASCII letters are uppercased
//! - Everything else (ー, digits, full-size katakana) passes through
//!
//! Normalization is total and idempotent; all answer comparison in the
//! core is `normalize(user) == stored`.

use crate::types::Grapheme;

/// First scalar of the hiragana block that maps onto katakana.
const HIRAGANA_FIRST: char = '\u{3041}';

/// Last scalar of the hiragana block that maps onto katakana.
const HIRAGANA_LAST: char = '\u{3096}';

/// Offset from a hiragana scalar to its katakana equivalent.
const HIRAGANA_TO_KATAKANA: u32 = 0x60;

/// Normalize one scalar.
///
/// Applied in order: hiragana shift, small-kana fold, ASCII uppercase.
/// The order matters: small hiragana first becomes small katakana, then
/// folds to full size.
#[must_use]
pub fn normalize_scalar(c: char) -> char {
    let c = if (HIRAGANA_FIRST..=HIRAGANA_LAST).contains(&c) {
        // The two kana blocks are congruent, so the shift cannot leave
        // the katakana block.
        char::from_u32(c as u32 + HIRAGANA_TO_KATAKANA).unwrap_or(c)
    } else {
        c
    };

    match c {
        'ァ' => 'ア',
        'ィ' => 'イ',
        'ゥ' => 'ウ',
        'ェ' => 'エ',
        'ォ' => 'オ',
        'ッ' => 'ツ',
        'ャ' => 'ヤ',
        'ュ' => 'ユ',
        'ョ' => 'ヨ',
        'ヮ' => 'ワ',
        other => other.to_ascii_uppercase(),
    }
}

/// Normalize a string into its grapheme sequence.
///
/// The output length is the grapheme count used by every downstream
/// length check and bound.
#[must_use]
pub fn normalize(input: &str) -> Vec<Grapheme> {
    input.chars().map(|c| Grapheme(normalize_scalar(c))).collect()
}

/// Normalize a string into a `String`.
///
/// Convenience for the answer table and wire formats; equivalent to
/// collecting [`normalize`].
#[must_use]
pub fn normalize_to_string(input: &str) -> String {
    input.chars().map(normalize_scalar).collect()
}

// =============================================================================
// TESTS
// =============================================================================
