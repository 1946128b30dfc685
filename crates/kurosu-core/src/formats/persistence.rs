//! # Persistence Format
//!
//! Binary archive format for a single puzzle record: a fixed preamble
//! followed by a postcard payload.
//!
//! The preamble packs the magic word and the format version into six
//! little-endian bytes. Payload size is checked against
//! [`MAX_PERSISTENCE_PAYLOAD_SIZE`] before any decoding, so corrupted
//! or hostile files are rejected up front.

use crate::primitives;
use crate::puzzle::PuzzleRecord;
use crate::types::KurosuError;

/// Maximum allowed payload size for the archive format.
///
/// A 15×15 record with full clue lists is a few hundred kilobytes at
/// most; 16 MB leaves generous headroom.
pub const MAX_PERSISTENCE_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Preamble length: packed magic word (4) + version (2).
const PREAMBLE_LEN: usize = 6;

// =============================================================================
// ARCHIVE HEADER
// =============================================================================

/// The archive preamble: magic word and format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    /// `MAGIC_BYTES` packed into one little-endian word.
    pub tag: u32,
    pub version: u16,
}

impl ArchiveHeader {
    /// The packed magic word every kurosu archive starts with.
    pub const TAG: u32 = u32::from_le_bytes(*primitives::MAGIC_BYTES);

    /// Header for the current format version.
    #[must_use]
    pub const fn current() -> Self {
        Self {
            tag: Self::TAG,
            version: primitives::FORMAT_VERSION as u16,
        }
    }

    /// Append the preamble to an output buffer.
    fn write_to(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.tag.to_le_bytes());
        out.extend_from_slice(&self.version.to_le_bytes());
    }

    /// Split a file into its validated header and payload.
    pub fn split(bytes: &[u8]) -> Result<(Self, &[u8]), KurosuError> {
        if bytes.len() < PREAMBLE_LEN {
            return Err(KurosuError::SerializationError(
                "archive shorter than its preamble".to_string(),
            ));
        }
        let header = Self {
            tag: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
        };
        header.ensure_supported()?;
        Ok((header, &bytes[PREAMBLE_LEN..]))
    }

    fn ensure_supported(self) -> Result<(), KurosuError> {
        if self.tag != Self::TAG {
            return Err(KurosuError::SerializationError(
                "not a kurosu puzzle archive".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION as u16 {
            return Err(KurosuError::SerializationError(format!(
                "archive format v{} unsupported (current is v{})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a puzzle record to bytes (preamble + payload).
pub fn puzzle_to_bytes(record: &PuzzleRecord) -> Result<Vec<u8>, KurosuError> {
    let payload = postcard::to_stdvec(record)
        .map_err(|e| KurosuError::SerializationError(e.to_string()))?;

    let mut bytes = Vec::with_capacity(PREAMBLE_LEN + payload.len());
    ArchiveHeader::current().write_to(&mut bytes);
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Deserialize a puzzle record, validating the preamble and payload
/// size first.
pub fn puzzle_from_bytes(bytes: &[u8]) -> Result<PuzzleRecord, KurosuError> {
    let (_header, payload) = ArchiveHeader::split(bytes)?;
    if payload.len() > MAX_PERSISTENCE_PAYLOAD_SIZE {
        return Err(KurosuError::SerializationError(format!(
            "payload size {} exceeds maximum {}",
            payload.len(),
            MAX_PERSISTENCE_PAYLOAD_SIZE
        )));
    }
    postcard::from_bytes(payload).map_err(|e| KurosuError::SerializationError(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::{Clues, Orientation, PlacedWord, PuzzleId};

    fn sample_record() -> PuzzleRecord {
        PuzzleRecord::assemble(
            PuzzleId::generate(),
            "archived".to_string(),
            99,
            Grid::new(5),
            vec![PlacedWord {
                answer: "トリ".to_string(),
                clue: "bird".to_string(),
                article_ref: None,
                row: 0,
                col: 0,
                orientation: Orientation::Across,
                length: 2,
                number: 1,
            }],
            Clues::default(),
        )
    }

    #[test]
    fn roundtrip() {
        let record = sample_record();
        let bytes = puzzle_to_bytes(&record).expect("serialize");
        let restored = puzzle_from_bytes(&bytes).expect("deserialize");
        assert_eq!(restored, record);
    }

    #[test]
    fn preamble_leads_the_file() {
        let bytes = puzzle_to_bytes(&sample_record()).expect("serialize");
        assert_eq!(&bytes[0..4], primitives::MAGIC_BYTES);
        assert_eq!(
            u16::from_le_bytes([bytes[4], bytes[5]]),
            primitives::FORMAT_VERSION as u16
        );
    }

    #[test]
    fn split_returns_current_header() {
        let bytes = puzzle_to_bytes(&sample_record()).expect("serialize");
        let (header, payload) = ArchiveHeader::split(&bytes).expect("split");
        assert_eq!(header, ArchiveHeader::current());
        assert!(!payload.is_empty());
    }

    #[test]
    fn wrong_magic_rejected() {
        let mut bytes = puzzle_to_bytes(&sample_record()).expect("serialize");
        bytes[0] = b'X';
        assert!(puzzle_from_bytes(&bytes).is_err());
    }

    #[test]
    fn wrong_version_rejected() {
        let mut bytes = puzzle_to_bytes(&sample_record()).expect("serialize");
        bytes[4] = primitives::FORMAT_VERSION + 1;
        assert!(puzzle_from_bytes(&bytes).is_err());
    }

    #[test]
    fn truncated_file_rejected() {
        assert!(puzzle_from_bytes(&[]).is_err());
        assert!(puzzle_from_bytes(b"KUR").is_err());
        assert!(puzzle_from_bytes(b"KURO\x01").is_err());
    }
}
