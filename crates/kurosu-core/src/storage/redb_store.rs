//! # redb-backed Puzzle Storage
//!
//! Disk-backed puzzle store using the redb embedded database: ACID
//! transactions, crash safety (copy-on-write B-trees), concurrent
//! readers with a single writer, zero configuration.
//!
//! The stored row is the backend-independent schema: scalar columns
//! plus self-contained JSON serializations of the grid, word list, clue
//! lists, and answer table. The row itself is postcard-encoded as the
//! redb value.

use super::{PuzzleStore, PuzzleSummary, sort_newest_first};
use crate::puzzle::PuzzleRecord;
use crate::types::{KurosuError, PuzzleId};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Table for puzzles: id string -> postcard-encoded StoredPuzzle.
const PUZZLES: TableDefinition<&str, &[u8]> = TableDefinition::new("puzzles");

// =============================================================================
// STORED ROW
// =============================================================================

/// The persisted row format.
///
/// All `*_json` fields are self-contained serializations, so any
/// relational or key-value backend can hold this schema unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPuzzle {
    pub id: String,
    pub title: String,
    pub size: u32,
    pub width: u32,
    pub height: u32,
    pub grid_json: String,
    pub words_json: String,
    pub clues_json: String,
    pub answers_json: String,
    pub word_count: u32,
    pub created_at: u64,
}

impl StoredPuzzle {
    /// Flatten a record into the stored schema.
    ///
    /// Each part serializes independently so a partial reader can pick
    /// out just the fields it needs.
    pub fn from_record(record: &PuzzleRecord) -> Result<Self, KurosuError> {
        Ok(Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            size: record.size as u32,
            width: record.size as u32,
            height: record.size as u32,
            grid_json: serde_json::to_string(&record.grid)
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?,
            words_json: serde_json::to_string(&record.words)
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?,
            clues_json: serde_json::to_string(&record.clues)
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?,
            answers_json: serde_json::to_string(&record.answers)
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?,
            word_count: record.word_count() as u32,
            created_at: record.created_at,
        })
    }

    /// Rebuild the full record from the stored schema.
    pub fn into_record(self) -> Result<PuzzleRecord, KurosuError> {
        Ok(PuzzleRecord {
            id: PuzzleId::from_str(&self.id)?,
            title: self.title,
            size: self.size as usize,
            created_at: self.created_at,
            grid: serde_json::from_str(&self.grid_json)
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?,
            words: serde_json::from_str(&self.words_json)
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?,
            clues: serde_json::from_str(&self.clues_json)
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?,
            answers: serde_json::from_str(&self.answers_json)
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?,
        })
    }

    /// Summary row without decoding the JSON payloads.
    fn summary(&self) -> Result<PuzzleSummary, KurosuError> {
        Ok(PuzzleSummary {
            id: PuzzleId::from_str(&self.id)?,
            title: self.title.clone(),
            size: self.size as usize,
            word_count: self.word_count as usize,
            created_at: self.created_at,
        })
    }
}

// =============================================================================
// REDB STORE
// =============================================================================

/// A disk-backed puzzle store using redb.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a puzzle database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KurosuError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| KurosuError::IoError(e.to_string()))?;

        // Initialize the table if it doesn't exist.
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| KurosuError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(PUZZLES)
                .map_err(|e| KurosuError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| KurosuError::IoError(e.to_string()))?;
        }

        Ok(Self { db })
    }

    /// Compact the database (optional optimization).
    pub fn compact(&mut self) -> Result<(), KurosuError> {
        self.db
            .compact()
            .map_err(|e| KurosuError::IoError(e.to_string()))?;
        Ok(())
    }
}

impl PuzzleStore for RedbStore {
    fn put(&mut self, record: &PuzzleRecord) -> Result<(), KurosuError> {
        let stored = StoredPuzzle::from_record(record)?;
        let bytes = postcard::to_stdvec(&stored)
            .map_err(|e| KurosuError::SerializationError(e.to_string()))?;
        let key = stored.id;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| KurosuError::IoError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(PUZZLES)
                .map_err(|e| KurosuError::IoError(e.to_string()))?;
            table
                .insert(key.as_str(), bytes.as_slice())
                .map_err(|e| KurosuError::IoError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| KurosuError::IoError(e.to_string()))?;
        Ok(())
    }

    fn get(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>, KurosuError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| KurosuError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(PUZZLES)
            .map_err(|e| KurosuError::IoError(e.to_string()))?;

        let key = id.to_string();
        let Some(value) = table
            .get(key.as_str())
            .map_err(|e| KurosuError::IoError(e.to_string()))?
        else {
            return Ok(None);
        };

        let stored: StoredPuzzle = postcard::from_bytes(value.value())
            .map_err(|e| KurosuError::SerializationError(e.to_string()))?;
        Ok(Some(stored.into_record()?))
    }

    fn list(&self) -> Result<Vec<PuzzleSummary>, KurosuError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| KurosuError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(PUZZLES)
            .map_err(|e| KurosuError::IoError(e.to_string()))?;

        let mut summaries = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| KurosuError::IoError(e.to_string()))?
        {
            let (_, value) = entry.map_err(|e| KurosuError::IoError(e.to_string()))?;
            let stored: StoredPuzzle = postcard::from_bytes(value.value())
                .map_err(|e| KurosuError::SerializationError(e.to_string()))?;
            summaries.push(stored.summary()?);
        }
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    fn delete(&mut self, id: PuzzleId) -> Result<bool, KurosuError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| KurosuError::IoError(e.to_string()))?;
        let existed = {
            let mut table = write_txn
                .open_table(PUZZLES)
                .map_err(|e| KurosuError::IoError(e.to_string()))?;
            let key = id.to_string();
            table
                .remove(key.as_str())
                .map_err(|e| KurosuError::IoError(e.to_string()))?
                .is_some()
        };
        write_txn
            .commit()
            .map_err(|e| KurosuError::IoError(e.to_string()))?;
        Ok(existed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
