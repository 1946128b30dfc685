//! # Puzzle Storage
//!
//! Persistence for immutable puzzle records behind a narrow interface:
//! `put` / `get` / `list` / `delete` by id. Nothing else in the core
//! references the backing store.
//!
//! Two backends exist:
//! - [`MemoryStore`]: `BTreeMap`-backed, volatile.
//! - [`RedbStore`]: disk-backed ACID storage (see `redb_store`).

mod redb_store;

pub use redb_store::RedbStore;

use crate::puzzle::PuzzleRecord;
use crate::types::{KurosuError, PuzzleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// SUMMARY ROW
// =============================================================================

/// One row of a puzzle listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSummary {
    pub id: PuzzleId,
    pub title: String,
    pub size: usize,
    pub word_count: usize,
    pub created_at: u64,
}

impl PuzzleSummary {
    /// Summarize a full record.
    #[must_use]
    pub fn from_record(record: &PuzzleRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            size: record.size,
            word_count: record.word_count(),
            created_at: record.created_at,
        }
    }
}

/// Order summaries newest-first with an id tiebreak so listings are
/// deterministic even for equal timestamps.
pub(crate) fn sort_newest_first(summaries: &mut [PuzzleSummary]) {
    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// The puzzle store contract.
///
/// All fallible operations return `Result<T, KurosuError>` so in-memory
/// and persistent backends are interchangeable. `delete` is atomic on a
/// single record.
pub trait PuzzleStore {
    /// Persist a record. Overwrites any record with the same id.
    fn put(&mut self, record: &PuzzleRecord) -> Result<(), KurosuError>;

    /// Fetch a record by id.
    fn get(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>, KurosuError>;

    /// List all records, newest first.
    fn list(&self) -> Result<Vec<PuzzleSummary>, KurosuError>;

    /// Remove a record. Returns whether it existed.
    fn delete(&mut self, id: PuzzleId) -> Result<bool, KurosuError>;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Volatile store for tests and ephemeral sessions.
///
/// Uses `BTreeMap` for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<PuzzleId, PuzzleRecord>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PuzzleStore for MemoryStore {
    fn put(&mut self, record: &PuzzleRecord) -> Result<(), KurosuError> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    fn get(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>, KurosuError> {
        Ok(self.records.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<PuzzleSummary>, KurosuError> {
        let mut summaries: Vec<PuzzleSummary> =
            self.records.values().map(PuzzleSummary::from_record).collect();
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    fn delete(&mut self, id: PuzzleId) -> Result<bool, KurosuError> {
        Ok(self.records.remove(&id).is_some())
    }
}

// =============================================================================
// BACKEND DISPATCH
// =============================================================================

/// Storage backend selector.
///
/// `RedbStore` holds a database handle and cannot be cloned, so the
/// enum does not implement `Clone`.
#[derive(Debug)]
pub enum StoreBackend {
    /// In-memory store (fast, volatile).
    Memory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::Memory(MemoryStore::new())
    }
}

impl PuzzleStore for StoreBackend {
    fn put(&mut self, record: &PuzzleRecord) -> Result<(), KurosuError> {
        match self {
            Self::Memory(store) => store.put(record),
            Self::Persistent(store) => store.put(record),
        }
    }

    fn get(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>, KurosuError> {
        match self {
            Self::Memory(store) => store.get(id),
            Self::Persistent(store) => store.get(id),
        }
    }

    fn list(&self) -> Result<Vec<PuzzleSummary>, KurosuError> {
        match self {
            Self::Memory(store) => store.list(),
            Self::Persistent(store) => store.list(),
        }
    }

    fn delete(&mut self, id: PuzzleId) -> Result<bool, KurosuError> {
        match self {
            Self::Memory(store) => store.delete(id),
            Self::Persistent(store) => store.delete(id),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::Clues;

    fn record(title: &str, created_at: u64) -> PuzzleRecord {
        PuzzleRecord::assemble(
            PuzzleId::generate(),
            title.to_string(),
            created_at,
            Grid::new(5),
            Vec::new(),
            Clues::default(),
        )
    }

    #[test]
    fn put_get_roundtrip() {
        let mut store = MemoryStore::new();
        let rec = record("a", 10);
        store.put(&rec).expect("put");

        let fetched = store.get(rec.id).expect("get");
        assert_eq!(fetched, Some(rec));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(PuzzleId::generate()).expect("get"), None);
    }

    #[test]
    fn list_newest_first() {
        let mut store = MemoryStore::new();
        let old = record("old", 100);
        let new = record("new", 200);
        store.put(&old).expect("put");
        store.put(&new).expect("put");

        let listing = store.list().expect("list");
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].title, "new");
        assert_eq!(listing[1].title, "old");
    }

    #[test]
    fn delete_reports_existence() {
        let mut store = MemoryStore::new();
        let rec = record("a", 1);
        store.put(&rec).expect("put");

        assert!(store.delete(rec.id).expect("delete"));
        assert!(!store.delete(rec.id).expect("delete"));
        assert_eq!(store.get(rec.id).expect("get"), None);
    }

    #[test]
    fn put_overwrites_same_id() {
        let mut store = MemoryStore::new();
        let mut rec = record("first", 1);
        store.put(&rec).expect("put");
        rec.title = "second".to_string();
        store.put(&rec).expect("put");

        assert_eq!(store.len(), 1);
        let fetched = store.get(rec.id).expect("get").expect("record");
        assert_eq!(fetched.title, "second");
    }
}
