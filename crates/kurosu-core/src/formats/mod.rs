//! # File Formats
//!
//! Binary serialization for puzzle archives. File I/O itself lives in
//! the app layer; this module only transforms bytes.

mod persistence;

pub use persistence::{
    ArchiveHeader, MAX_PERSISTENCE_PAYLOAD_SIZE, puzzle_from_bytes, puzzle_to_bytes,
};
