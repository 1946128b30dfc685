//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use kurosu_core::{
    CandidateWord, Cell, GenerateParams, KurosuError, Orientation, PublicPuzzle, PuzzleId,
    PuzzleService, puzzle_from_bytes, puzzle_to_bytes,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for candidate or answer input (8 MB).
///
/// This prevents memory exhaustion from malicious or accidental large
/// files.
const MAX_INPUT_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// Maximum file size for archive import (32 MB).
const MAX_IMPORT_FILE_SIZE: u64 = 32 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), KurosuError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| KurosuError::IoError(format!("Cannot read file metadata: {e}")))?;

    if metadata.len() > max_size {
        return Err(KurosuError::BadRequest(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path: canonicalize, require existence, and
/// require a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, KurosuError> {
    let canonical = path.canonicalize().map_err(|e| {
        KurosuError::IoError(format!("Invalid file path '{}': {e}", path.display()))
    })?;

    if !canonical.is_file() {
        return Err(KurosuError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, KurosuError> {
    let parent = path.parent().unwrap_or(Path::new("."));

    let canonical_parent = parent.canonicalize().map_err(|e| {
        KurosuError::IoError(format!(
            "Invalid output directory '{}': {e}",
            parent.display()
        ))
    })?;

    let filename = path
        .file_name()
        .ok_or_else(|| KurosuError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SERVICE LOADING
// =============================================================================

/// Open the service over the selected backend.
fn load_service(db_path: &Path, backend: &str) -> Result<PuzzleService, KurosuError> {
    match backend {
        "redb" => PuzzleService::with_redb(db_path),
        "memory" => Ok(PuzzleService::new()),
        other => Err(KurosuError::BadRequest(format!(
            "unknown backend '{other}' (expected 'redb' or 'memory')"
        ))),
    }
}

fn parse_id(id: &str) -> Result<PuzzleId, KurosuError> {
    PuzzleId::from_str(id)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    db_path: &Path,
    backend: &str,
    host: &str,
    port: u16,
) -> Result<(), KurosuError> {
    let service = load_service(db_path, backend)?;

    println!("Kurosu News Crossword Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {host}");
    println!("  Port:     {port}");
    println!("  Backend:  {backend}");
    println!("  Database: {db_path:?}");
    println!();
    println!("Endpoints:");
    println!("  POST   /puzzles            - Generate a puzzle");
    println!("  GET    /puzzles            - List puzzles");
    println!("  GET    /puzzles/:id        - Fetch a puzzle");
    println!("  POST   /puzzles/:id/check  - Check answers");
    println!("  GET    /puzzles/:id/hint   - Reveal a hint");
    println!("  DELETE /puzzles/:id        - Delete a puzzle");
    println!("  GET    /health             - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{host}:{port}");
    api::run_server(&addr, service).await
}

// =============================================================================
// GENERATE COMMAND
// =============================================================================

/// Build a puzzle from a candidate-word file.
pub fn cmd_generate(
    db_path: &Path,
    backend: &str,
    json_mode: bool,
    file: &Path,
    size: usize,
    title: Option<String>,
    seed: Option<u64>,
) -> Result<(), KurosuError> {
    let file = validate_file_path(file)?;
    validate_file_size(&file, MAX_INPUT_FILE_SIZE)?;

    let content = std::fs::read_to_string(&file)
        .map_err(|e| KurosuError::IoError(format!("Cannot read candidate file: {e}")))?;
    let candidates: Vec<CandidateWord> = serde_json::from_str(&content)
        .map_err(|e| KurosuError::SerializationError(format!("Invalid candidate file: {e}")))?;

    let mut service = load_service(db_path, backend)?;
    let params = GenerateParams { size, title, seed };
    let public = service.generate(&params, &candidates)?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&public).unwrap_or_default()
        );
    } else {
        println!("Generated puzzle {}", public.id);
        println!(
            "  {} words on a {}x{} grid, density {:.1}%",
            public.word_count,
            public.size,
            public.size,
            public.grid.density() * 100.0
        );
        print_grid(&public);
    }
    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// List stored puzzles, newest first.
pub fn cmd_list(db_path: &Path, backend: &str, json_mode: bool) -> Result<(), KurosuError> {
    let service = load_service(db_path, backend)?;
    let summaries = service.list()?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&summaries).unwrap_or_default()
        );
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No puzzles stored.");
        return Ok(());
    }

    println!("{} puzzle(s):", summaries.len());
    for summary in summaries {
        println!(
            "  {}  {}x{}  {:>3} words  {}",
            summary.id, summary.size, summary.size, summary.word_count, summary.title
        );
    }
    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Print one puzzle.
pub fn cmd_show(
    db_path: &Path,
    backend: &str,
    json_mode: bool,
    id: &str,
) -> Result<(), KurosuError> {
    let service = load_service(db_path, backend)?;
    let public = service.get(parse_id(id)?)?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&public).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{} ({}x{})", public.title, public.size, public.size);
    print_grid(&public);
    println!();
    println!("Across:");
    for entry in &public.clues.across {
        println!("  {:>3}. {} ({})", entry.number, entry.clue, entry.length);
    }
    println!("Down:");
    for entry in &public.clues.down {
        println!("  {:>3}. {} ({})", entry.number, entry.clue, entry.length);
    }
    Ok(())
}

/// Render the grid, blocked cells opaque.
fn print_grid(public: &PublicPuzzle) {
    for row in 0..public.size {
        let mut line = String::new();
        for col in 0..public.size {
            match public.grid.get(row, col) {
                Some(Cell::Letter { grapheme, .. }) => line.push(grapheme.as_char()),
                _ => line.push('■'),
            }
        }
        println!("  {line}");
    }
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Check answers from a JSON file.
pub fn cmd_check(
    db_path: &Path,
    backend: &str,
    json_mode: bool,
    id: &str,
    file: &Path,
) -> Result<(), KurosuError> {
    let file = validate_file_path(file)?;
    validate_file_size(&file, MAX_INPUT_FILE_SIZE)?;

    let content = std::fs::read_to_string(&file)
        .map_err(|e| KurosuError::IoError(format!("Cannot read answers file: {e}")))?;
    let answers: BTreeMap<String, String> = serde_json::from_str(&content)
        .map_err(|e| KurosuError::SerializationError(format!("Invalid answers file: {e}")))?;

    let service = load_service(db_path, backend)?;
    let result = service.check(parse_id(id)?, &answers)?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_default()
        );
    } else {
        println!("Correct:   {}", result.correct.join(", "));
        println!("Incorrect: {}", result.incorrect.join(", "));
    }
    Ok(())
}

// =============================================================================
// HINT COMMAND
// =============================================================================

/// Reveal the first grapheme of an answer.
pub fn cmd_hint(
    db_path: &Path,
    backend: &str,
    json_mode: bool,
    id: &str,
    number: u32,
    orientation: &str,
) -> Result<(), KurosuError> {
    let orientation = Orientation::from_str(orientation)?;
    let service = load_service(db_path, backend)?;
    let result = service.hint(parse_id(id)?, number, orientation)?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_default()
        );
    } else {
        println!(
            "{} ({} of {} revealed)",
            result.hint, result.revealed, result.total
        );
    }
    Ok(())
}

// =============================================================================
// DELETE COMMAND
// =============================================================================

/// Delete a puzzle.
pub fn cmd_delete(
    db_path: &Path,
    backend: &str,
    json_mode: bool,
    id: &str,
) -> Result<(), KurosuError> {
    let mut service = load_service(db_path, backend)?;
    service.delete(parse_id(id)?)?;

    if json_mode {
        println!("{{\"deleted\": true}}");
    } else {
        println!("Deleted {id}");
    }
    Ok(())
}

// =============================================================================
// EXPORT / IMPORT COMMANDS
// =============================================================================

/// Export a puzzle (answers included) to an archive file.
pub fn cmd_export(
    db_path: &Path,
    backend: &str,
    id: &str,
    output: &Path,
) -> Result<(), KurosuError> {
    let output = validate_output_path(output)?;
    let service = load_service(db_path, backend)?;
    let record = service.get_record(parse_id(id)?)?;

    let bytes = puzzle_to_bytes(&record)?;
    std::fs::write(&output, &bytes)
        .map_err(|e| KurosuError::IoError(format!("Cannot write archive: {e}")))?;

    println!("Exported {} ({} bytes) to {:?}", id, bytes.len(), output);
    Ok(())
}

/// Import a puzzle from an archive file.
pub fn cmd_import(
    db_path: &Path,
    backend: &str,
    json_mode: bool,
    input: &Path,
) -> Result<(), KurosuError> {
    let input = validate_file_path(input)?;
    validate_file_size(&input, MAX_IMPORT_FILE_SIZE)?;

    let bytes = std::fs::read(&input)
        .map_err(|e| KurosuError::IoError(format!("Cannot read archive: {e}")))?;
    let record = puzzle_from_bytes(&bytes)?;

    let mut service = load_service(db_path, backend)?;
    let id = record.id;
    service.import(&record)?;

    if json_mode {
        println!("{{\"imported\": \"{id}\"}}");
    } else {
        println!("Imported puzzle {id}");
    }
    Ok(())
}
