//! # Kurosu CLI Module
//!
//! This module implements the CLI interface for kurosu.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `generate` - Build a puzzle from a candidate-word file
//! - `list` - List stored puzzles
//! - `show` - Print one puzzle
//! - `check` - Check answers from a file
//! - `hint` - Reveal the first grapheme of an answer
//! - `delete` - Delete a puzzle
//! - `export` - Export a puzzle to an archive file
//! - `import` - Import a puzzle from an archive file

mod commands;

use clap::{Parser, Subcommand};
use kurosu_core::KurosuError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Kurosu - News Crossword Engine
///
/// Builds dense Japanese crossword grids from news-derived candidate
/// words and serves the interactive play contract.
#[derive(Parser, Debug)]
#[command(name = "kurosu")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the puzzle database
    #[arg(short = 'D', long, global = true, default_value = "kurosu.db")]
    pub database: PathBuf,

    /// Storage backend: "redb" (ACID database) or "memory" (volatile)
    #[arg(short = 'B', long, global = true, default_value = "redb")]
    pub backend: String,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Build a puzzle from a candidate-word file
    Generate {
        /// Path to a JSON array of {answer, clue, article_ref?}
        #[arg(short, long)]
        file: PathBuf,

        /// Grid size (clamped into the supported range)
        #[arg(short, long, default_value = "9")]
        size: usize,

        /// Puzzle title
        #[arg(short, long)]
        title: Option<String>,

        /// Base seed for a reproducible build
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List stored puzzles, newest first
    List,

    /// Print one puzzle
    Show {
        /// Puzzle id
        id: String,
    },

    /// Check answers from a JSON file of {"number-orientation": "answer"}
    Check {
        /// Puzzle id
        id: String,

        /// Path to the answers file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Reveal the first grapheme of an answer
    Hint {
        /// Puzzle id
        id: String,

        /// Clue number
        #[arg(short, long)]
        number: u32,

        /// Orientation: across or down
        #[arg(short, long)]
        orientation: String,
    },

    /// Delete a puzzle
    Delete {
        /// Puzzle id
        id: String,
    },

    /// Export a puzzle to an archive file
    Export {
        /// Puzzle id
        id: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import a puzzle from an archive file
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), KurosuError> {
    let backend = cli.backend.as_str();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            cmd_server(&cli.database, backend, &host, port).await
        }
        Some(Commands::Generate {
            file,
            size,
            title,
            seed,
        }) => cmd_generate(&cli.database, backend, json_mode, &file, size, title, seed),
        Some(Commands::List) => cmd_list(&cli.database, backend, json_mode),
        Some(Commands::Show { id }) => cmd_show(&cli.database, backend, json_mode, &id),
        Some(Commands::Check { id, file }) => {
            cmd_check(&cli.database, backend, json_mode, &id, &file)
        }
        Some(Commands::Hint {
            id,
            number,
            orientation,
        }) => cmd_hint(&cli.database, backend, json_mode, &id, number, &orientation),
        Some(Commands::Delete { id }) => cmd_delete(&cli.database, backend, json_mode, &id),
        Some(Commands::Export { id, output }) => cmd_export(&cli.database, backend, &id, &output),
        Some(Commands::Import { input }) => cmd_import(&cli.database, backend, json_mode, &input),
        None => {
            // No subcommand - show the listing by default
            cmd_list(&cli.database, backend, json_mode)
        }
    }
}
