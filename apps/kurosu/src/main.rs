//! # Kurosu - News Crossword Server
//!
//! The main binary for the kurosu crossword engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for puzzle generation and management
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                apps/kurosu (THE BINARY)            │
//! │                                                    │
//! │   ┌─────────────┐          ┌─────────────┐        │
//! │   │   CLI       │          │   HTTP API  │        │
//! │   │  (clap)     │          │   (axum)    │        │
//! │   └──────┬──────┘          └──────┬──────┘        │
//! │          │                        │                │
//! │          └───────────┬────────────┘                │
//! │                      ▼                             │
//! │              ┌───────────────┐                     │
//! │              │  kurosu-core  │                     │
//! │              │  (THE LOGIC)  │                     │
//! │              └───────────────┘                     │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! kurosu server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! kurosu generate -f candidates.json -s 9
//! kurosu list
//! kurosu hint <id> -n 4 -o across
//! ```

use clap::Parser;
use kurosu::cli;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

/// Set up the tracing stack.
///
/// `RUST_LOG` overrides the default filter; `KUROSU_LOG_FORMAT=json`
/// switches the fmt layer to machine-readable output. The layer is
/// chosen once and boxed so both formats share one subscriber build.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kurosu=info,tower_http=debug"));

    let wants_json = std::env::var("KUROSU_LOG_FORMAT").is_ok_and(|v| v == "json");
    let fmt_layer = if wants_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = cli::Cli::parse();
    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

/// Print the kurosu startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗  ██╗██╗   ██╗██████╗  ██████╗ ███████╗██╗   ██╗
  ██║ ██╔╝██║   ██║██╔══██╗██╔═══██╗██╔════╝██║   ██║
  █████╔╝ ██║   ██║██████╔╝██║   ██║███████╗██║   ██║
  ██╔═██╗ ██║   ██║██╔══██╗██║   ██║╚════██║██║   ██║
  ██║  ██╗╚██████╔╝██║  ██║╚██████╔╝███████║╚██████╔╝
  ╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝ ╚═════╝ ╚══════╝ ╚═════╝

  News Crossword Engine v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
