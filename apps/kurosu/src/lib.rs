//! # kurosu (app library)
//!
//! Library surface of the kurosu binary: the HTTP API and the CLI.
//! Exposed so integration tests can drive the router without starting a
//! real server.

pub mod api;
pub mod cli;
