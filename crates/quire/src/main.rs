//! # Quire CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/quireapp/`: the UI-agnostic library (content model, commands, storage)
//! - `crates/quire/`: this CLI, one client of the library
//!
//! Everything from `quireapp::api` inward takes normal Rust values and returns
//! normal Rust types. The CLI owns every user-facing concern: argument parsing,
//! logging setup, the async runtime for attachment ingestion, rendering and exit
//! codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
