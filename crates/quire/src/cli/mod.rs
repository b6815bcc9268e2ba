//! # CLI Behavior
//!
//! This is **one possible UI client** for quire, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! ## Naked Execution
//!
//! Running `quire` with no arguments defaults to `quire list`.
//!
//! ## Addressing
//!
//! Notes are addressed by display index (`1` is the newest) or by an id prefix.
//! Units inside a note are addressed by the 0-based positions `quire segments`
//! prints; those are segments for flat notes and blocks for structured ones.
//!
//! ## Output
//!
//! Styled text by default. `--json` switches list, view, segments and doctor
//! output to JSON for scripting. Logs go to stderr, filtered by `-v` or
//! `RUST_LOG`.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch, context setup and per-command handlers
//! - `render`: Output formatting (lists, note bodies, messages)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
