//! # Quire Architecture
//!
//! Quire is a **UI-agnostic note content library**. A note's body lives in one of two
//! representations: a flat string with inline attachment markers, or an ordered list of
//! typed blocks. Both reference a per-note attachment catalog by id. The CLI in
//! `crates/quire` is one client of this library, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/quire)                                   │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses selectors, applies configuration                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Resolves notes, drives the content model, saves          │
//! │  - Returns `CmdResult`, never prints                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Content Model                                              │
//! │  catalog · marker · embed · codec · blocks · mutation ·     │
//! │  render · markdown · ingest                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Round-Trip Law
//!
//! For any flat note content `s`, `codec::encode(&codec::decode(s))` returns `s`
//! byte for byte. Markers are kept verbatim, including the display name they were
//! written with; the catalog is only consulted for rendering.
//!
//! ## Testing Strategy
//!
//! 1. **Content model**: unit tests next to each module, plus seeded property tests
//!    under `tests/`.
//! 2. **Commands**: `InMemoryStore` fixtures exercise each command end to end.
//! 3. **API**: dispatch and configuration policy.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`model`]: `Note`, `Attachment` and their identifiers
//! - [`catalog`]: The per-note attachment catalog
//! - [`marker`]: Inline `[File: ..](att-..)` marker syntax
//! - [`embed`]: URL classification into render variants
//! - [`codec`]: Flat text to segments and back
//! - [`blocks`]: The structured block representation
//! - [`mutation`]: Edit, insert, reorder and remove on either representation
//! - [`render`]: Resolving references for display
//! - [`markdown`]: Markdown import and export of block lists
//! - [`ingest`]: Loading files from disk into attachment records
//! - [`store`]: Storage abstraction and implementations
//! - [`index`]: Display indexes and note selectors
//! - [`config`]: Configuration management
//! - [`init`]: Production wiring
//! - [`error`]: Error types

pub mod api;
pub mod blocks;
pub mod catalog;
pub mod codec;
pub mod commands;
pub mod config;
pub mod embed;
pub mod error;
pub mod index;
pub mod ingest;
pub mod init;
pub mod markdown;
pub mod marker;
pub mod model;
pub mod mutation;
pub mod render;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
