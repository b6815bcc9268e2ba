//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all quire operations, regardless of the UI in front of it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: parses selector strings into [`NoteSelector`]s
//! - **Applies configuration**: the ingestion size limit and the upgrade-on-edit
//!   policy come from [`QuireConfig`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It performs no business logic, no terminal I/O and no presentation.
//!
//! ## Async Boundary
//!
//! [`QuireApi::attach_files`] is the only async method. It awaits file ingestion,
//! then hands the finished batch to the synchronous attach command, so every
//! stored reference points at a record that is already in the catalog.
//!
//! ## Generic Over DataStore
//!
//! `QuireApi<S: DataStore>` is generic over the storage backend:
//! - Production: `QuireApi<FileStore>`
//! - Testing: `QuireApi<InMemoryStore>`

use crate::commands;
use crate::config::QuireConfig;
use crate::error::Result;
use crate::index::NoteSelector;
use crate::ingest::ingest_files;
use crate::store::DataStore;
use std::path::{Path, PathBuf};

pub use commands::{CmdMessage, CmdResult, DoctorFinding, MessageLevel, NoteView, UnitLine, ViewUnit};

/// The main API facade for quire operations.
pub struct QuireApi<S: DataStore> {
    store: S,
    config: QuireConfig,
}

impl<S: DataStore> QuireApi<S> {
    pub fn new(store: S, config: QuireConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &QuireConfig {
        &self.config
    }

    pub fn create_note(&mut self, title: String, content: String) -> Result<CmdResult> {
        commands::create::run(&mut self.store, title, content)
    }

    pub fn list_notes(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_note(&self, selector: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, &selector.parse()?)
    }

    pub fn list_segments(&self, selector: &str) -> Result<CmdResult> {
        let upgrade = self.config.upgrade_on_load;
        commands::view::segments(&self.store, &selector.parse()?, upgrade)
    }

    pub fn edit_segment(&mut self, selector: &str, index: usize, content: String) -> Result<CmdResult> {
        let selector = selector.parse()?;
        let upgrade = self.config.upgrade_on_load;
        commands::edit::edit(&mut self.store, &selector, index, content, upgrade)
    }

    pub fn append_text(&mut self, selector: &str, content: String) -> Result<CmdResult> {
        let selector = selector.parse()?;
        let upgrade = self.config.upgrade_on_load;
        commands::edit::append(&mut self.store, &selector, content, upgrade)
    }

    pub fn move_segment(&mut self, selector: &str, from: usize, to: usize) -> Result<CmdResult> {
        let selector = selector.parse()?;
        let upgrade = self.config.upgrade_on_load;
        commands::edit::move_unit(&mut self.store, &selector, from, to, upgrade)
    }

    pub fn remove_segment(&mut self, selector: &str, index: usize) -> Result<CmdResult> {
        let selector = selector.parse()?;
        let upgrade = self.config.upgrade_on_load;
        commands::edit::remove(&mut self.store, &selector, index, upgrade)
    }

    /// Ingest files and attach the ones that loaded.
    pub async fn attach_files<P: AsRef<Path>>(
        &mut self,
        selector: &str,
        paths: &[P],
    ) -> Result<CmdResult> {
        let selector: NoteSelector = selector.parse()?;
        // Fail on a bad selector before reading any file.
        commands::helpers::resolve_note(&self.store, &selector)?;

        let report = ingest_files(paths, self.config.max_attachment_bytes).await;
        let upgrade = self.config.upgrade_on_load;
        commands::attach::attach(&mut self.store, &selector, report, upgrade)
    }

    pub fn link_url(&mut self, selector: &str, url: &str, name: Option<String>) -> Result<CmdResult> {
        let selector = selector.parse()?;
        let upgrade = self.config.upgrade_on_load;
        commands::attach::link(&mut self.store, &selector, url, name, upgrade)
    }

    pub fn detach_attachment(&mut self, selector: &str, attachment_id: &str) -> Result<CmdResult> {
        commands::attachments::detach(&mut self.store, &selector.parse()?, attachment_id)
    }

    pub fn resize_attachment(
        &mut self,
        selector: &str,
        attachment_id: &str,
        width: Option<u32>,
    ) -> Result<CmdResult> {
        commands::attachments::resize(&mut self.store, &selector.parse()?, attachment_id, width)
    }

    pub fn rename_attachment(
        &mut self,
        selector: &str,
        attachment_id: &str,
        name: String,
    ) -> Result<CmdResult> {
        commands::attachments::rename(&mut self.store, &selector.parse()?, attachment_id, name)
    }

    pub fn upgrade_note(&mut self, selector: &str) -> Result<CmdResult> {
        commands::upgrade::run(&mut self.store, &selector.parse()?)
    }

    pub fn export_archive<I: AsRef<str>>(&self, selectors: &[I], dest: &Path) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::export::run(&self.store, &selectors, dest)
    }

    pub fn export_markdown(&self, selector: &str) -> Result<CmdResult> {
        commands::export::run_markdown(&self.store, &selector.parse()?)
    }

    pub fn import_paths(&mut self, paths: Vec<PathBuf>) -> Result<CmdResult> {
        commands::import::run(&mut self.store, paths)
    }

    pub fn doctor(&self) -> Result<CmdResult> {
        commands::doctor::run(&self.store)
    }

    pub fn delete_notes<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn note_paths<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::paths::run(&self.store, &selectors)
    }
}

/// Parse selector strings, dropping duplicates while preserving order.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<NoteSelector>> {
    let mut selectors: Vec<NoteSelector> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let selector: NoteSelector = input.as_ref().parse()?;
        if !selectors.contains(&selector) {
            selectors.push(selector);
        }
    }
    Ok(selectors)
}
