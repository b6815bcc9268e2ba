//! # Configuration
//!
//! Quire configuration is loaded with [`confique`] from layered sources.
//!
//! ## Storage Hierarchy
//!
//! Values are resolved in priority order:
//! 1. **Environment variables**: `QUIRE_MAX_ATTACHMENT_BYTES`, `QUIRE_DATA_DIR`,
//!    `QUIRE_UPGRADE_ON_LOAD`.
//! 2. **Config file**: `quire.toml` in the OS-appropriate config directory (via
//!    the `directories` crate).
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! A missing or unreadable file is not an error: loading falls back to the
//! remaining layers.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `max_attachment_bytes` | `10485760` | Largest file accepted by attachment ingestion |
//! | `data_dir` | OS data dir | Where note snapshots are stored |
//! | `upgrade_on_load` | `false` | Convert flat notes to blocks the first time they are edited |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;
pub const CONFIG_FILE_NAME: &str = "quire.toml";

/// Configuration for quire, stored in `quire.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuireConfig {
    /// Largest file, in bytes, accepted by attachment ingestion.
    #[config(env = "QUIRE_MAX_ATTACHMENT_BYTES", default = 10485760)]
    pub max_attachment_bytes: u64,

    /// Directory holding note snapshots.
    #[config(env = "QUIRE_DATA_DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Upgrade flat notes to structured blocks on their first edit.
    #[config(env = "QUIRE_UPGRADE_ON_LOAD", default = false)]
    pub upgrade_on_load: bool,
}

impl Default for QuireConfig {
    fn default() -> Self {
        Self {
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            data_dir: None,
            upgrade_on_load: false,
        }
    }
}

impl QuireConfig {
    /// Load from env, then the user config file, then defaults.
    pub fn load() -> Self {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::load_layers(None),
        }
    }

    /// Load from env, then `path`, then defaults.
    pub fn load_from(path: &Path) -> Self {
        Self::load_layers(Some(path))
    }

    fn load_layers(path: Option<&Path>) -> Self {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        match builder.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "invalid configuration, using defaults");
                Self::default()
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "quire", "quire").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
