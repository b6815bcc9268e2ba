//! # Initialization
//!
//! [`initialize`] wires the production stack: it loads [`QuireConfig`], resolves
//! the data directory and builds a [`QuireApi`] over a [`FileStore`].
//!
//! ## Data Directory Resolution
//!
//! First match wins:
//! 1. An explicit override (the CLI's `--data` flag).
//! 2. The `QUIRE_DATA` environment variable (primarily for testing).
//! 3. `data_dir` from configuration (`QUIRE_DATA_DIR` or `quire.toml`).
//! 4. The OS-appropriate data directory (via the `directories` crate).

use crate::api::QuireApi;
use crate::config::QuireConfig;
use crate::error::{QuireError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const DATA_ENV: &str = "QUIRE_DATA";

pub struct QuireContext {
    pub api: QuireApi<FileStore>,
    pub data_dir: PathBuf,
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<QuireContext> {
    let config = QuireConfig::load();
    let env_dir = std::env::var(DATA_ENV).ok().map(PathBuf::from);
    let data_dir = resolve_data_dir(data_override, env_dir, &config)?;
    debug!(data_dir = %data_dir.display(), "initialized");

    let store = FileStore::new(data_dir.clone());
    Ok(QuireContext {
        api: QuireApi::new(store, config),
        data_dir,
    })
}

pub fn resolve_data_dir(
    data_override: Option<PathBuf>,
    env_dir: Option<PathBuf>,
    config: &QuireConfig,
) -> Result<PathBuf> {
    if let Some(dir) = data_override.or(env_dir).or_else(|| config.data_dir.clone()) {
        return Ok(dir);
    }
    ProjectDirs::from("com", "quire", "quire")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| QuireError::Config("Could not determine a data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let config = QuireConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..QuireConfig::default()
        };
        let dir = resolve_data_dir(
            Some(PathBuf::from("/from/flag")),
            Some(PathBuf::from("/from/env")),
            &config,
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_env_before_config() {
        let config = QuireConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..QuireConfig::default()
        };
        let dir = resolve_data_dir(None, Some(PathBuf::from("/from/env")), &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn test_config_before_os_default() {
        let config = QuireConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..QuireConfig::default()
        };
        assert_eq!(
            resolve_data_dir(None, None, &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_initialize_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(ctx.data_dir, dir.path());
        assert!(ctx.api.list_notes().unwrap().listed_notes.is_empty());
    }
}
