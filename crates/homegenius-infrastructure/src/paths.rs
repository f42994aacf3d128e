//! Unified path management for HomeGenius client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/homegenius/        # Config directory (platform specific)
//! ├── config.toml              # Client configuration (API URL, language)
//! └── state.toml               # Persisted access token and locale choice
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "homegenius";
const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "state.toml";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Neither a base path was given nor a platform config directory found.
    #[error("Cannot find the configuration directory")]
    ConfigDirNotFound,
}

/// Resolves client file locations.
///
/// With a base path (tests, `--config-dir`), every file lives directly under
/// it; otherwise under the platform config directory.
#[derive(Debug, Clone, Default)]
pub struct HomeGeniusPaths {
    base_path: Option<PathBuf>,
}

impl HomeGeniusPaths {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base_path: base_path.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_path {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    pub fn state_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(STATE_FILE))
    }
}
