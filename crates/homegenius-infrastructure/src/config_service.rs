//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` (writing the defaults on first
//! run) and layers environment overrides on top.

use crate::paths::HomeGeniusPaths;
use crate::storage::AtomicTomlFile;
use homegenius_core::config::ClientConfig;
use homegenius_core::{HomeGeniusError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Config service for `config.toml` under `base_path`, or the platform
    /// config directory when `None`.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = HomeGeniusPaths::new(base_path)
            .config_file()
            .map_err(|e| HomeGeniusError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file only. A missing file yields the defaults, which are
    /// then written out so users have something to edit.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let file = AtomicTomlFile::<ClientConfig>::new(self.path.clone());
        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = ClientConfig::default();
                if let Err(e) = file.save(&config) {
                    tracing::warn!(
                        "[ConfigService] Could not write default config to {}: {}",
                        self.path.display(),
                        e
                    );
                }
                Ok(config)
            }
        }
    }

    /// File contents with `HOMEGENIUS_*` environment overrides applied.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self
            .load_file()?
            .with_env_overrides(|key| std::env::var(key).ok());
        tracing::debug!(
            "[ConfigService] Loaded config from {} (api_url={})",
            self.path.display(),
            config.api_url
        );
        Ok(config)
    }

    /// Persists `config` as the new file contents.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        AtomicTomlFile::new(self.path.clone()).save(config)?;
        Ok(())
    }
}
