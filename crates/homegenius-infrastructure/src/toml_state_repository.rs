//! File-backed state repository.
//!
//! Keeps the access token and locale choice in `state.toml`. Every read goes
//! to disk, so a token removed by another process is seen immediately.

use crate::paths::HomeGeniusPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use homegenius_core::state::{PersistedState, StateRepository};
use homegenius_core::{HomeGeniusError, Result};
use std::path::{Path, PathBuf};

/// [`StateRepository`] over an owner-only TOML file.
///
/// # Example
///
/// ```ignore
/// use homegenius_infrastructure::TomlStateRepository;
///
/// let repository = TomlStateRepository::new(None)?;
/// repository.set_locale("sv-SE".to_string()).await?;
/// ```
pub struct TomlStateRepository {
    file: AtomicTomlFile<PersistedState>,
}

impl TomlStateRepository {
    /// Opens the repository under `base_path`, or the platform config
    /// directory when `None`. The file is created on first write.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = HomeGeniusPaths::new(base_path)
            .state_file()
            .map_err(|e| HomeGeniusError::config(e.to_string()))?;
        Ok(Self::at(path))
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path).private(),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Current contents; unreadable files count as empty.
    pub fn load(&self) -> PersistedState {
        match self.file.load() {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("[StateRepository] Ignoring unreadable state file: {}", e);
                PersistedState::default()
            }
        }
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut PersistedState),
    {
        self.file.update_or_reset(PersistedState::default(), f)?;
        Ok(())
    }
}

#[async_trait]
impl StateRepository for TomlStateRepository {
    async fn get_access_token(&self) -> Option<String> {
        self.load().access_token.filter(|token| !token.is_empty())
    }

    async fn set_access_token(&self, token: String) -> Result<()> {
        self.modify(|state| state.access_token = Some(token))
    }

    async fn clear_access_token(&self) -> Result<()> {
        if self.load().access_token.is_none() {
            return Ok(());
        }
        self.modify(|state| state.access_token = None)
    }

    async fn get_locale(&self) -> Option<String> {
        self.load().locale
    }

    async fn set_locale(&self, locale: String) -> Result<()> {
        self.modify(|state| state.locale = Some(locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_values_survive_a_new_handle() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlStateRepository::new(Some(temp_dir.path())).unwrap();
        repository.set_access_token("tok-123".to_string()).await.unwrap();
        repository.set_locale("de-DE".to_string()).await.unwrap();

        let reopened = TomlStateRepository::new(Some(temp_dir.path())).unwrap();
        assert_eq!(reopened.get_access_token().await.as_deref(), Some("tok-123"));
        assert_eq!(reopened.get_locale().await.as_deref(), Some("de-DE"));
    }

    #[tokio::test]
    async fn test_clearing_the_token_keeps_the_locale() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlStateRepository::new(Some(temp_dir.path())).unwrap();
        repository.set_access_token("tok-123".to_string()).await.unwrap();
        repository.set_locale("sv-SE".to_string()).await.unwrap();

        repository.clear_access_token().await.unwrap();

        assert!(repository.get_access_token().await.is_none());
        assert_eq!(repository.get_locale().await.as_deref(), Some("sv-SE"));
    }

    #[tokio::test]
    async fn test_clear_without_file_does_not_create_one() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlStateRepository::new(Some(temp_dir.path())).unwrap();
        repository.clear_access_token().await.unwrap();
        assert!(!repository.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlStateRepository::new(Some(temp_dir.path())).unwrap();
        std::fs::write(repository.path(), "access_token = [").unwrap();

        assert!(repository.get_access_token().await.is_none());
        repository.set_locale("fr-FR".to_string()).await.unwrap();
        assert_eq!(repository.get_locale().await.as_deref(), Some("fr-FR"));
    }
}
