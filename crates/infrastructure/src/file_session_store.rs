//! File-backed session persistence.
//!
//! Each key maps to `<directory>/<key>.json`. Writes go to a sibling
//! temporary file first and are renamed into place, so a reader never sees
//! a half-written session.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use peopledesk_application::SessionPersistence;
use peopledesk_core::{AppError, AppResult};
use tokio::fs;

/// Session persistence that survives process restarts on local disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    directory: PathBuf,
}

impl FileSessionStore {
    /// Creates a store rooted at `directory`. The directory is created lazily.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Returns the directory holding session files.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let is_safe = !key.is_empty()
            && key
                .chars()
                .all(|character| character.is_ascii_alphanumeric() || "-_.".contains(character))
            && !key.starts_with('.');
        if !is_safe {
            return Err(AppError::Validation(format!(
                "session key '{key}' must be non-empty ASCII alphanumerics, '-', '_' or '.'"
            )));
        }

        Ok(self.directory.join(format!("{key}.json")))
    }
}

#[async_trait]
impl SessionPersistence for FileSessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(AppError::Internal(format!(
                "failed to read session file '{}': {error}",
                path.display()
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.directory).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to create session directory '{}': {error}",
                self.directory.display()
            ))
        })?;

        let staging_path = path.with_extension("json.tmp");
        fs::write(&staging_path, value).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to write session file '{}': {error}",
                staging_path.display()
            ))
        })?;

        fs::rename(&staging_path, &path).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to move session file into '{}': {error}",
                path.display()
            ))
        })
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AppError::Internal(format!(
                "failed to remove session file '{}': {error}",
                path.display()
            ))),
        }
    }
}
