//! Directory-backed store: one file per key.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use super::{KeyValueStore, StoreError};

/// Store persisting each key as `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the path exists but is not a directory or
    /// cannot be created.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();

        if dir.exists() && !dir.is_dir() {
            return Err(StoreError::new(format!(
                "Store path is not a directory: {}",
                dir.display()
            )));
        }

        std::fs::create_dir_all(&dir).map_err(|e| {
            StoreError::new(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        info!(dir = %dir.display(), "FileStore opened");
        Ok(Self { dir })
    }

    /// Directory holding the store files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the file path for a key.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            warn!(key, "Rejected store key");
            return Err(StoreError::new(format!("Invalid store key: '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!(bytes = content.len(), "Value loaded");
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Key not present");
                Ok(None)
            }
            Err(e) => Err(StoreError::new(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        std::fs::write(&tmp, value.as_bytes())?;
        std::fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), "Value written");
        Ok(())
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "Key deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Delete of absent key");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
