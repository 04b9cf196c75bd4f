use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::errors::DomainError;
use crate::domain::ports::KeyValueStore;

/// Slots stored as one JSON file each under a base directory.
///
/// Writes go to a `.tmp` sibling that is then renamed over the slot, so a
/// reader never observes a half-written file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Filesystem path backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        let safe_key = key.replace(['/', '\\', ':'], "_");
        self.base_path.join(format!("{}.json", safe_key))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                log::error!("failed to read {}: {}", path.display(), e);
                Err(e.into())
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let path = self.slot_path(key);
        fs::create_dir_all(&self.base_path)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        log::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
