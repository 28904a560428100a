use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::r#trait::{CollectionStore, LoadOutcome, StoreError};

/// A collection stored as a single JSON array file.
///
/// Saves go to a sibling temp file that is then renamed over the target, so
/// readers never observe a half-written document.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _items: PhantomData,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<LoadOutcome<T>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        // An empty file is an empty collection; anything else must be a JSON array.
        if raw.trim().is_empty() {
            return Ok(LoadOutcome::Loaded(Vec::new()));
        }

        let items = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(LoadOutcome::Loaded(items))
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(items).map_err(StoreError::Serialize)?;

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, bytes).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), items = items.len(), "collection saved");
        Ok(())
    }
}
