use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Result of reading a collection document.
///
/// A document that does not exist yet is distinct from one that exists but
/// cannot be read or parsed; the latter is a [`StoreError`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(Vec<T>),
    Missing,
}

impl<T> LoadOutcome<T> {
    /// Items of the collection, treating a missing document as empty.
    pub fn into_items(self) -> Vec<T> {
        match self {
            LoadOutcome::Loaded(items) => items,
            LoadOutcome::Missing => Vec::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, LoadOutcome::Missing)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize collection: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backend refused the operation (used by in-memory fakes).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Load/save a whole collection of `T`.
pub trait CollectionStore<T>: Send + Sync {
    fn load(&self) -> Result<LoadOutcome<T>, StoreError>;

    /// Replace the stored collection with `items`.
    fn save(&self, items: &[T]) -> Result<(), StoreError>;
}

impl<T, S> CollectionStore<T> for Arc<S>
where
    S: CollectionStore<T> + ?Sized,
{
    fn load(&self) -> Result<LoadOutcome<T>, StoreError> {
        (**self).load()
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        (**self).save(items)
    }
}
