use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::r#trait::{CollectionStore, LoadOutcome, StoreError};

/// In-memory collection store for tests/dev.
///
/// Starts out `Missing` unless seeded, counts successful saves, and can be
/// told to fail reads or writes to exercise error paths.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    items: RwLock<Option<Vec<T>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(None),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn seeded(items: Vec<T>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.items.write() {
            *guard = Some(items);
        }
        store
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<T: Clone> InMemoryStore<T> {
    /// Current stored collection, `None` if never saved or seeded.
    pub fn snapshot(&self) -> Option<Vec<T>> {
        self.items.read().ok().and_then(|g| g.clone())
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CollectionStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync,
{
    fn load(&self) -> Result<LoadOutcome<T>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        let guard = self
            .items
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(match guard.as_ref() {
            Some(items) => LoadOutcome::Loaded(items.clone()),
            None => LoadOutcome::Missing,
        })
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        let mut guard = self
            .items
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        *guard = Some(items.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
