use crate::core::Storage;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Read-through cache over another [`Storage`].
///
/// The first read of a path goes to the inner storage; later reads return the cached
/// bytes until the path is invalidated or the cache is cleared. Failed reads are not
/// cached.
pub struct CachedStorage<S: Storage> {
    inner: S,
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl<S: Storage> CachedStorage<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Drops the cached copy of `path`. Returns whether anything was cached.
    pub fn invalidate(&self, path: &str) -> bool {
        self.entries().remove(path).is_some()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.entries().contains_key(path)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Storage> Storage for CachedStorage<S> {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        if let Some(data) = self.entries().get(path) {
            tracing::debug!("Serving {} from cache", path);
            return Ok(data.clone());
        }

        let data = self.inner.read_file(path)?;
        self.entries().insert(path.to_string(), data.clone());
        Ok(data)
    }
}
