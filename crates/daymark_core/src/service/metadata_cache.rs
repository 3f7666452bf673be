//! Per-day memoizing cache for annotation records.
//!
//! # Responsibility
//! - Map `DateKey` to a fully computed `DayMetadata`.
//! - Fill lazily on miss; never evict on its own.
//!
//! # Invariants
//! - Only successful computations are stored; a failed compute leaves the
//!   key absent.
//! - The lock is never held while a computation is pending. Two concurrent
//!   misses for one key both compute; the later insert wins and each caller
//!   receives its own (equal) record.
//! - Entries live as long as the cache. Growth is bounded only by the
//!   number of distinct days requested.

use crate::model::day::{DateKey, DayMetadata};
use log::debug;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

/// Keyed store of computed day records.
#[derive(Debug, Default)]
pub struct DayMetadataCache {
    entries: Mutex<HashMap<DateKey, Arc<DayMetadata>>>,
}

impl DayMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DateKey) -> Option<Arc<DayMetadata>> {
        self.lock().get(key).cloned()
    }

    /// Stores `metadata` under `key`, replacing any previous record.
    pub fn insert(&self, key: DateKey, metadata: DayMetadata) -> Arc<DayMetadata> {
        let record = Arc::new(metadata);
        self.lock().insert(key, Arc::clone(&record));
        record
    }

    /// Returns the cached record or computes, stores and returns a new one.
    ///
    /// # Errors
    /// - Propagates the compute error unchanged; nothing is stored.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: DateKey,
        compute: F,
    ) -> Result<Arc<DayMetadata>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DayMetadata, E>>,
    {
        if let Some(hit) = self.get(&key) {
            debug!("event=metadata_cache module=cache status=hit key={key}");
            return Ok(hit);
        }

        debug!("event=metadata_cache module=cache status=miss key={key}");
        let metadata = compute().await?;
        Ok(self.insert(key, metadata))
    }

    /// Drops one entry. Returns whether it was present.
    pub fn invalidate(&self, key: &DateKey) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<DateKey, Arc<DayMetadata>>> {
        // Entries are replaced wholesale, so a poisoned map is still valid.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
