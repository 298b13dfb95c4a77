//! Key-based cache for downloaded results.
//!
//! Results are keyed by the job they came from and the status the job had
//! when they were fetched. A lookup with any other key is a miss, so a new
//! job or a status change always triggers a fresh download.

use serde::{Deserialize, Serialize};

use crate::model::JobId;
use crate::results::SimStatus;

/// Identity of a set of downloaded results
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultKey {
    pub job_id: JobId,
    pub status: SimStatus,
}

impl ResultKey {
    pub fn new(job_id: JobId, status: SimStatus) -> Self {
        Self { job_id, status }
    }
}

/// A cached value that remembers the key it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResults<T> {
    entry: Option<(ResultKey, T)>,
}

impl<T> Default for CachedResults<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CachedResults<T> {
    /// Create a new empty cache
    pub const fn new() -> Self {
        Self { entry: None }
    }

    /// Get the cached value if it was computed for `key`.
    pub fn get(&self, key: &ResultKey) -> Option<&T> {
        match &self.entry {
            Some((k, value)) if k == key => Some(value),
            _ => None,
        }
    }

    /// Check if the cache has a value for `key`.
    pub fn is_valid(&self, key: &ResultKey) -> bool {
        self.get(key).is_some()
    }

    /// Store a new value for `key`, replacing any previous entry.
    pub fn set(&mut self, key: ResultKey, value: T) {
        self.entry = Some((key, value));
    }

    /// Key of the current entry
    pub fn key(&self) -> Option<&ResultKey> {
        self.entry.as_ref().map(|(k, _)| k)
    }

    /// Explicitly invalidate the cache.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Get or compute the value, storing it in the cache.
    ///
    /// If the cache holds a value for `key` it is returned as is; otherwise
    /// `compute` runs and its value replaces the entry. A failed computation
    /// leaves the cache empty.
    pub fn get_or_compute<F, E>(&mut self, key: ResultKey, compute: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let stale = !self.is_valid(&key);
        if stale {
            self.entry = None;
            let value = compute()?;
            self.entry = Some((key, value));
        }
        match &self.entry {
            Some((_, value)) => Ok(value),
            None => unreachable!("cache entry was just filled"),
        }
    }
}
