//! Collection cache keyed by document URL

use crate::rdf::Dataset;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// The last dataset fetched or saved for one document
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub dataset: Dataset,
    pub stored_at: DateTime<Utc>,
}

/// Shared cache of document datasets.
///
/// One cache is shared by every collection of a session so two
/// collections over the same URL see each other's writes. Entries are
/// replaced wholesale, never merged.
#[derive(Debug, Default)]
pub struct CollectionCache {
    entries: DashMap<String, CacheEntry>,
    stale_after: Option<Duration>,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat entries older than `stale_after` as absent
    pub fn with_stale_time(stale_after: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            stale_after: Some(stale_after),
        }
    }

    /// Cached dataset for `url`, if present and fresh
    pub fn get(&self, url: &str) -> Option<Dataset> {
        let entry = self.entries.get(url)?;
        if let Some(limit) = self.stale_after {
            if Utc::now() - entry.stored_at > limit {
                return None;
            }
        }
        Some(entry.dataset.clone())
    }

    /// Replace the entry for the dataset's URL
    pub fn put(&self, dataset: Dataset) {
        self.entries.insert(
            dataset.url().to_string(),
            CacheEntry {
                dataset,
                stored_at: Utc::now(),
            },
        );
    }

    pub fn invalidate(&self, url: &str) -> bool {
        self.entries.remove(url).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
