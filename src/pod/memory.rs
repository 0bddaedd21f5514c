//! In-memory pod for tests and offline use.
//!
//! Documents are stored as Turtle text so every read and write goes through
//! the same codec as the HTTP client. Each write bumps a per-document
//! version that is reported as the entity tag.

use super::traits::{PodClient, PodError, PodResult, Precondition};
use crate::rdf::turtle::{parse_turtle, to_turtle};
use crate::rdf::Dataset;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

struct StoredDocument {
    turtle: String,
    version: u64,
}

/// A write observed by the memory pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub url: String,
    pub precondition: Precondition,
}

/// In-memory [`PodClient`].
pub struct MemoryPod {
    documents: DashMap<String, StoredDocument>,
    failures: DashMap<String, u16>,
    writes: Mutex<Vec<WriteRecord>>,
    next_version: AtomicU64,
    etags: AtomicBool,
}

impl MemoryPod {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            failures: DashMap::new(),
            writes: Mutex::new(Vec::new()),
            next_version: AtomicU64::new(1),
            etags: AtomicBool::new(true),
        }
    }

    /// Behave like a server that reports no entity tags
    pub fn without_etags(self) -> Self {
        self.etags.store(false, Ordering::SeqCst);
        self
    }

    /// Store a document directly, bypassing preconditions and the write log
    pub fn insert_turtle(&self, url: &str, turtle: impl Into<String>) {
        let version = self.next_version.fetch_add(1, Ordering::SeqCst);
        self.documents.insert(
            url.to_string(),
            StoredDocument {
                turtle: turtle.into(),
                version,
            },
        );
    }

    /// Make every request for `url` fail with the given HTTP status
    pub fn fail_with(&self, url: &str, code: u16) {
        self.failures.insert(url.to_string(), code);
    }

    pub fn clear_failure(&self, url: &str) {
        self.failures.remove(url);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.documents.contains_key(url)
    }

    /// Raw Turtle of a stored document
    pub fn turtle(&self, url: &str) -> Option<String> {
        self.documents.get(url).map(|doc| doc.turtle.clone())
    }

    /// Every write in the order it was accepted
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    /// Number of accepted writes that created `url`
    pub fn creations(&self, url: &str) -> usize {
        self.writes()
            .iter()
            .filter(|w| w.url == url && w.precondition == Precondition::Create)
            .count()
    }

    fn etag_for(&self, version: u64) -> Option<String> {
        self.etags
            .load(Ordering::SeqCst)
            .then(|| format!("\"v{}\"", version))
    }

    fn check_failure(&self, url: &str) -> PodResult<()> {
        match self.failures.get(url) {
            Some(code) if *code == 404 => Err(PodError::NotFound(url.to_string())),
            Some(code) => Err(PodError::Status {
                code: *code,
                url: url.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for MemoryPod {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PodClient for MemoryPod {
    async fn fetch_dataset(&self, url: &str) -> PodResult<Dataset> {
        self.check_failure(url)?;
        let (turtle, version) = match self.documents.get(url) {
            Some(doc) => (doc.turtle.clone(), doc.version),
            None => return Err(PodError::NotFound(url.to_string())),
        };
        Ok(parse_turtle(&turtle, url)?.with_etag(self.etag_for(version)))
    }

    async fn save_dataset(
        &self,
        dataset: &Dataset,
        precondition: Precondition,
    ) -> PodResult<Dataset> {
        let url = dataset.url();
        self.check_failure(url)?;
        let turtle = to_turtle(dataset)?;

        let version = self.next_version.fetch_add(1, Ordering::SeqCst);
        // the entry guard makes the precondition check and the write one step
        let entry = self.documents.entry(url.to_string());
        let current = match &entry {
            Entry::Occupied(doc) => Some(doc.get().version),
            Entry::Vacant(_) => None,
        };
        let accepted = match &precondition {
            Precondition::None => true,
            Precondition::Create => current.is_none(),
            Precondition::Match(etag) => {
                current.and_then(|v| self.etag_for(v)).as_deref() == Some(etag.as_str())
            }
        };
        if !accepted {
            return Err(PodError::StaleCollection(url.to_string()));
        }

        entry.insert(StoredDocument {
            turtle,
            version,
        });
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(WriteRecord {
                url: url.to_string(),
                precondition,
            });
        }
        Ok(dataset.clone().with_etag(self.etag_for(version)))
    }
}
