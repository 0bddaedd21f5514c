//! RdfCollection: load/add/delete/refetch over one pod document

use super::cache::CollectionCache;
use super::traits::{CollectionCodec, CollectionResult};
use crate::pod::acl::{self, AccessModes};
use crate::pod::{PodClient, PodError, Precondition};
use crate::rdf::Dataset;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A collection of records stored in one remote document.
///
/// The document is created on first load if it does not exist. Every
/// successful load, add, delete or refetch replaces the cache entry for
/// the document URL with the dataset the pod returned.
///
/// Writes carry the entity tag of the cached version, so a write based on
/// an outdated dataset fails with `StaleCollection` instead of silently
/// discarding another writer's changes. After such a failure the cache
/// entry is dropped and the next operation starts from a fresh fetch.
pub struct RdfCollection<C: CollectionCodec> {
    pod: Arc<dyn PodClient>,
    cache: Arc<CollectionCache>,
    url: String,
    codec: C,
    create_acl: Option<CreateAcl>,
}

/// Access granted when the collection creates its document
#[derive(Debug, Clone)]
struct CreateAcl {
    owner_web_id: String,
    owner_modes: AccessModes,
    public_modes: AccessModes,
}

impl<C: CollectionCodec> RdfCollection<C> {
    pub fn new(
        pod: Arc<dyn PodClient>,
        cache: Arc<CollectionCache>,
        url: impl Into<String>,
        codec: C,
    ) -> Self {
        Self {
            pod,
            cache,
            url: url.into(),
            codec,
            create_acl: None,
        }
    }

    /// Write an access control list right after creating the document
    pub fn with_acl_on_create(
        mut self,
        owner_web_id: impl Into<String>,
        owner_modes: AccessModes,
        public_modes: AccessModes,
    ) -> Self {
        self.create_acl = Some(CreateAcl {
            owner_web_id: owner_web_id.into(),
            owner_modes,
            public_modes,
        });
        self
    }

    /// Document URL, also the cache key
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn pod(&self) -> &Arc<dyn PodClient> {
        &self.pod
    }

    /// Fetch the document, creating it when missing, and parse it.
    pub async fn load(&self) -> CollectionResult<C::Output> {
        let dataset = self.fetch_document().await?;
        self.codec.parse(&dataset)
    }

    /// Add or overwrite one item and persist the document.
    pub async fn add(&self, item: &C::Item) -> CollectionResult<C::Output> {
        let thing = self.codec.serialize(item);
        debug!(url = self.url.as_str(), subject = thing.url(), "adding to collection");
        self.modify(|dataset| {
            dataset.set_thing(thing);
            true
        })
        .await
    }

    /// Remove the item whose local name is `item_id` and persist.
    ///
    /// Removing an item that is not present writes nothing and returns the
    /// collection as cached.
    pub async fn delete(&self, item_id: &str) -> CollectionResult<C::Output> {
        self.modify(|dataset| {
            let subject = dataset.thing_url(item_id);
            let removed = dataset.remove_thing(&subject).is_some();
            if !removed {
                debug!(subject = subject.as_str(), "nothing to delete");
            }
            removed
        })
        .await
    }

    /// Drop the cache entry and load again
    pub async fn refetch(&self) -> CollectionResult<C::Output> {
        self.cache.invalidate(&self.url);
        self.load().await
    }

    /// Parsed cached value, without touching the network
    pub fn cached(&self) -> Option<CollectionResult<C::Output>> {
        self.cache.get(&self.url).map(|dataset| self.codec.parse(&dataset))
    }

    /// The cached dataset, or the fetched one when nothing is cached
    pub async fn dataset(&self) -> CollectionResult<Dataset> {
        match self.cache.get(&self.url) {
            Some(dataset) => Ok(dataset),
            None => self.fetch_document().await,
        }
    }

    /// Read-modify-write on the document.
    ///
    /// `change` returns whether it changed anything; unchanged datasets are
    /// not written back.
    pub async fn modify<F>(&self, change: F) -> CollectionResult<C::Output>
    where
        F: FnOnce(&mut Dataset) -> bool + Send,
    {
        let mut dataset = self.dataset().await?;
        if !change(&mut dataset) {
            return self.codec.parse(&dataset);
        }
        let saved = self.save(&dataset).await?;
        self.codec.parse(&saved)
    }

    async fn fetch_document(&self) -> CollectionResult<Dataset> {
        let dataset = match self.pod.fetch_dataset(&self.url).await {
            Ok(dataset) => dataset,
            Err(PodError::NotFound(_)) => {
                info!(url = self.url.as_str(), "document missing, creating it");
                let mut fresh = Dataset::new(self.url.clone());
                self.codec.initialize(&mut fresh);
                let created = match self.pod.save_dataset(&fresh, Precondition::Create).await {
                    Ok(created) => created,
                    Err(e) if e.is_stale() => {
                        // created by someone else in the meantime; theirs stands
                        debug!(url = self.url.as_str(), "document appeared while creating it");
                        let existing = self.pod.fetch_dataset(&self.url).await?;
                        self.cache.put(existing.clone());
                        return Ok(existing);
                    }
                    Err(e) => return Err(e.into()),
                };
                if let Some(grant) = &self.create_acl {
                    acl::set_doc_acl(
                        self.pod.as_ref(),
                        &self.url,
                        &grant.owner_web_id,
                        grant.owner_modes,
                        grant.public_modes,
                    )
                    .await?;
                }
                created
            }
            Err(e) => return Err(e.into()),
        };
        self.cache.put(dataset.clone());
        Ok(dataset)
    }

    async fn save(&self, dataset: &Dataset) -> CollectionResult<Dataset> {
        let precondition = Precondition::for_dataset(dataset);
        match self.pod.save_dataset(dataset, precondition).await {
            Ok(saved) => {
                self.cache.put(saved.clone());
                Ok(saved)
            }
            Err(e) => {
                if e.is_stale() {
                    warn!(url = self.url.as_str(), "collection changed remotely, dropping cached copy");
                    self.cache.invalidate(&self.url);
                }
                Err(e.into())
            }
        }
    }
}
