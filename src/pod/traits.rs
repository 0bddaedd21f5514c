//! Pod client trait definitions

use crate::rdf::{Dataset, RdfError};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to a pod
#[derive(Debug, Error)]
pub enum PodError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The document changed on the server after it was read
    #[error("Stale collection: {0} was modified since it was loaded")]
    StaleCollection(String),

    #[error("Unexpected status {code} for {url}")]
    Status { code: u16, url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RDF error: {0}")]
    Rdf(#[from] RdfError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl PodError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleCollection(_))
    }
}

/// Result type for pod operations
pub type PodResult<T> = Result<T, PodError>;

/// Condition attached to a document write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// Unconditional write; last writer wins
    None,
    /// Only create: fail if the document already exists
    Create,
    /// Only replace the version with this entity tag
    Match(String),
}

impl Precondition {
    /// The precondition for replacing the version `dataset` was read as
    pub fn for_dataset(dataset: &Dataset) -> Self {
        match dataset.etag() {
            Some(etag) => Self::Match(etag.to_string()),
            None => Self::None,
        }
    }
}

/// The persistence boundary: read and write whole RDF documents.
///
/// Implementations must be thread-safe (Send + Sync) so one client can be
/// shared by every collection of a session.
#[async_trait]
pub trait PodClient: Send + Sync {
    /// Fetch and parse the document at `url`.
    ///
    /// A missing document is `PodError::NotFound`.
    async fn fetch_dataset(&self, url: &str) -> PodResult<Dataset>;

    /// Write `dataset` to its URL and return it as persisted, carrying the
    /// entity tag of the new version when the server reports one.
    ///
    /// A failed `Create` or `Match` precondition is
    /// `PodError::StaleCollection`.
    async fn save_dataset(&self, dataset: &Dataset, precondition: Precondition)
        -> PodResult<Dataset>;

    /// URL of the access control document for `resource_url`
    async fn acl_url(&self, resource_url: &str) -> PodResult<String> {
        Ok(format!("{}.acl", resource_url))
    }
}
