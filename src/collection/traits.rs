//! Codec traits: how a collection turns datasets into domain values

use crate::pod::PodError;
use crate::rdf::{Dataset, Thing};
use chrono::{DateTime, NaiveDate, Utc};
use std::marker::PhantomData;
use thiserror::Error;

/// Errors from collection operations
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error(transparent)]
    Pod(#[from] PodError),

    /// A Thing lacks a required field or holds a value of the wrong type
    #[error("Malformed record {subject}: missing or invalid {field}")]
    MalformedRecord {
        subject: String,
        field: &'static str,
    },
}

impl CollectionError {
    pub fn malformed(thing: &Thing, field: &'static str) -> Self {
        Self::MalformedRecord {
            subject: thing.url().to_string(),
            field,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Pod(e) if e.is_stale())
    }
}

/// Result type for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Converts between a whole dataset and the value a collection exposes.
pub trait CollectionCodec: Send + Sync {
    /// What `add` accepts
    type Item: Send + Sync;
    /// What `load`, `add` and `delete` return
    type Output: Send;

    /// Project the dataset into the collection value
    fn parse(&self, dataset: &Dataset) -> CollectionResult<Self::Output>;

    /// Build the Thing for one item. Its local name must be stable so a
    /// second add overwrites rather than duplicates.
    fn serialize(&self, item: &Self::Item) -> Thing;

    /// Seed a document that is being created because it was missing
    fn initialize(&self, _dataset: &mut Dataset) {}
}

/// A domain record stored as one Thing
pub trait Record: Sized + Send + Sync {
    /// Validate and read a Thing
    fn from_thing(thing: &Thing) -> CollectionResult<Self>;

    /// Build the Thing, local to whichever document it is stored in
    fn to_thing(&self) -> Thing;
}

/// Codec for documents holding one record per Thing.
///
/// Things whose fragment is listed in `skip` (document headers and the
/// like) are not treated as records.
pub struct RecordList<R> {
    skip: Vec<String>,
    header: Option<Thing>,
    _record: PhantomData<fn() -> R>,
}

impl<R> RecordList<R> {
    pub fn new() -> Self {
        Self {
            skip: Vec::new(),
            header: None,
            _record: PhantomData,
        }
    }

    pub fn skipping(mut self, fragment: impl Into<String>) -> Self {
        self.skip.push(fragment.into());
        self
    }

    /// Write `header` into the document when it is created, and never
    /// parse it as a record
    pub fn with_header(mut self, header: Thing) -> Self {
        if let Some(fragment) = header.fragment() {
            self.skip.push(fragment.to_string());
        }
        self.header = Some(header);
        self
    }
}

impl<R> Default for RecordList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> CollectionCodec for RecordList<R> {
    type Item = R;
    type Output = Vec<R>;

    fn parse(&self, dataset: &Dataset) -> CollectionResult<Vec<R>> {
        dataset
            .get_thing_all()
            .filter(|thing| {
                thing
                    .fragment()
                    .map_or(true, |frag| !self.skip.iter().any(|s| s == frag))
            })
            .map(R::from_thing)
            .collect()
    }

    fn serialize(&self, item: &R) -> Thing {
        item.to_thing()
    }

    fn initialize(&self, dataset: &mut Dataset) {
        if let Some(header) = &self.header {
            dataset.set_thing(header.clone());
        }
    }
}

// === Field readers for Record implementations ===

pub fn required_string(thing: &Thing, predicate: &str, field: &'static str) -> CollectionResult<String> {
    thing
        .get_string_no_locale(predicate)
        .map(str::to_string)
        .ok_or_else(|| CollectionError::malformed(thing, field))
}

pub fn required_url(thing: &Thing, predicate: &str, field: &'static str) -> CollectionResult<String> {
    thing
        .get_url(predicate)
        .map(str::to_string)
        .ok_or_else(|| CollectionError::malformed(thing, field))
}

pub fn required_datetime(
    thing: &Thing,
    predicate: &str,
    field: &'static str,
) -> CollectionResult<DateTime<Utc>> {
    thing
        .get_datetime(predicate)
        .ok_or_else(|| CollectionError::malformed(thing, field))
}

/// An optional field that, when present, must still have the right type
pub fn optional_date(
    thing: &Thing,
    predicate: &str,
    field: &'static str,
) -> CollectionResult<Option<NaiveDate>> {
    if thing.terms(predicate).is_empty() {
        return Ok(None);
    }
    thing
        .get_date(predicate)
        .map(Some)
        .ok_or_else(|| CollectionError::malformed(thing, field))
}

pub fn optional_datetime(
    thing: &Thing,
    predicate: &str,
    field: &'static str,
) -> CollectionResult<Option<DateTime<Utc>>> {
    if thing.terms(predicate).is_empty() {
        return Ok(None);
    }
    thing
        .get_datetime(predicate)
        .map(Some)
        .ok_or_else(|| CollectionError::malformed(thing, field))
}
