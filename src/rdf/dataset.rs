//! Dataset: the in-memory form of one pod document

use super::term::Term;
use super::thing::{encode_component, Thing};
use super::turtle::BLANK_PREFIX;
use std::collections::{BTreeMap, BTreeSet};

/// The Things of one remote document.
///
/// Carries the document URL and the entity tag the server reported for
/// the version this dataset was read from or written as. Things are kept
/// in subject order; insertion order is not preserved.
///
/// Blank-node subjects are held apart as anonymous Things. They are not
/// returned by [`get_thing_all`](Self::get_thing_all) and are written back
/// as long as a named Thing still refers to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    url: String,
    etag: Option<String>,
    things: BTreeMap<String, Thing>,
    anonymous: BTreeMap<String, Thing>,
}

impl Dataset {
    /// An empty dataset that has never been persisted
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            etag: None,
            things: BTreeMap::new(),
            anonymous: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        url: impl Into<String>,
        things: impl IntoIterator<Item = Thing>,
        anonymous: impl IntoIterator<Item = Thing>,
    ) -> Self {
        let mut dataset = Self::new(url);
        for thing in things {
            dataset.set_thing(thing);
        }
        dataset.anonymous = anonymous
            .into_iter()
            .map(|thing| (thing.url().to_string(), thing))
            .collect();
        dataset
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn with_etag(mut self, etag: Option<String>) -> Self {
        self.etag = etag;
        self
    }

    pub fn set_etag(&mut self, etag: Option<String>) {
        self.etag = etag;
    }

    /// Subject URL of a local name in this document
    pub fn thing_url(&self, name: &str) -> String {
        let base = self.url.split('#').next().unwrap_or(&self.url);
        format!("{}#{}", base, encode_component(name))
    }

    pub fn get_thing(&self, url: &str) -> Option<&Thing> {
        self.things.get(url)
    }

    pub fn get_thing_all(&self) -> impl Iterator<Item = &Thing> {
        self.things.values()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.things.contains_key(url)
    }

    /// Insert a Thing, replacing any Thing with the same subject.
    ///
    /// Fragment-only subjects are resolved against the document URL first.
    pub fn set_thing(&mut self, mut thing: Thing) {
        thing.resolve_against(&self.url);
        if self.things.insert(thing.url().to_string(), thing).is_some() {
            self.prune_anonymous();
        }
    }

    pub fn remove_thing(&mut self, url: &str) -> Option<Thing> {
        let removed = self.things.remove(url);
        if removed.is_some() {
            self.prune_anonymous();
        }
        removed
    }

    /// Blank-node subjects, in label order
    pub fn anonymous_things(&self) -> impl Iterator<Item = &Thing> {
        self.anonymous.values()
    }

    /// Drop anonymous Things no named Thing reaches any more
    fn prune_anonymous(&mut self) {
        if self.anonymous.is_empty() {
            return;
        }
        let mut reachable = BTreeSet::new();
        let mut pending: Vec<&Thing> = self.things.values().collect();
        while let Some(thing) = pending.pop() {
            for (_, terms) in thing.predicates() {
                for term in terms {
                    if let Term::Blank(label) = term {
                        let url = format!("{}{}", BLANK_PREFIX, label);
                        if let Some(next) = self.anonymous.get(&url) {
                            if reachable.insert(url) {
                                pending.push(next);
                            }
                        }
                    }
                }
            }
        }
        self.anonymous.retain(|url, _| reachable.contains(url));
    }

    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }
}
