//! Things: RDF subjects with their predicate/value pairs

use super::term::{Literal, Term};
use chrono::{DateTime, NaiveDate, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Characters `encodeURIComponent` leaves unescaped, besides alphanumerics
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a string for use as a URL fragment or path segment.
///
/// Leaves the same characters unescaped as the browser's
/// `encodeURIComponent`, so fragments written here match the ones other
/// pod clients produce for the same local name.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Reverse of [`encode_component`]
pub fn decode_component(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// An RDF subject and its predicates.
///
/// A Thing created with [`Thing::local`] has a fragment-only subject
/// (`#name`) that is resolved against the document URL when it is put
/// into a [`Dataset`](super::Dataset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    url: String,
    predicates: BTreeMap<String, Vec<Term>>,
}

impl Thing {
    /// Create an empty Thing with an absolute subject URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            predicates: BTreeMap::new(),
        }
    }

    /// Create an empty Thing local to whatever document it is stored in
    pub fn local(name: &str) -> Self {
        Self::new(format!("#{}", encode_component(name)))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// True while the subject is still relative to its future document
    pub fn is_local(&self) -> bool {
        self.url.starts_with('#')
    }

    /// The fragment of the subject URL, if any
    pub fn fragment(&self) -> Option<&str> {
        self.url.split_once('#').map(|(_, frag)| frag)
    }

    /// The local name this Thing was created with: its fragment, decoded
    pub fn local_name(&self) -> Option<String> {
        self.fragment().map(decode_component)
    }

    pub(crate) fn resolve_against(&mut self, document_url: &str) {
        if self.is_local() {
            let base = document_url.split('#').next().unwrap_or(document_url);
            self.url = format!("{}{}", base, self.url);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.values().all(|terms| terms.is_empty())
    }

    /// Predicates in IRI order
    pub fn predicates(&self) -> impl Iterator<Item = (&str, &[Term])> {
        self.predicates
            .iter()
            .filter(|(_, terms)| !terms.is_empty())
            .map(|(p, terms)| (p.as_str(), terms.as_slice()))
    }

    pub fn terms(&self, predicate: &str) -> &[Term] {
        self.predicates
            .get(predicate)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn push(&mut self, predicate: &str, term: Term) {
        let terms = self.predicates.entry(predicate.to_string()).or_default();
        if !terms.contains(&term) {
            terms.push(term);
        }
    }

    pub(crate) fn clear(&mut self, predicate: &str) {
        self.predicates.remove(predicate);
    }

    fn literals<'a>(&'a self, predicate: &str) -> impl Iterator<Item = &'a Literal> {
        self.terms(predicate).iter().filter_map(Term::as_literal)
    }

    // === Typed getters ===

    /// First plain string literal for the predicate
    pub fn get_string_no_locale(&self, predicate: &str) -> Option<&str> {
        self.literals(predicate)
            .find(|lit| lit.is_string_no_locale())
            .map(|lit| lit.value.as_str())
    }

    /// First string literal tagged with the given language
    pub fn get_string_with_locale(&self, predicate: &str, language: &str) -> Option<&str> {
        self.literals(predicate)
            .find(|lit| {
                lit.language
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(language))
            })
            .map(|lit| lit.value.as_str())
    }

    /// First named node for the predicate
    pub fn get_url(&self, predicate: &str) -> Option<&str> {
        self.terms(predicate).iter().find_map(Term::as_iri)
    }

    /// All named nodes for the predicate
    pub fn get_url_all(&self, predicate: &str) -> Vec<&str> {
        self.terms(predicate).iter().filter_map(Term::as_iri).collect()
    }

    pub fn get_datetime(&self, predicate: &str) -> Option<DateTime<Utc>> {
        self.literals(predicate).find_map(Literal::as_datetime)
    }

    pub fn get_date(&self, predicate: &str) -> Option<NaiveDate> {
        self.literals(predicate).find_map(Literal::as_date)
    }

    pub fn get_boolean(&self, predicate: &str) -> Option<bool> {
        self.literals(predicate).find_map(Literal::as_bool)
    }
}

/// Fluent builder over a [`Thing`].
///
/// `add_*` appends a value; `set_*` replaces every value of the predicate.
///
/// ```
/// use pass::rdf::{ThingBuilder, vocab::predicates};
///
/// let thing = ThingBuilder::local("alice")
///     .add_string_no_locale(predicates::GIVEN_NAME, "Alice")
///     .build();
/// assert_eq!(thing.get_string_no_locale(predicates::GIVEN_NAME), Some("Alice"));
/// ```
#[derive(Debug, Clone)]
pub struct ThingBuilder {
    thing: Thing,
}

impl ThingBuilder {
    /// Start from an existing Thing, keeping its values
    pub fn new(thing: Thing) -> Self {
        Self { thing }
    }

    pub fn local(name: &str) -> Self {
        Self::new(Thing::local(name))
    }

    pub fn add_term(mut self, predicate: &str, term: Term) -> Self {
        self.thing.push(predicate, term);
        self
    }

    pub fn set_term(mut self, predicate: &str, term: Term) -> Self {
        self.thing.clear(predicate);
        self.thing.push(predicate, term);
        self
    }

    pub fn add_string_no_locale(self, predicate: &str, value: impl Into<String>) -> Self {
        self.add_term(predicate, Literal::string(value).into())
    }

    pub fn set_string_no_locale(self, predicate: &str, value: impl Into<String>) -> Self {
        self.set_term(predicate, Literal::string(value).into())
    }

    pub fn add_url(self, predicate: &str, url: impl Into<String>) -> Self {
        self.add_term(predicate, Term::Iri(url.into()))
    }

    pub fn add_datetime(self, predicate: &str, value: DateTime<Utc>) -> Self {
        self.add_term(predicate, Literal::datetime(value).into())
    }

    pub fn set_datetime(self, predicate: &str, value: DateTime<Utc>) -> Self {
        self.set_term(predicate, Literal::datetime(value).into())
    }

    pub fn add_date(self, predicate: &str, value: NaiveDate) -> Self {
        self.add_term(predicate, Literal::date(value).into())
    }

    pub fn add_boolean(self, predicate: &str, value: bool) -> Self {
        self.add_term(predicate, Literal::boolean(value).into())
    }

    pub fn set_boolean(self, predicate: &str, value: bool) -> Self {
        self.set_term(predicate, Literal::boolean(value).into())
    }

    /// Add the value only when present
    pub fn add_optional<T>(
        self,
        value: Option<T>,
        add: impl FnOnce(Self, T) -> Self,
    ) -> Self {
        match value {
            Some(v) => add(self, v),
            None => self,
        }
    }

    pub fn build(self) -> Thing {
        self.thing
    }
}
