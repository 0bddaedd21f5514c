//! Turtle reader and writer
//!
//! Syntax is handled by `oxttl`; this module maps its triples onto
//! [`Dataset`] and back. Blank-node subjects are kept as anonymous Things
//! so nested descriptions in profiles and ACLs survive a rewrite.

use super::dataset::Dataset;
use super::term::{Literal, Term};
use super::thing::Thing;
use super::vocab::{xsd, PREFIXES};
use oxrdf::{BlankNode, Literal as RdfLiteral, NamedNode, Subject, Term as RdfTerm, Triple};
use oxttl::{TurtleParser, TurtleSerializer};
use std::collections::BTreeMap;
use std::fmt::Display;
use thiserror::Error;

/// Errors raised while reading or writing Turtle
#[derive(Debug, Error)]
pub enum RdfError {
    #[error("Turtle syntax error: {0}")]
    Syntax(String),

    #[error("Invalid IRI '{iri}': {reason}")]
    InvalidIri { iri: String, reason: String },

    #[error("Invalid blank node label '{label}': {reason}")]
    InvalidBlankNode { label: String, reason: String },

    #[error("Invalid language tag '{tag}': {reason}")]
    InvalidLanguage { tag: String, reason: String },

    #[error("Failed to write Turtle: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type for RDF operations
pub type RdfResult<T> = Result<T, RdfError>;

/// Prefix marking the URL of an anonymous Thing
pub(crate) const BLANK_PREFIX: &str = "_:";

fn invalid_iri(iri: &str, reason: impl Display) -> RdfError {
    RdfError::InvalidIri {
        iri: iri.to_string(),
        reason: reason.to_string(),
    }
}

fn document_base(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

fn from_rdf_literal(lit: &RdfLiteral) -> Literal {
    match lit.language() {
        Some(language) => Literal::lang(lit.value(), language),
        None => Literal::typed(lit.value(), lit.datatype().as_str()),
    }
}

/// Parse a Turtle document fetched from `document_url`.
///
/// Relative IRIs resolve against the document URL (or a later `@base`).
pub fn parse_turtle(input: &str, document_url: &str) -> RdfResult<Dataset> {
    let base = document_base(document_url);
    let parser = TurtleParser::new()
        .with_base_iri(base)
        .map_err(|e| invalid_iri(base, e))?;

    let mut named: BTreeMap<String, Thing> = BTreeMap::new();
    let mut anonymous: BTreeMap<String, Thing> = BTreeMap::new();
    for triple in parser.for_reader(input.as_bytes()) {
        let triple = triple.map_err(|e| RdfError::Syntax(e.to_string()))?;
        let object = match &triple.object {
            RdfTerm::NamedNode(node) => Term::Iri(node.as_str().to_string()),
            RdfTerm::BlankNode(node) => Term::Blank(node.as_str().to_string()),
            RdfTerm::Literal(lit) => Term::Literal(from_rdf_literal(lit)),
            #[allow(unreachable_patterns)]
            _ => continue,
        };
        let thing = match &triple.subject {
            Subject::NamedNode(node) => named
                .entry(node.as_str().to_string())
                .or_insert_with_key(|url| Thing::new(url.clone())),
            Subject::BlankNode(node) => anonymous
                .entry(node.as_str().to_string())
                .or_insert_with_key(|label| Thing::new(format!("{}{}", BLANK_PREFIX, label))),
            #[allow(unreachable_patterns)]
            _ => continue,
        };
        thing.push(triple.predicate.as_str(), object);
    }

    Ok(Dataset::from_parts(
        document_url,
        named.into_values(),
        anonymous.into_values(),
    ))
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn named_node(iri: &str) -> RdfResult<NamedNode> {
    NamedNode::new(iri).map_err(|e| invalid_iri(iri, e))
}

fn blank_node(label: &str) -> RdfResult<BlankNode> {
    BlankNode::new(label).map_err(|e| RdfError::InvalidBlankNode {
        label: label.to_string(),
        reason: e.to_string(),
    })
}

fn subject(url: &str) -> RdfResult<Subject> {
    match url.strip_prefix(BLANK_PREFIX) {
        Some(label) => Ok(blank_node(label)?.into()),
        None => Ok(named_node(url)?.into()),
    }
}

fn rdf_term(term: &Term) -> RdfResult<RdfTerm> {
    Ok(match term {
        Term::Iri(iri) => named_node(iri)?.into(),
        Term::Blank(label) => blank_node(label)?.into(),
        Term::Literal(lit) => match &lit.language {
            Some(tag) => RdfLiteral::new_language_tagged_literal(lit.value.as_str(), tag.as_str())
                .map_err(|e| RdfError::InvalidLanguage {
                    tag: tag.clone(),
                    reason: e.to_string(),
                })?
                .into(),
            None if lit.datatype == xsd::STRING => {
                RdfLiteral::new_simple_literal(lit.value.as_str()).into()
            }
            None => {
                RdfLiteral::new_typed_literal(lit.value.as_str(), named_node(&lit.datatype)?).into()
            }
        },
    })
}

/// Serialize a dataset as Turtle.
///
/// Every IRI is checked before anything is written, so a Thing holding
/// a malformed IRI fails here instead of producing a document that can no
/// longer be read.
pub fn to_turtle(dataset: &Dataset) -> RdfResult<String> {
    let mut triples = Vec::new();
    for thing in dataset.get_thing_all().chain(dataset.anonymous_things()) {
        let subject = subject(thing.url())?;
        for (predicate, terms) in thing.predicates() {
            let predicate = named_node(predicate)?;
            for term in terms {
                triples.push(Triple::new(subject.clone(), predicate.clone(), rdf_term(term)?));
            }
        }
    }
    if triples.is_empty() {
        return Ok(String::new());
    }

    let mut serializer = TurtleSerializer::new();
    for (prefix, namespace) in PREFIXES {
        serializer = serializer
            .with_prefix(*prefix, *namespace)
            .map_err(|e| invalid_iri(namespace, e))?;
    }
    let mut writer = serializer.for_writer(Vec::new());
    for triple in &triples {
        writer.serialize_triple(triple)?;
    }
    let bytes = writer.finish()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
