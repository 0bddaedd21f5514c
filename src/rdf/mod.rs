//! RDF data structures for pod documents
//!
//! A pod document is a `Dataset`: a set of `Thing`s keyed by subject URL.
//! Each Thing maps predicate IRIs to one or more `Term`s.

mod dataset;
mod term;
mod thing;
pub mod turtle;
pub mod vocab;

#[cfg(test)]
mod tests;

pub use dataset::Dataset;
pub use term::{timestamp_now, Literal, Term};
pub use thing::{decode_component, encode_component, Thing, ThingBuilder};
pub use turtle::{RdfError, RdfResult};
