//! RDF collection adapter
//!
//! A collection wraps one pod document with load/add/delete/refetch and
//! create-on-missing semantics. Specialized collections (contacts, users,
//! messages, documents) supply a codec and a URL convention.

mod adapter;
mod cache;
mod traits;

pub use adapter::RdfCollection;
pub use cache::{CacheEntry, CollectionCache};
pub use traits::{
    optional_date, optional_datetime, required_datetime, required_string, required_url,
    CollectionCodec, CollectionError, CollectionResult, Record, RecordList,
};
