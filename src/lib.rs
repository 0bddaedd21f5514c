//! PASS: pod data layer for a caseworker/client records application
//!
//! Typed CRUD over RDF Things stored in per-user Solid pods: contacts,
//! the users (clients) a caseworker manages, inbox and outbox messages,
//! document metadata, access control lists and a last-active timestamp.
//!
//! # Core Concepts
//!
//! - **Dataset**: the Things of one pod document, with the entity tag the
//!   server reported
//! - **RdfCollection**: load/add/delete/refetch over one document, created
//!   on first load when missing
//! - **CollectionCache**: the last fetched or saved dataset per document URL
//!
//! # Example
//!
//! ```
//! use pass::{MemoryPod, PassClient, Session};
//! use std::sync::Arc;
//!
//! let session = Session::new("https://alice.example/profile/card#me", "https://alice.example/");
//! let client = PassClient::new(Arc::new(MemoryPod::new()), session);
//! assert_eq!(
//!     client.contacts().unwrap().url(),
//!     "https://alice.example/PASS/Users/userlist.ttl"
//! );
//! ```

mod client;
pub mod collection;
pub mod config;
pub mod model;
pub mod pod;
pub mod rdf;
pub mod session;
pub mod state;

pub use client::PassClient;
pub use collection::{CollectionCache, CollectionError, CollectionResult, RdfCollection};
pub use config::{ConfigError, PassConfig};
pub use model::{
    Contact, ContactsList, DocumentList, DocumentRecord, MailBox, Message, MessageList, User,
    UsersList,
};
pub use pod::{AccessModes, HttpPod, MemoryPod, PodClient, PodError, PodResult};
pub use rdf::{Dataset, RdfError, Thing, ThingBuilder};
pub use session::Session;
pub use state::{MemoryState, SqliteState, StateError, StateKey, StateStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
