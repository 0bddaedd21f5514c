//! Typed collections stored in PASS pods
//!
//! Each collection pairs a record type with the pod-relative document it
//! lives in. All of them delegate to [`RdfCollection`](crate::collection::RdfCollection)
//! for loading, creating and saving.

pub mod activity;
mod contact;
mod document;
mod message;
mod user;

pub use activity::{load_user_activity, update_user_activity, ActivityCodec, ACTIVITY_PATH};
pub use contact::{Contact, ContactsList, CONTACTS_PATH};
pub use document::{DocumentList, DocumentRecord, DOCUMENTS_PATH};
pub use message::{unread_count, MailBox, Message, MessageList};
pub use user::{User, UsersList, USERS_PATH};
