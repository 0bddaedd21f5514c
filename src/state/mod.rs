//! Persisted client state
//!
//! What a browser client would keep in local storage (sign-in status, the
//! page to return to, cached profile data) behind the `StateStore` trait.
//! `SqliteState` persists across runs; `MemoryState` is for tests and
//! one-shot use.

mod memory;
mod sqlite;
mod traits;

pub use memory::MemoryState;
pub use sqlite::SqliteState;
pub use traits::{StateError, StateKey, StateResult, StateStore};
