//! Pod access for PASS
//!
//! All persistence goes through the `PodClient` trait. `HttpPod` talks to a
//! Solid server; `MemoryPod` keeps documents in-process.

pub mod acl;
mod http;
mod memory;
mod traits;

pub use acl::AccessModes;
pub use http::HttpPod;
pub use memory::{MemoryPod, WriteRecord};
pub use traits::{PodClient, PodError, PodResult, Precondition};
