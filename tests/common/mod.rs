//! Shared fixtures for the integration tests
//!
//! Every test runs against a fresh `MemoryPod`, so documents, ETags and
//! the write log start empty.

pub mod generate;

use pass::{MemoryPod, PassClient, Session};
use std::sync::Arc;

pub const ALICE_WEB_ID: &str = "https://alice.example/profile/card#me";
pub const ALICE_POD: &str = "https://alice.example/";
pub const BOB_WEB_ID: &str = "https://bob.example/profile/card#me";
pub const BOB_POD: &str = "https://bob.example/";

pub fn alice_session() -> Session {
    Session::new(ALICE_WEB_ID, ALICE_POD)
}

/// A client signed in as Alice, plus the pod it writes to
pub fn alice() -> (PassClient, Arc<MemoryPod>) {
    let pod = Arc::new(MemoryPod::new());
    (PassClient::new(pod.clone(), alice_session()), pod)
}

/// A second client on the same pod, with its own cache
pub fn second_client(pod: &Arc<MemoryPod>, web_id: &str, pod_url: &str) -> PassClient {
    PassClient::new(pod.clone(), Session::new(web_id, pod_url))
}
