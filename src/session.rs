//! Signed-in session and pod URL discovery

use crate::pod::{PodClient, PodError, PodResult};
use crate::rdf::vocab::pim;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The identity a PASS client acts as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// WebID of the signed-in user
    pub web_id: String,
    /// Root of the user's pod, always ending in `/`
    pub pod_url: String,
}

impl Session {
    pub fn new(web_id: impl Into<String>, pod_url: impl Into<String>) -> Self {
        let mut pod_url = pod_url.into();
        if !pod_url.ends_with('/') {
            pod_url.push('/');
        }
        Self {
            web_id: web_id.into(),
            pod_url,
        }
    }

    /// Build a session for `web_id`, discovering its pod
    pub async fn discover<P: PodClient + ?Sized>(pod: &P, web_id: &str) -> PodResult<Self> {
        let pod_url = resolve_pod_url(pod, web_id).await?;
        Ok(Self::new(web_id, pod_url))
    }

    /// URL of a pod-relative path
    pub fn resolve(&self, path: &str) -> PodResult<String> {
        join_url(&self.pod_url, path)
    }
}

/// Join a relative path onto a base URL
pub fn join_url(base: &str, path: &str) -> PodResult<String> {
    let base_url = Url::parse(base).map_err(|e| PodError::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    base_url
        .join(path)
        .map(|u| u.to_string())
        .map_err(|e| PodError::InvalidUrl {
            url: path.to_string(),
            reason: e.to_string(),
        })
}

/// Fallback pod URL: everything before `profile` in the WebID
pub fn pod_url_from_web_id(web_id: &str) -> String {
    web_id
        .split("profile")
        .next()
        .unwrap_or(web_id)
        .to_string()
}

/// Every storage root the WebID profile advertises via `pim:storage`
pub async fn discover_pod_urls<P: PodClient + ?Sized>(
    pod: &P,
    web_id: &str,
) -> PodResult<Vec<String>> {
    let profile_url = web_id.split('#').next().unwrap_or(web_id);
    let profile = pod.fetch_dataset(profile_url).await?;
    let mut storages: Vec<String> = profile
        .get_thing(web_id)
        .map(|me| {
            me.get_url_all(pim::STORAGE)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if storages.is_empty() {
        // some servers put the storage triple on the profile document itself
        storages = profile
            .get_thing_all()
            .flat_map(|thing| thing.get_url_all(pim::STORAGE))
            .map(str::to_string)
            .collect();
    }
    Ok(storages)
}

/// The first advertised storage, or the WebID-derived fallback when the
/// profile cannot be read or advertises none
pub async fn resolve_pod_url<P: PodClient + ?Sized>(pod: &P, web_id: &str) -> PodResult<String> {
    match discover_pod_urls(pod, web_id).await {
        Ok(urls) if !urls.is_empty() => Ok(urls[0].clone()),
        Ok(_) => Ok(pod_url_from_web_id(web_id)),
        Err(e) => {
            debug!(web_id, error = %e, "pod discovery failed, deriving pod url from web id");
            Ok(pod_url_from_web_id(web_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pod::MemoryPod;

    const WEB_ID: &str = "https://alice.example/profile/card#me";

    #[test]
    fn fallback_strips_profile_path() {
        assert_eq!(pod_url_from_web_id(WEB_ID), "https://alice.example/");
        assert_eq!(pod_url_from_web_id("https://x.example/me"), "https://x.example/me");
    }

    #[test]
    fn session_normalizes_pod_url() {
        let session = Session::new(WEB_ID, "https://alice.example");
        assert_eq!(session.pod_url, "https://alice.example/");
        assert_eq!(
            session.resolve("PASS/Users/userlist.ttl").unwrap(),
            "https://alice.example/PASS/Users/userlist.ttl"
        );
    }

    #[tokio::test]
    async fn discovery_reads_pim_storage() {
        let pod = MemoryPod::new();
        pod.insert_turtle(
            "https://alice.example/profile/card",
            "<#me> <http://www.w3.org/ns/pim/space#storage> <https://storage.example/alice/> .",
        );
        let urls = discover_pod_urls(&pod, WEB_ID).await.unwrap();
        assert_eq!(urls, vec!["https://storage.example/alice/".to_string()]);

        let session = Session::discover(&pod, WEB_ID).await.unwrap();
        assert_eq!(session.pod_url, "https://storage.example/alice/");
    }

    #[tokio::test]
    async fn discovery_falls_back_when_profile_missing() {
        let pod = MemoryPod::new();
        let url = resolve_pod_url(&pod, WEB_ID).await.unwrap();
        assert_eq!(url, "https://alice.example/");
    }
}
