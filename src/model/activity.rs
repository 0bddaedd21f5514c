//! Last-active timestamp kept in each user's public folder

use crate::collection::{CollectionCache, CollectionCodec, CollectionResult, RdfCollection};
use crate::pod::{AccessModes, PodClient, PodResult};
use crate::rdf::vocab::predicates;
use crate::rdf::{timestamp_now, Dataset, Thing, ThingBuilder};
use crate::session::{join_url, Session};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Pod-relative path of the activity document
pub const ACTIVITY_PATH: &str = "public/active.ttl";
const ACTIVE: &str = "active";

/// Codec for the single `#active` Thing
pub struct ActivityCodec;

impl CollectionCodec for ActivityCodec {
    type Item = DateTime<Utc>;
    type Output = Option<DateTime<Utc>>;

    fn parse(&self, dataset: &Dataset) -> CollectionResult<Option<DateTime<Utc>>> {
        Ok(dataset
            .get_thing_all()
            .next()
            .and_then(|thing| thing.get_datetime(predicates::DATE_MODIFIED)))
    }

    fn serialize(&self, when: &DateTime<Utc>) -> Thing {
        ThingBuilder::local(ACTIVE)
            .set_datetime(predicates::DATE_MODIFIED, *when)
            .build()
    }
}

/// The signed-in user's activity document.
///
/// Created on first use, readable by everyone and fully controlled by the
/// owner, so caseworkers can see when a client last used PASS.
pub fn activity_collection(
    pod: Arc<dyn PodClient>,
    cache: Arc<CollectionCache>,
    session: &Session,
) -> PodResult<RdfCollection<ActivityCodec>> {
    let url = session.resolve(ACTIVITY_PATH)?;
    Ok(RdfCollection::new(pod, cache, url, ActivityCodec).with_acl_on_create(
        session.web_id.clone(),
        AccessModes::FULL,
        AccessModes::READ_ONLY,
    ))
}

/// Record that the signed-in user is active now
pub async fn update_user_activity(
    pod: Arc<dyn PodClient>,
    cache: Arc<CollectionCache>,
    session: &Session,
) -> CollectionResult<Option<DateTime<Utc>>> {
    let activity = activity_collection(pod, cache, session)?;
    activity.add(&timestamp_now()).await
}

/// When the owner of `pod_url` was last active, or `None` when their
/// activity document is missing or unreadable.
///
/// Reading another user's pod never creates anything in it.
pub async fn load_user_activity<P: PodClient + ?Sized>(
    pod: &P,
    pod_url: &str,
) -> Option<DateTime<Utc>> {
    let url = join_url(pod_url, ACTIVITY_PATH).ok()?;
    match pod.fetch_dataset(&url).await {
        Ok(dataset) => ActivityCodec.parse(&dataset).ok().flatten(),
        Err(e) => {
            debug!(url = url.as_str(), error = %e, "no activity available");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pod::acl::agent_access;
    use crate::pod::MemoryPod;

    const WEB_ID: &str = "https://alice.example/profile/card#me";
    const ACTIVITY: &str = "https://alice.example/public/active.ttl";

    fn session() -> Session {
        Session::new(WEB_ID, "https://alice.example/")
    }

    #[tokio::test]
    async fn first_update_creates_document_and_acl() {
        let pod = Arc::new(MemoryPod::new());
        let before = Utc::now();
        let stamped = update_user_activity(pod.clone(), Arc::new(CollectionCache::new()), &session())
            .await
            .unwrap()
            .unwrap();

        assert!(stamped >= before - chrono::Duration::seconds(1));
        assert_eq!(pod.creations(ACTIVITY), 1);
        assert_eq!(
            agent_access(pod.as_ref(), ACTIVITY, WEB_ID).await.unwrap(),
            AccessModes::FULL
        );
        assert_eq!(
            agent_access(pod.as_ref(), ACTIVITY, "https://caseworker.example/profile/card#me")
                .await
                .unwrap(),
            AccessModes::READ_ONLY
        );
    }

    #[tokio::test]
    async fn later_updates_overwrite_the_single_thing() {
        let pod = Arc::new(MemoryPod::new());
        let cache = Arc::new(CollectionCache::new());
        update_user_activity(pod.clone(), cache.clone(), &session())
            .await
            .unwrap();
        let acl_writes = pod
            .writes()
            .iter()
            .filter(|w| w.url.ends_with(".acl"))
            .count();

        update_user_activity(pod.clone(), cache, &session())
            .await
            .unwrap();

        let dataset = pod.fetch_dataset(ACTIVITY).await.unwrap();
        assert_eq!(dataset.len(), 1);
        let later_acl_writes = pod
            .writes()
            .iter()
            .filter(|w| w.url.ends_with(".acl"))
            .count();
        assert_eq!(acl_writes, later_acl_writes);
    }

    #[tokio::test]
    async fn load_reads_timestamp_without_creating() {
        let pod = MemoryPod::new();
        assert_eq!(load_user_activity(&pod, "https://alice.example/").await, None);
        assert!(pod.writes().is_empty());

        pod.insert_turtle(
            ACTIVITY,
            "<#active> <http://schema.org/dateModified> \
             \"2023-10-23T19:59:31.424Z\"^^<http://www.w3.org/2001/XMLSchema#dateTime> .",
        );
        let when = load_user_activity(&pod, "https://alice.example/").await.unwrap();
        assert_eq!(when.timestamp_millis(), 1698091171424);
    }
}
