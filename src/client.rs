//! Entry point tying a pod connection, a session and the shared cache

use crate::collection::{CollectionCache, CollectionResult};
use crate::model::{
    load_user_activity, update_user_activity, ContactsList, DocumentList, MailBox, Message,
    MessageList, UsersList,
};
use crate::pod::{PodClient, PodResult};
use crate::session::Session;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// A signed-in PASS client.
///
/// Every collection handed out shares one cache, so a write through one
/// list is visible to the next load of any list on the same document.
#[derive(Clone)]
pub struct PassClient {
    pod: Arc<dyn PodClient>,
    cache: Arc<CollectionCache>,
    session: Session,
}

impl PassClient {
    pub fn new(pod: Arc<dyn PodClient>, session: Session) -> Self {
        Self::with_cache(pod, session, Arc::new(CollectionCache::new()))
    }

    pub fn with_cache(pod: Arc<dyn PodClient>, session: Session, cache: Arc<CollectionCache>) -> Self {
        Self { pod, cache, session }
    }

    /// Build a client for `web_id`, discovering the pod unless `pod_url` is given
    pub async fn connect(
        pod: Arc<dyn PodClient>,
        web_id: &str,
        pod_url: Option<&str>,
    ) -> PodResult<Self> {
        let session = match pod_url {
            Some(url) => Session::new(web_id, url),
            None => Session::discover(pod.as_ref(), web_id).await?,
        };
        info!(web_id, pod_url = session.pod_url.as_str(), "session ready");
        Ok(Self::new(pod, session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn pod(&self) -> &Arc<dyn PodClient> {
        &self.pod
    }

    pub fn cache(&self) -> &Arc<CollectionCache> {
        &self.cache
    }

    pub fn contacts(&self) -> PodResult<ContactsList> {
        ContactsList::new(self.pod.clone(), self.cache.clone(), &self.session)
    }

    pub fn users(&self) -> PodResult<UsersList> {
        UsersList::new(self.pod.clone(), self.cache.clone(), &self.session)
    }

    pub fn messages(&self, mailbox: MailBox) -> PodResult<MessageList> {
        MessageList::new(self.pod.clone(), self.cache.clone(), &self.session, mailbox)
    }

    pub fn documents(&self) -> PodResult<DocumentList> {
        DocumentList::new(self.pod.clone(), self.cache.clone(), &self.session)
    }

    /// Deliver `message` to the recipient's inbox and keep a copy in our outbox
    pub async fn send_message(
        &self,
        recipient_pod_url: &str,
        message: &Message,
    ) -> CollectionResult<()> {
        let inbox = MessageList::for_pod(
            self.pod.clone(),
            self.cache.clone(),
            recipient_pod_url,
            MailBox::Inbox,
        )?;
        inbox.add(message).await?;
        self.messages(MailBox::Outbox)?.add(message).await?;
        Ok(())
    }

    pub async fn update_activity(&self) -> CollectionResult<Option<DateTime<Utc>>> {
        update_user_activity(self.pod.clone(), self.cache.clone(), &self.session).await
    }

    pub async fn user_activity(&self, pod_url: &str) -> Option<DateTime<Utc>> {
        load_user_activity(self.pod.as_ref(), pod_url).await
    }
}
