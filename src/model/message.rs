//! Inbox and outbox messages

use crate::collection::{
    required_datetime, required_string, required_url, CollectionCache, CollectionError,
    CollectionResult, RdfCollection, Record, RecordList,
};
use crate::pod::{PodClient, PodResult};
use crate::rdf::vocab::predicates;
use crate::rdf::{timestamp_now, Thing, ThingBuilder};
use crate::session::{join_url, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Which of a pod's two message documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailBox {
    Inbox,
    Outbox,
}

impl MailBox {
    /// Pod-relative path of this mailbox's document
    pub fn path(&self) -> String {
        format!("PASS/{}/messages.ttl", self)
    }
}

impl fmt::Display for MailBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inbox => write!(f, "Inbox"),
            Self::Outbox => write!(f, "Outbox"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: String,
    pub title: String,
    pub message: String,
    /// Display name of the sender
    pub sender: String,
    pub sender_web_id: String,
    pub recipient: String,
    pub upload_date: DateTime<Utc>,
    pub read_status: bool,
}

impl Message {
    /// A new unread message with a fresh id, sent now
    pub fn compose(
        title: impl Into<String>,
        message: impl Into<String>,
        sender: impl Into<String>,
        sender_web_id: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            title: title.into(),
            message: message.into(),
            sender: sender.into(),
            sender_web_id: sender_web_id.into(),
            recipient: recipient.into(),
            upload_date: timestamp_now(),
            read_status: false,
        }
    }
}

impl Record for Message {
    fn from_thing(thing: &Thing) -> CollectionResult<Self> {
        Ok(Self {
            message_id: required_string(thing, predicates::IDENTIFIER, "messageId")?,
            title: required_string(thing, predicates::HEADLINE, "title")?,
            message: required_string(thing, predicates::TEXT, "message")?,
            sender: required_string(thing, predicates::SENDER, "sender")?,
            sender_web_id: required_url(thing, predicates::URL, "senderWebId")?,
            recipient: required_string(thing, predicates::RECIPIENT, "recipient")?,
            upload_date: required_datetime(thing, predicates::DATE_CREATED, "uploadDate")?,
            read_status: thing
                .get_boolean(predicates::READ_STATUS)
                .ok_or_else(|| CollectionError::malformed(thing, "readStatus"))?,
        })
    }

    fn to_thing(&self) -> Thing {
        ThingBuilder::local(&self.message_id)
            .add_string_no_locale(predicates::IDENTIFIER, &self.message_id)
            .add_string_no_locale(predicates::HEADLINE, &self.title)
            .add_string_no_locale(predicates::TEXT, &self.message)
            .add_string_no_locale(predicates::SENDER, &self.sender)
            .add_url(predicates::URL, &self.sender_web_id)
            .add_string_no_locale(predicates::RECIPIENT, &self.recipient)
            .add_datetime(predicates::DATE_CREATED, self.upload_date)
            .add_boolean(predicates::READ_STATUS, self.read_status)
            .build()
    }
}

/// Messages not yet marked read
pub fn unread_count(messages: &[Message]) -> usize {
    messages.iter().filter(|m| !m.read_status).count()
}

pub struct MessageList {
    collection: RdfCollection<RecordList<Message>>,
    mailbox: MailBox,
}

impl MessageList {
    /// The signed-in user's own mailbox
    pub fn new(
        pod: Arc<dyn PodClient>,
        cache: Arc<CollectionCache>,
        session: &Session,
        mailbox: MailBox,
    ) -> PodResult<Self> {
        Self::for_pod(pod, cache, &session.pod_url, mailbox)
    }

    /// A mailbox in any pod, e.g. a recipient's inbox
    pub fn for_pod(
        pod: Arc<dyn PodClient>,
        cache: Arc<CollectionCache>,
        pod_url: &str,
        mailbox: MailBox,
    ) -> PodResult<Self> {
        let url = join_url(pod_url, &mailbox.path())?;
        Ok(Self {
            collection: RdfCollection::new(pod, cache, url, RecordList::new()),
            mailbox,
        })
    }

    pub fn mailbox(&self) -> MailBox {
        self.mailbox
    }

    pub fn url(&self) -> &str {
        self.collection.url()
    }

    pub async fn load(&self) -> CollectionResult<Vec<Message>> {
        self.collection.load().await
    }

    pub async fn add(&self, message: &Message) -> CollectionResult<Vec<Message>> {
        self.collection.add(message).await
    }

    pub async fn delete(&self, message_id: &str) -> CollectionResult<Vec<Message>> {
        self.collection.delete(message_id).await
    }

    pub async fn refetch(&self) -> CollectionResult<Vec<Message>> {
        self.collection.refetch().await
    }

    /// Mark one message read. Already-read and unknown messages cause no write.
    pub async fn mark_read(&self, message_id: &str) -> CollectionResult<Vec<Message>> {
        self.collection
            .modify(|dataset| {
                let subject = dataset.thing_url(message_id);
                let unread = match dataset.get_thing(&subject) {
                    Some(thing) if thing.get_boolean(predicates::READ_STATUS) != Some(true) => {
                        thing.clone()
                    }
                    _ => return false,
                };
                dataset.set_thing(
                    ThingBuilder::new(unread)
                        .set_boolean(predicates::READ_STATUS, true)
                        .build(),
                );
                true
            })
            .await
    }
}
