//! Contacts list

use crate::collection::{
    required_string, required_url, CollectionCache, CollectionResult, RdfCollection, Record,
    RecordList,
};
use crate::pod::{PodClient, PodResult};
use crate::rdf::vocab::predicates;
use crate::rdf::{Thing, ThingBuilder};
use crate::session::{pod_url_from_web_id, Session};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Pod-relative path of the contacts document
pub const CONTACTS_PATH: &str = "PASS/Users/userlist.ttl";

/// Someone the signed-in user keeps in their contacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Local name of the contact's Thing
    pub username: String,
    pub given_name: String,
    pub family_name: String,
    /// Display name, "<given> <family>"
    pub person: String,
    pub web_id: String,
    pub pod_url: String,
}

impl Contact {
    /// Build a contact, deriving the display name and pod URL
    pub fn new(
        username: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        web_id: impl Into<String>,
    ) -> Self {
        let given_name = given_name.into();
        let family_name = family_name.into();
        let web_id = web_id.into();
        Self {
            username: username.into(),
            person: format!("{} {}", given_name, family_name),
            pod_url: pod_url_from_web_id(&web_id),
            given_name,
            family_name,
            web_id,
        }
    }
}

impl Record for Contact {
    fn from_thing(thing: &Thing) -> CollectionResult<Self> {
        Ok(Self {
            username: required_string(thing, predicates::ALTERNATE_NAME, "username")?,
            given_name: required_string(thing, predicates::GIVEN_NAME, "givenName")?,
            family_name: required_string(thing, predicates::FAMILY_NAME, "familyName")?,
            person: required_string(thing, predicates::PERSON, "person")?,
            web_id: required_url(thing, predicates::IDENTIFIER, "webId")?,
            pod_url: required_url(thing, predicates::URL, "podUrl")?,
        })
    }

    fn to_thing(&self) -> Thing {
        ThingBuilder::local(&self.username)
            .add_string_no_locale(predicates::PERSON, &self.person)
            .add_string_no_locale(predicates::GIVEN_NAME, &self.given_name)
            .add_string_no_locale(predicates::FAMILY_NAME, &self.family_name)
            .add_string_no_locale(predicates::ALTERNATE_NAME, &self.username)
            .add_url(predicates::IDENTIFIER, &self.web_id)
            .add_url(predicates::URL, &self.pod_url)
            .build()
    }
}

/// The signed-in user's contacts, stored in their own pod
pub struct ContactsList {
    collection: RdfCollection<RecordList<Contact>>,
}

impl ContactsList {
    pub fn new(
        pod: Arc<dyn PodClient>,
        cache: Arc<CollectionCache>,
        session: &Session,
    ) -> PodResult<Self> {
        let url = session.resolve(CONTACTS_PATH)?;
        Ok(Self {
            collection: RdfCollection::new(pod, cache, url, RecordList::new()),
        })
    }

    pub fn url(&self) -> &str {
        self.collection.url()
    }

    pub async fn load(&self) -> CollectionResult<Vec<Contact>> {
        self.collection.load().await
    }

    pub async fn add(&self, contact: &Contact) -> CollectionResult<Vec<Contact>> {
        self.collection.add(contact).await
    }

    /// Remove the contact with this username
    pub async fn delete(&self, username: &str) -> CollectionResult<Vec<Contact>> {
        self.collection.delete(username).await
    }

    pub async fn refetch(&self) -> CollectionResult<Vec<Contact>> {
        self.collection.refetch().await
    }

    /// The list as last loaded or saved, without a network round trip
    pub fn cached(&self) -> Option<CollectionResult<Vec<Contact>>> {
        self.collection.cached()
    }
}
