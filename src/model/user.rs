//! Users list: the clients a caseworker manages

use super::activity::load_user_activity;
use crate::collection::{
    optional_date, required_string, required_url, CollectionCache, CollectionError,
    CollectionResult, RdfCollection, Record, RecordList,
};
use crate::pod::{AccessModes, PodClient, PodResult};
use crate::rdf::vocab::predicates;
use crate::rdf::{Thing, ThingBuilder};
use crate::session::{pod_url_from_web_id, resolve_pod_url, Session};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::warn;

/// Pod-relative path of the users list
pub const USERS_PATH: &str = "Users/userlist.ttl";
const HEADER: &str = "userlist";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub given_name: String,
    pub family_name: String,
    pub person: String,
    pub web_id: String,
    pub pod_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Last activity, read from the user's own pod; never stored in the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

impl User {
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
            email: None,
            date_of_birth: None,
            date_modified: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_date_of_birth(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }
}

impl Record for User {
    fn from_thing(thing: &Thing) -> CollectionResult<Self> {
        // older lists carry the username only as the Thing's name
        let username = match thing.get_string_no_locale(predicates::ALTERNATE_NAME) {
            Some(name) => name.to_string(),
            None => thing
                .local_name()
                .ok_or_else(|| CollectionError::malformed(thing, "username"))?,
        };
        Ok(Self {
            username,
            given_name: required_string(thing, predicates::GIVEN_NAME, "givenName")?,
            family_name: required_string(thing, predicates::FAMILY_NAME, "familyName")?,
            person: required_string(thing, predicates::PERSON, "person")?,
            web_id: required_url(thing, predicates::IDENTIFIER, "webId")?,
            pod_url: required_url(thing, predicates::URL, "podUrl")?,
            email: thing.get_string_no_locale(predicates::EMAIL).map(str::to_string),
            date_of_birth: optional_date(thing, predicates::DATE_OF_BIRTH, "dateOfBirth")?,
            date_modified: None,
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
            .add_optional(self.email.as_deref(), |b, email| {
                b.add_string_no_locale(predicates::EMAIL, email)
            })
            .add_optional(self.date_of_birth, |b, date| {
                b.add_date(predicates::DATE_OF_BIRTH, date)
            })
            .build()
    }
}

fn header() -> Thing {
    ThingBuilder::local(HEADER)
        .add_string_no_locale(predicates::NAME, "Users List")
        .add_string_no_locale(predicates::DESCRIPTION, "A list of users")
        .build()
}

/// The users list in the signed-in caseworker's pod.
///
/// The list is private: creating it grants the owner full control and
/// nobody else anything.
pub struct UsersList {
    collection: RdfCollection<RecordList<User>>,
}

impl UsersList {
    pub fn new(
        pod: Arc<dyn PodClient>,
        cache: Arc<CollectionCache>,
        session: &Session,
    ) -> PodResult<Self> {
        let url = session.resolve(USERS_PATH)?;
        let codec = RecordList::new().with_header(header());
        Ok(Self {
            collection: RdfCollection::new(pod, cache, url, codec).with_acl_on_create(
                session.web_id.clone(),
                AccessModes::FULL,
                AccessModes::NONE,
            ),
        })
    }

    pub fn url(&self) -> &str {
        self.collection.url()
    }

    pub async fn load(&self) -> CollectionResult<Vec<User>> {
        self.collection.load().await
    }

    /// Add a user, pointing their entry at the pod their profile advertises
    pub async fn add(&self, mut user: User) -> CollectionResult<Vec<User>> {
        user.pod_url = resolve_pod_url(self.collection.pod().as_ref(), &user.web_id).await?;
        self.collection.add(&user).await
    }

    /// Remove whichever entry identifies `web_id`
    pub async fn delete(&self, web_id: &str) -> CollectionResult<Vec<User>> {
        self.collection
            .modify(|dataset| {
                let subject = dataset
                    .get_thing_all()
                    .find(|thing| thing.get_url(predicates::IDENTIFIER) == Some(web_id))
                    .map(|thing| thing.url().to_string());
                match subject {
                    Some(subject) => dataset.remove_thing(&subject).is_some(),
                    None => false,
                }
            })
            .await
    }

    pub async fn refetch(&self) -> CollectionResult<Vec<User>> {
        self.collection.refetch().await
    }

    /// The list as last loaded or saved, without a network round trip
    pub fn cached(&self) -> Option<CollectionResult<Vec<User>>> {
        self.collection.cached()
    }

    /// Fill `date_modified` from each user's activity document.
    ///
    /// Users whose activity cannot be read keep `None`.
    pub async fn with_activity(&self, mut users: Vec<User>) -> Vec<User> {
        let mut lookups = JoinSet::new();
        for (index, user) in users.iter().enumerate() {
            let pod = self.collection.pod().clone();
            let pod_url = user.pod_url.clone();
            lookups.spawn(async move { (index, load_user_activity(pod.as_ref(), &pod_url).await) });
        }
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((index, when)) => users[index].date_modified = when,
                Err(e) => warn!(error = %e, "activity lookup task failed"),
            }
        }
        users
    }
}
