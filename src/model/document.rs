//! Document metadata

use crate::collection::{
    optional_date, required_datetime, required_string, required_url, CollectionCache,
    CollectionResult, RdfCollection, Record, RecordList,
};
use crate::pod::acl::{self, AccessModes};
use crate::pod::{PodClient, PodError, PodResult};
use crate::rdf::vocab::predicates;
use crate::rdf::{Dataset, Thing, ThingBuilder};
use crate::session::Session;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Pod-relative path of the documents list
pub const DOCUMENTS_PATH: &str = "PASS/Documents/documents.ttl";

/// Metadata for one uploaded file. The file itself lives at `file_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub name: String,
    /// Kind of document, e.g. "Passport"
    pub doc_type: String,
    pub description: String,
    pub file_url: String,
    pub upload_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Record for DocumentRecord {
    fn from_thing(thing: &Thing) -> CollectionResult<Self> {
        Ok(Self {
            name: required_string(thing, predicates::NAME, "name")?,
            doc_type: required_string(thing, predicates::ADDITIONAL_TYPE, "type")?,
            description: required_string(thing, predicates::DESCRIPTION, "description")?,
            file_url: required_url(thing, predicates::CONTENT_URL, "fileUrl")?,
            upload_date: required_datetime(thing, predicates::DATE_CREATED, "uploadDate")?,
            end_date: optional_date(thing, predicates::END_DATE, "endDate")?,
        })
    }

    fn to_thing(&self) -> Thing {
        ThingBuilder::local(&self.name)
            .add_string_no_locale(predicates::NAME, &self.name)
            .add_string_no_locale(predicates::ADDITIONAL_TYPE, &self.doc_type)
            .add_string_no_locale(predicates::DESCRIPTION, &self.description)
            .add_url(predicates::CONTENT_URL, &self.file_url)
            .add_datetime(predicates::DATE_CREATED, self.upload_date)
            .add_optional(self.end_date, |b, date| b.add_date(predicates::END_DATE, date))
            .build()
    }
}

pub struct DocumentList {
    collection: RdfCollection<RecordList<DocumentRecord>>,
    owner_web_id: String,
}

impl DocumentList {
    pub fn new(
        pod: Arc<dyn PodClient>,
        cache: Arc<CollectionCache>,
        session: &Session,
    ) -> PodResult<Self> {
        let url = session.resolve(DOCUMENTS_PATH)?;
        Ok(Self {
            collection: RdfCollection::new(pod, cache, url, RecordList::new()),
            owner_web_id: session.web_id.clone(),
        })
    }

    pub fn url(&self) -> &str {
        self.collection.url()
    }

    pub async fn load(&self) -> CollectionResult<Vec<DocumentRecord>> {
        self.collection.load().await
    }

    pub async fn add(&self, document: &DocumentRecord) -> CollectionResult<Vec<DocumentRecord>> {
        self.collection.add(document).await
    }

    /// Remove the metadata entry named `name`; the file is left in place
    pub async fn delete(&self, name: &str) -> CollectionResult<Vec<DocumentRecord>> {
        self.collection.delete(name).await
    }

    pub async fn refetch(&self) -> CollectionResult<Vec<DocumentRecord>> {
        self.collection.refetch().await
    }

    /// Grant `agent_web_id` access to a document's file.
    ///
    /// A file without an ACL gets one first that keeps the owner in full
    /// control. `AccessModes::NONE` revokes.
    pub async fn share(
        &self,
        document: &DocumentRecord,
        agent_web_id: &str,
        modes: AccessModes,
    ) -> CollectionResult<Dataset> {
        let pod = self.collection.pod().as_ref();
        let acl_url = pod.acl_url(&document.file_url).await?;
        match pod.fetch_dataset(&acl_url).await {
            Ok(_) => {}
            Err(PodError::NotFound(_)) => {
                info!(file_url = document.file_url.as_str(), "file has no ACL, creating one");
                acl::set_doc_acl(
                    pod,
                    &document.file_url,
                    &self.owner_web_id,
                    AccessModes::FULL,
                    AccessModes::NONE,
                )
                .await?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(acl::set_agent_access(pod, &document.file_url, agent_web_id, modes).await?)
    }
}
