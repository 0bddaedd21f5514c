//! HTTP pod client

use super::traits::{PodClient, PodError, PodResult, Precondition};
use crate::rdf::turtle::{parse_turtle, to_turtle};
use crate::rdf::Dataset;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ETAG, IF_MATCH, IF_NONE_MATCH, LINK};
use reqwest::{Client, Request, RequestBuilder, Response, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

const TURTLE: &str = "text/turtle";

/// Pod client speaking the Solid HTTP protocol.
///
/// Documents are read with `GET` and written whole with `PUT`. When an
/// access token is configured it is sent as a bearer token.
#[derive(Debug, Clone)]
pub struct HttpPod {
    client: Client,
    access_token: Option<String>,
}

impl HttpPod {
    pub fn new(access_token: Option<String>, timeout: Duration) -> PodResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, access_token))
    }

    pub fn with_client(client: Client, access_token: Option<String>) -> Self {
        Self {
            client,
            access_token,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    fn etag(response: &Response) -> Option<String> {
        response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    fn check_status(response: &Response, url: &str) -> PodResult<()> {
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(PodError::NotFound(url.to_string())),
            StatusCode::PRECONDITION_FAILED => Err(PodError::StaleCollection(url.to_string())),
            s => Err(PodError::Status {
                code: s.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    async fn read_dataset(response: Response, url: &str) -> PodResult<Dataset> {
        Self::check_status(&response, url)?;
        let etag = Self::etag(&response);
        let body = response.text().await?;
        Ok(parse_turtle(&body, url)?.with_etag(etag))
    }

    /// The `PUT` for `dataset`, carrying the precondition as a header
    fn save_request(&self, dataset: &Dataset, precondition: &Precondition) -> PodResult<Request> {
        let mut request = self
            .client
            .put(dataset.url())
            .header(CONTENT_TYPE, TURTLE)
            .body(to_turtle(dataset)?);
        request = match precondition {
            Precondition::None => request,
            Precondition::Create => request.header(IF_NONE_MATCH, "*"),
            Precondition::Match(etag) => request.header(IF_MATCH, etag.as_str()),
        };
        Ok(self.authorize(request).build()?)
    }

    /// ACL location from the `Link` headers of a `HEAD` response, or the
    /// `.acl` sibling when the server advertises none
    fn advertised_acl(response: &Response, resource_url: &str) -> PodResult<String> {
        Self::check_status(response, resource_url)?;
        let advertised = response
            .headers()
            .get_all(LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(acl_link)
            .map(str::to_string);

        match advertised {
            Some(target) => {
                let base = Url::parse(resource_url).map_err(|e| PodError::InvalidUrl {
                    url: resource_url.to_string(),
                    reason: e.to_string(),
                })?;
                let resolved = base.join(&target).map_err(|e| PodError::InvalidUrl {
                    url: target.clone(),
                    reason: e.to_string(),
                })?;
                Ok(resolved.to_string())
            }
            None => Ok(format!("{}.acl", resource_url)),
        }
    }
}

/// Find the `rel="acl"` target in a `Link` header value
pub(crate) fn acl_link(link_header: &str) -> Option<&str> {
    link_header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_acl = parts.any(|param| {
            let param = param.trim();
            param == "rel=\"acl\"" || param == "rel=acl"
        });
        if is_acl {
            target.strip_prefix('<')?.strip_suffix('>')
        } else {
            None
        }
    })
}

#[async_trait]
impl PodClient for HttpPod {
    async fn fetch_dataset(&self, url: &str) -> PodResult<Dataset> {
        debug!(url, "fetching dataset");
        let response = self
            .authorize(self.client.get(url).header(ACCEPT, TURTLE))
            .send()
            .await?;
        Self::read_dataset(response, url).await
    }

    async fn save_dataset(
        &self,
        dataset: &Dataset,
        precondition: Precondition,
    ) -> PodResult<Dataset> {
        let url = dataset.url();
        debug!(url, ?precondition, things = dataset.len(), "saving dataset");

        let request = self.save_request(dataset, &precondition)?;
        let response = self.client.execute(request).await?;
        if let Err(e) = Self::check_status(&response, url) {
            if e.is_stale() {
                warn!(url, "save rejected, document changed on the server");
            }
            return Err(e);
        }

        let etag = Self::etag(&response);
        Ok(dataset.clone().with_etag(etag))
    }

    async fn acl_url(&self, resource_url: &str) -> PodResult<String> {
        let response = self
            .authorize(self.client.head(resource_url))
            .send()
            .await?;
        Self::advertised_acl(&response, resource_url)
    }
}
