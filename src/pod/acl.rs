//! Web Access Control documents
//!
//! Each resource may have a companion ACL document holding
//! `acl:Authorization` Things that grant access modes to agents.

use super::traits::{PodClient, PodError, PodResult, Precondition};
use crate::rdf::vocab::{acl, foaf, rdf};
use crate::rdf::{Dataset, Thing, ThingBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

const OWNER: &str = "owner";
const PUBLIC: &str = "public";

/// Access modes granted by one authorization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessModes {
    pub read: bool,
    pub append: bool,
    pub write: bool,
    pub control: bool,
}

impl AccessModes {
    pub const NONE: Self = Self {
        read: false,
        append: false,
        write: false,
        control: false,
    };

    pub const FULL: Self = Self {
        read: true,
        append: true,
        write: true,
        control: true,
    };

    pub const READ_ONLY: Self = Self {
        read: true,
        append: false,
        write: false,
        control: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    fn mode_iris(&self) -> Vec<&'static str> {
        [
            (self.read, acl::READ),
            (self.append, acl::APPEND),
            (self.write, acl::WRITE),
            (self.control, acl::CONTROL),
        ]
        .into_iter()
        .filter_map(|(granted, iri)| granted.then_some(iri))
        .collect()
    }

    fn from_thing(thing: &Thing) -> Self {
        let modes = thing.get_url_all(acl::MODE);
        Self {
            read: modes.contains(&acl::READ),
            append: modes.contains(&acl::APPEND),
            write: modes.contains(&acl::WRITE),
            control: modes.contains(&acl::CONTROL),
        }
    }

    fn union(self, other: Self) -> Self {
        Self {
            read: self.read || other.read,
            append: self.append || other.append,
            write: self.write || other.write,
            control: self.control || other.control,
        }
    }
}

/// Who an authorization applies to
enum Grantee<'a> {
    Agent(&'a str),
    Everyone,
}

fn authorization(name: &str, resource_url: &str, grantee: Grantee<'_>, modes: AccessModes) -> Thing {
    let mut builder = ThingBuilder::local(name)
        .add_url(rdf::TYPE, acl::AUTHORIZATION)
        .add_url(acl::ACCESS_TO, resource_url);
    // containers pass their authorizations down to the resources inside them
    if resource_url.ends_with('/') {
        builder = builder.add_url(acl::DEFAULT, resource_url);
    }
    builder = match grantee {
        Grantee::Agent(web_id) => builder.add_url(acl::AGENT, web_id),
        Grantee::Everyone => builder.add_url(acl::AGENT_CLASS, foaf::AGENT),
    };
    modes
        .mode_iris()
        .into_iter()
        .fold(builder, |b, mode| b.add_url(acl::MODE, mode))
        .build()
}

/// Write a fresh ACL for `resource_url`, replacing any existing one.
///
/// The owner gets `owner_modes`; everyone else gets `public_modes`, and
/// the public authorization is left out entirely when it grants nothing.
pub async fn set_doc_acl<P: PodClient + ?Sized>(
    pod: &P,
    resource_url: &str,
    owner_web_id: &str,
    owner_modes: AccessModes,
    public_modes: AccessModes,
) -> PodResult<Dataset> {
    let acl_url = pod.acl_url(resource_url).await?;
    debug!(resource_url, acl_url = acl_url.as_str(), "writing access control list");

    let mut dataset = Dataset::new(acl_url);
    dataset.set_thing(authorization(
        OWNER,
        resource_url,
        Grantee::Agent(owner_web_id),
        owner_modes,
    ));
    if !public_modes.is_empty() {
        dataset.set_thing(authorization(
            PUBLIC,
            resource_url,
            Grantee::Everyone,
            public_modes,
        ));
    }
    pod.save_dataset(&dataset, Precondition::None).await
}

/// Add or replace the authorization for one agent in an existing ACL.
///
/// Passing `AccessModes::NONE` revokes the agent's authorization.
pub async fn set_agent_access<P: PodClient + ?Sized>(
    pod: &P,
    resource_url: &str,
    agent_web_id: &str,
    modes: AccessModes,
) -> PodResult<Dataset> {
    let acl_url = pod.acl_url(resource_url).await?;
    let mut dataset = match pod.fetch_dataset(&acl_url).await {
        Ok(dataset) => dataset,
        Err(PodError::NotFound(_)) => Dataset::new(acl_url.clone()),
        Err(e) => return Err(e),
    };

    let name = format!("agent-{}", agent_web_id);
    if modes.is_empty() {
        let url = dataset.thing_url(&name);
        dataset.remove_thing(&url);
    } else {
        dataset.set_thing(authorization(
            &name,
            resource_url,
            Grantee::Agent(agent_web_id),
            modes,
        ));
    }
    let precondition = Precondition::for_dataset(&dataset);
    pod.save_dataset(&dataset, precondition).await
}

/// Modes `agent_web_id` holds on `resource_url`, counting public grants
pub async fn agent_access<P: PodClient + ?Sized>(
    pod: &P,
    resource_url: &str,
    agent_web_id: &str,
) -> PodResult<AccessModes> {
    let acl_url = pod.acl_url(resource_url).await?;
    let dataset = pod.fetch_dataset(&acl_url).await?;

    let modes = dataset
        .get_thing_all()
        .filter(|thing| thing.get_url_all(acl::ACCESS_TO).contains(&resource_url))
        .filter(|thing| {
            thing.get_url_all(acl::AGENT).contains(&agent_web_id)
                || thing.get_url_all(acl::AGENT_CLASS).contains(&foaf::AGENT)
        })
        .map(AccessModes::from_thing)
        .fold(AccessModes::NONE, AccessModes::union);
    Ok(modes)
}
