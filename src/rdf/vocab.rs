//! Predicate vocabulary used by PASS documents
//!
//! These IRIs are the wire schema of every Thing this crate reads or writes.

pub const SCHEMA: &str = "http://schema.org/";

/// Predicates for person, message, document and activity records
pub mod predicates {
    pub const PERSON: &str = "http://schema.org/Person";
    pub const GIVEN_NAME: &str = "http://schema.org/givenName";
    pub const FAMILY_NAME: &str = "http://schema.org/familyName";
    pub const ALTERNATE_NAME: &str = "http://schema.org/alternateName";
    pub const IDENTIFIER: &str = "http://schema.org/identifier";
    pub const URL: &str = "http://schema.org/URL";
    pub const DATE_OF_BIRTH: &str = "http://schema.org/birthDate";
    pub const EMAIL: &str = "http://schema.org/email";
    pub const DATE_MODIFIED: &str = "http://schema.org/dateModified";
    pub const NAME: &str = "http://schema.org/name";
    pub const DESCRIPTION: &str = "http://schema.org/description";

    pub const HEADLINE: &str = "http://schema.org/headline";
    pub const TEXT: &str = "http://schema.org/text";
    pub const SENDER: &str = "http://schema.org/sender";
    pub const RECIPIENT: &str = "http://schema.org/recipient";
    pub const DATE_CREATED: &str = "http://schema.org/dateCreated";
    pub const READ_STATUS: &str = "http://schema.org/readStatus";
    pub const ADDITIONAL_TYPE: &str = "http://schema.org/additionalType";
    pub const CONTENT_URL: &str = "http://schema.org/url";
    pub const END_DATE: &str = "http://schema.org/endDate";
}

pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// Web Access Control vocabulary
pub mod acl {
    pub const NS: &str = "http://www.w3.org/ns/auth/acl#";
    pub const AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";
    pub const AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";
    pub const AGENT_CLASS: &str = "http://www.w3.org/ns/auth/acl#agentClass";
    pub const ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
    pub const DEFAULT: &str = "http://www.w3.org/ns/auth/acl#default";
    pub const MODE: &str = "http://www.w3.org/ns/auth/acl#mode";
    pub const READ: &str = "http://www.w3.org/ns/auth/acl#Read";
    pub const APPEND: &str = "http://www.w3.org/ns/auth/acl#Append";
    pub const WRITE: &str = "http://www.w3.org/ns/auth/acl#Write";
    pub const CONTROL: &str = "http://www.w3.org/ns/auth/acl#Control";
}

pub mod foaf {
    pub const NS: &str = "http://xmlns.com/foaf/0.1/";
    pub const AGENT: &str = "http://xmlns.com/foaf/0.1/Agent";
}

pub mod pim {
    pub const NS: &str = "http://www.w3.org/ns/pim/space#";
    pub const STORAGE: &str = "http://www.w3.org/ns/pim/space#storage";
}

/// Prefixes the Turtle writer emits, in output order
pub const PREFIXES: &[(&str, &str)] = &[
    ("schema", SCHEMA),
    ("rdf", rdf::NS),
    ("xsd", xsd::NS),
    ("acl", acl::NS),
    ("foaf", foaf::NS),
    ("pim", pim::NS),
];
