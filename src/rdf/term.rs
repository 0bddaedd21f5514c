//! RDF terms: named nodes, blank nodes and literals

use super::vocab::xsd;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// The current time at the precision `xsd:dateTime` literals are written
/// with, so a freshly stamped value reads back unchanged.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A literal value with its datatype and optional language tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form, unescaped
    pub value: String,
    /// Datatype IRI (`xsd:string` for plain literals)
    pub datatype: String,
    /// Language tag, only for `rdf:langString` literals
    pub language: Option<String>,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: xsd::STRING.to_string(),
            language: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: xsd::LANG_STRING.to_string(),
            language: Some(language.into()),
        }
    }

    pub fn datetime(value: DateTime<Utc>) -> Self {
        Self::typed(
            value.to_rfc3339_opts(SecondsFormat::Millis, true),
            xsd::DATE_TIME,
        )
    }

    pub fn date(value: NaiveDate) -> Self {
        Self::typed(value.format("%Y-%m-%d").to_string(), xsd::DATE)
    }

    pub fn boolean(value: bool) -> Self {
        Self::typed(value.to_string(), xsd::BOOLEAN)
    }

    /// True for a plain string literal without a language tag
    pub fn is_string_no_locale(&self) -> bool {
        self.datatype == xsd::STRING && self.language.is_none()
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        if self.datatype != xsd::DATE_TIME {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.value) {
            return Some(dt.with_timezone(&Utc));
        }
        // no timezone: read as UTC
        NaiveDateTime::parse_from_str(&self.value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        if self.datatype != xsd::DATE {
            return None;
        }
        // xsd:date may carry a timezone suffix; only the calendar date matters here
        let day = self.value.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn as_bool(&self) -> Option<bool> {
        if self.datatype != xsd::BOOLEAN {
            return None;
        }
        match self.value.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

/// An object position term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Term {
    /// Named node
    Iri(String),
    /// Blank node label, scoped to the document it was read from
    Blank(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Self::Iri(value.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Blank(_) | Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            Self::Iri(_) | Self::Blank(_) => None,
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}
