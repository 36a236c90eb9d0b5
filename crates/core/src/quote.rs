//! Quote record and its content identity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::REMOTE_ID_PREFIX;
use crate::error::{CoreError, Result};

/// A single quote in the collection.
///
/// `id` and `updated_at` may be absent or malformed on records persisted by
/// older builds; they decode as empty and [`crate::migrate`] fills them in.
/// Every other construction path sets both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub text: String,
    pub category: String,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

// Numeric ids keep their value; null or other shapes become unset.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

// Accepts RFC 3339 strings and epoch milliseconds; anything else becomes unset.
fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => {
            DateTime::parse_from_rfc3339(raw.trim()).ok().map(|t| t.with_timezone(&Utc))
        },
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

impl Quote {
    /// Creates a locally-owned quote with a fresh id and the current time.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] if `text` or `category` is blank after trimming.
    pub fn new(text: &str, category: &str) -> Result<Self> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(CoreError::InvalidInput(
                "both a quote and a category are required".to_owned(),
            ));
        }
        Ok(Self {
            id: new_local_id(),
            text: text.to_owned(),
            category: category.to_owned(),
            updated_at: Some(Utc::now()),
        })
    }

    /// Creates a quote that originated on a remote source.
    ///
    /// The external id is namespaced so it can never collide with a local UUID.
    #[must_use]
    pub fn from_remote(external_id: &ExternalId, text: String, category: String) -> Self {
        Self {
            id: format!("{REMOTE_ID_PREFIX}{external_id}"),
            text,
            category,
            updated_at: Some(Utc::now()),
        }
    }

    #[must_use]
    pub fn content_key(&self) -> ContentKey {
        ContentKey::new(&self.text, &self.category)
    }

    /// True once the record carries both an id and a timestamp.
    #[must_use]
    pub fn is_migrated(&self) -> bool {
        !self.id.is_empty() && self.updated_at.is_some()
    }

    #[must_use]
    pub fn is_remote_origin(&self) -> bool {
        self.id.starts_with(REMOTE_ID_PREFIX)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.category)
    }
}

/// Generates an id for a locally-created record.
#[must_use]
pub fn new_local_id() -> String {
    Uuid::new_v4().to_string()
}

/// De-duplication identity of a quote: trimmed, case-sensitive `(text, category)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey {
    text: String,
    category: String,
}

impl ContentKey {
    #[must_use]
    pub fn new(text: &str, category: &str) -> Self {
        Self { text: text.trim().to_owned(), category: category.trim().to_owned() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Identifier assigned by a remote source. Numeric on most REST backends,
/// but kept opaque so string ids survive the round trip too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
