use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Name of the collection holding portfolio works.
pub const WORKS_COLLECTION: &str = "Works";
/// Name of the collection holding tags.
pub const TAGS_COLLECTION: &str = "Tags";
/// Name of the read-only archive collection.
pub const ARCHIVE_COLLECTION: &str = "Archive";

/// Status string carried by every list envelope.
pub const LIST_STATUS: &str = "OK request";

/// The year a work was made. Stored as given by the caller: usually a number
/// (`2021`) or free text (`"2019-2020"`). Any other value is kept verbatim in
/// `Other` so that legacy documents still read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Float(f64),
    Text(String),
    Other(bson::Bson),
}

impl Default for Year {
    fn default() -> Self {
        Year::Other(bson::Bson::Null)
    }
}

impl Year {
    /// A year counts as absent when it is `0`, `NaN`, an empty string,
    /// `false` or null.
    pub fn is_blank(&self) -> bool {
        match self {
            Year::Number(n) => *n == 0,
            Year::Float(f) => *f == 0.0 || f.is_nan(),
            Year::Text(s) => s.is_empty(),
            Year::Other(bson::Bson::Boolean(b)) => !b,
            Year::Other(bson::Bson::Null | bson::Bson::Undefined) => true,
            Year::Other(_) => false,
        }
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{n}"),
            Year::Float(n) => write!(f, "{n}"),
            Year::Text(s) => f.write_str(s),
            Year::Other(value) => write!(f, "{value}"),
        }
    }
}

/// A portfolio project stored in the `Works` collection.
///
/// `tags` are non-owning references into the `Tags` collection. They are only
/// checked for existence when the work is created. Every field but `_id` has a
/// default so that documents written outside this service still list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: Year,
    #[serde(default)]
    pub tags: Vec<ObjectId>,
    #[serde(default)]
    pub link: String,
}

/// A category label stored in the `Tags` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
}

/// A work joined with the tags it references.
///
/// Produced by a left-outer `$lookup`: references to tags that no longer exist
/// simply have no entry in `tag_details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDetail {
    #[serde(flatten)]
    pub work: Work,
    #[serde(rename = "tagDetails", default)]
    pub tag_details: Vec<Tag>,
}

/// Archive entries are written by an external process and have no fixed shape.
pub type ArchiveEntry = bson::Document;

/// Envelope returned by the collection listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn ok(message: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            status: LIST_STATUS.to_string(),
            message: message.into(),
            data,
        }
    }
}
