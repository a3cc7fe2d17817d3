// Wire shapes shared by every resource: list envelopes, pagination
// metadata, and cross-resource links.

use serde::{Deserialize, Serialize};

/// Free-form key/value metadata attached to most resources.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Pagination metadata returned alongside list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub total_count: u64,
}

/// Collection envelope: `{"objects": [...], "meta": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ListRoot<T> {
    #[serde(default)]
    pub objects: Vec<T>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl<T> Default for ListRoot<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            meta: None,
        }
    }
}

/// Request body for create calls: `{"objects": [...]}`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRequest<'a, T> {
    pub objects: &'a [T],
}

/// Reference to another resource. Never owns the target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

impl ResourceLink {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            resource_uri: None,
        }
    }
}

/// Owning account of a resource. Unlike [`ResourceLink`] the uuid is always
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}
