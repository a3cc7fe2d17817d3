use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::{Owner, ResourceLink};

const BASE_PATH: &str = "tags/";

/// A label grouping resources, also the unit ACLs grant access on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "TagMeta::is_empty")]
    pub meta: TagMeta,
    /// Resources carrying the tag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TagMeta {
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<TagMeta>,
    /// Replaces the full set of tagged resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceLink>>,
}

impl TagUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.meta.is_none() && self.resources.is_none()
    }
}

impl From<Tag> for TagUpdateRequest {
    fn from(tag: Tag) -> Self {
        Self {
            name: tag.name,
            meta: (!tag.meta.is_empty()).then_some(tag.meta),
            resources: (!tag.resources.is_empty()).then_some(tag.resources),
        }
    }
}

/// `tags/` endpoints.
pub struct TagsService<'a> {
    client: &'a Client,
}

impl<'a> TagsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Tag>, Response), Error> {
        self.client.get_list(cancel, BASE_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(Tag, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        tags: &[Tag],
    ) -> Result<(Vec<Tag>, Response), Error> {
        self.client.create(cancel, BASE_PATH, tags).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &TagUpdateRequest,
    ) -> Result<(Tag, Response), Error> {
        require_id(uuid)?;
        if request.is_empty() {
            return Err(Error::EmptyPayload);
        }
        self.client
            .put(cancel, &item_path(BASE_PATH, uuid), request)
            .await
    }

    pub async fn delete(&self, cancel: &CancellationToken, uuid: &str) -> Result<Response, Error> {
        require_id(uuid)?;
        self.client.delete(cancel, &item_path(BASE_PATH, uuid)).await
    }
}
