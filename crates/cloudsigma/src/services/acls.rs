use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::{Metadata, ResourceLink};

const BASE_PATH: &str = "acls/";

/// Access control list: grants other accounts permissions on tagged
/// resources.
///
/// `rules` and `tags` are always serialized, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acl {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default)]
    pub rules: Vec<AclRule>,
    #[serde(default)]
    pub tags: Vec<ResourceLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclRule {
    /// e.g. `LIST`, `ATTACH`, `EDIT`, `OPEN_VNC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

/// Mutable ACL fields. `rules` and `tags` go out as arrays whenever set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AclUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<AclRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ResourceLink>>,
}

impl AclUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.meta.is_none() && self.rules.is_none() && self.tags.is_none()
    }
}

impl From<Acl> for AclUpdateRequest {
    fn from(acl: Acl) -> Self {
        Self {
            name: acl.name,
            meta: (!acl.meta.is_empty()).then_some(acl.meta),
            rules: Some(acl.rules),
            tags: Some(acl.tags),
        }
    }
}

/// `acls/` endpoints.
pub struct AclsService<'a> {
    client: &'a Client,
}

impl<'a> AclsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Acl>, Response), Error> {
        self.client.get_list(cancel, BASE_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(Acl, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        acls: &[Acl],
    ) -> Result<(Vec<Acl>, Response), Error> {
        self.client.create(cancel, BASE_PATH, acls).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &AclUpdateRequest,
    ) -> Result<(Acl, Response), Error> {
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
