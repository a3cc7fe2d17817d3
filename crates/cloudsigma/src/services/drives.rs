use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::licenses::License;
use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::{ListRoot, Metadata, ResourceLink};

const BASE_PATH: &str = "drives/";
const DETAIL_PATH: &str = "drives/detail/";

/// A block storage drive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `disk` or `cdrom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<DriveLicense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceLink>,
}

/// A license attached to a drive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveLicense {
    #[serde(default)]
    pub amount: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ResourceLink>,
}

/// Mutable drive fields. Also the payload of a resize, where `size` is
/// mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DriveUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ResourceLink>>,
}

impl DriveUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.media.is_none()
            && self.size.is_none()
            && self.storage_type.is_none()
            && self.meta.is_none()
            && self.tags.is_none()
    }
}

impl From<Drive> for DriveUpdateRequest {
    fn from(drive: Drive) -> Self {
        Self {
            name: drive.name,
            media: drive.media,
            size: drive.size,
            storage_type: drive.storage_type,
            meta: (!drive.meta.is_empty()).then_some(drive.meta),
            tags: (!drive.tags.is_empty()).then_some(drive.tags),
        }
    }
}

/// Overrides for the copy produced by a clone. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriveCloneRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
}

/// `drives/` endpoints.
pub struct DrivesService<'a> {
    client: &'a Client,
}

impl<'a> DrivesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List drives with full details.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Drive>, Response), Error> {
        self.client.get_list(cancel, DETAIL_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(Drive, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        drives: &[Drive],
    ) -> Result<(Vec<Drive>, Response), Error> {
        self.client.create(cancel, BASE_PATH, drives).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &DriveUpdateRequest,
    ) -> Result<(Drive, Response), Error> {
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

    /// Grow a drive. `request.size` (bytes) must be set; the other fields are
    /// sent along unchanged.
    pub async fn resize(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &DriveUpdateRequest,
    ) -> Result<(Vec<Drive>, Response), Error> {
        require_id(uuid)?;
        if request.size.is_none() {
            return Err(Error::EmptyPayload);
        }
        let (root, mut response) = self
            .client
            .action::<_, ListRoot<Drive>>(cancel, BASE_PATH, uuid, "resize", Some(request))
            .await?;
        response.meta = root.meta;
        Ok((root.objects, response))
    }

    /// Copy a drive. Without a request the copy keeps the source settings.
    pub async fn clone(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: Option<&DriveCloneRequest>,
    ) -> Result<(Drive, Response), Error> {
        require_id(uuid)?;
        self.client
            .action_single(cancel, BASE_PATH, uuid, "clone", request)
            .await
    }
}
