use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::Metadata;

const BASE_PATH: &str = "libdrives/";

/// A public image from the drives library (installers, preinstalled OS
/// images).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryDrive {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub favourite: bool,
    /// `install` or `preinst`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Overrides for the drive produced by cloning a library image.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryDriveCloneRequest {
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
}

/// `libdrives/` endpoints.
pub struct LibraryDrivesService<'a> {
    client: &'a Client,
}

impl<'a> LibraryDrivesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<LibraryDrive>, Response), Error> {
        self.client.get_list(cancel, BASE_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(LibraryDrive, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    /// Copy a library image into the account's own drives.
    pub async fn clone(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: Option<&LibraryDriveCloneRequest>,
    ) -> Result<(LibraryDrive, Response), Error> {
        require_id(uuid)?;
        self.client
            .action_single(cancel, BASE_PATH, uuid, "clone", request)
            .await
    }
}
