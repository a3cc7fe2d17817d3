use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::{Metadata, ResourceLink};

const BASE_PATH: &str = "snapshots/";
const DETAIL_PATH: &str = "snapshots/detail/";

/// A point-in-time copy of a drive, stored in the same location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Source drive. Required on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceLink>,

    // Assigned by CloudSigma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnapshotUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ResourceLink>>,
}

impl SnapshotUpdateRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<Snapshot> for SnapshotUpdateRequest {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            name: snapshot.name,
            meta: (!snapshot.meta.is_empty()).then_some(snapshot.meta),
            tags: (!snapshot.tags.is_empty()).then_some(snapshot.tags),
        }
    }
}

/// `snapshots/` endpoints.
pub struct SnapshotsService<'a> {
    client: &'a Client,
}

impl<'a> SnapshotsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Snapshot>, Response), Error> {
        self.client.get_list(cancel, DETAIL_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(Snapshot, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        snapshots: &[Snapshot],
    ) -> Result<(Vec<Snapshot>, Response), Error> {
        self.client.create(cancel, BASE_PATH, snapshots).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &SnapshotUpdateRequest,
    ) -> Result<(Snapshot, Response), Error> {
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
