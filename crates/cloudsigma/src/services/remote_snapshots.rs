use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::snapshots::Snapshot;
use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::{Metadata, ResourceLink};

const BASE_PATH: &str = "remotesnapshots/";
const DETAIL_PATH: &str = "remotesnapshots/detail/";

/// A snapshot replicated to another location.
///
/// Carries every [`Snapshot`] field plus the target location and a copy of
/// the source drive's metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    /// Location id the snapshot is stored in, e.g. `fra`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "drive_meta", skip_serializing_if = "Option::is_none")]
    pub drive_metadata: Option<RemoteSnapshotDriveMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSnapshotDriveMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, rename = "src_uuid", skip_serializing_if = "Option::is_none")]
    pub source_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemoteSnapshotUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ResourceLink>>,
}

impl RemoteSnapshotUpdateRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<RemoteSnapshot> for RemoteSnapshotUpdateRequest {
    fn from(remote: RemoteSnapshot) -> Self {
        let snapshot = remote.snapshot;
        Self {
            name: snapshot.name,
            meta: (!snapshot.meta.is_empty()).then_some(snapshot.meta),
            tags: (!snapshot.tags.is_empty()).then_some(snapshot.tags),
        }
    }
}

/// `remotesnapshots/` endpoints.
pub struct RemoteSnapshotsService<'a> {
    client: &'a Client,
}

impl<'a> RemoteSnapshotsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<RemoteSnapshot>, Response), Error> {
        self.client.get_list(cancel, DETAIL_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(RemoteSnapshot, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    /// Replicate drives to other locations. Each object needs `drive` and
    /// `location`.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        snapshots: &[RemoteSnapshot],
    ) -> Result<(Vec<RemoteSnapshot>, Response), Error> {
        self.client.create(cancel, BASE_PATH, snapshots).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &RemoteSnapshotUpdateRequest,
    ) -> Result<(RemoteSnapshot, Response), Error> {
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
