use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::Metadata;

const BASE_PATH: &str = "keypairs/";

/// An SSH keypair. The API only returns `private_key` for keypairs it
/// generated itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypair {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing)]
    pub has_private_key: bool,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeypairUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl KeypairUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.meta.is_none() && self.public_key.is_none()
    }
}

impl From<Keypair> for KeypairUpdateRequest {
    fn from(keypair: Keypair) -> Self {
        Self {
            name: keypair.name,
            meta: (!keypair.meta.is_empty()).then_some(keypair.meta),
            public_key: keypair.public_key,
        }
    }
}

/// `keypairs/` endpoints.
pub struct KeypairsService<'a> {
    client: &'a Client,
}

impl<'a> KeypairsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Keypair>, Response), Error> {
        self.client.get_list(cancel, BASE_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(Keypair, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    /// Import or generate keypairs. Leave `public_key` unset to have the
    /// API generate one.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        keypairs: &[Keypair],
    ) -> Result<(Vec<Keypair>, Response), Error> {
        self.client.create(cancel, BASE_PATH, keypairs).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &KeypairUpdateRequest,
    ) -> Result<(Keypair, Response), Error> {
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
