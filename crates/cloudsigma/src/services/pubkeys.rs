use tokio_util::sync::CancellationToken;

use super::keypairs::Keypair;
use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;

const BASE_PATH: &str = "pubkeys/";

/// `pubkeys/` endpoints: read-only view of the public halves of keypairs.
pub struct PubkeysService<'a> {
    client: &'a Client,
}

impl<'a> PubkeysService<'a> {
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
}
