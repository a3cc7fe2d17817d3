use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;

const BASE_PATH: &str = "licenses/";

/// A software license available for purchase and attachment to drives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(default)]
    pub burstable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(default)]
    pub user_metric: String,
}

/// `licenses/` endpoint.
pub struct LicensesService<'a> {
    client: &'a Client,
}

impl<'a> LicensesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<License>, Response), Error> {
        self.client.get_list(cancel, BASE_PATH, opts).await
    }
}
