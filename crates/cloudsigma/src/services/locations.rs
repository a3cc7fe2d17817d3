use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;

const BASE_PATH: &str = "locations/";

/// A CloudSigma region and its public endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Short id, also the endpoint sub-domain (e.g. `zrh`).
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_frontend_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_frontend_signup_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_frontend_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websocket_url: Option<String>,
}

/// `locations/` endpoint.
pub struct LocationsService<'a> {
    client: &'a Client,
}

impl<'a> LocationsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Location>, Response), Error> {
        self.client.get_list(cancel, BASE_PATH, opts).await
    }
}
