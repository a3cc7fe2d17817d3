use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::client::{Client, Response};
use crate::error::Error;

const BASE_PATH: &str = "cloud_status/";

/// Feature flags and free-tier allowances of the cloud location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct CloudStatus {
    #[serde(default)]
    pub free_tier: CloudStatusFreeTier,
    #[serde(default)]
    pub free_tier_monthly: CloudStatusFreeTierMonthly,
    #[serde(default)]
    pub guest: bool,
    #[serde(default)]
    pub host_availability_zones: bool,
    #[serde(default)]
    pub remote_snapshots: bool,
    #[serde(default)]
    pub signup: bool,
    #[serde(default)]
    pub sso: Vec<String>,
    #[serde(default)]
    pub trial: bool,
    #[serde(default)]
    pub vmware: bool,
    #[serde(default)]
    pub vpc: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudStatusFreeTier {
    #[serde(default)]
    pub dssd: u64,
    #[serde(default, rename = "mem")]
    pub memory: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudStatusFreeTierMonthly {
    #[serde(default)]
    pub tx: u64,
}

/// `cloud_status/` endpoint.
pub struct CloudStatusService<'a> {
    client: &'a Client,
}

impl<'a> CloudStatusService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, cancel: &CancellationToken) -> Result<(CloudStatus, Response), Error> {
        self.client.get(cancel, BASE_PATH).await
    }
}
