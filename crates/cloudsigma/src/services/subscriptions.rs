use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;

const BASE_PATH: &str = "subscriptions/";

/// A prepaid resource subscription (e.g. CPU, memory, an IP or a VLAN).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `cpu`, `mem`, `ip`, `vlan`, `dssd`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// Duration such as `1 month`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default)]
    pub free_tier: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `subscriptions/` endpoints.
pub struct SubscriptionsService<'a> {
    client: &'a Client,
}

impl<'a> SubscriptionsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Subscription>, Response), Error> {
        self.client.get_list(cancel, BASE_PATH, opts).await
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        subscriptions: &[Subscription],
    ) -> Result<(Vec<Subscription>, Response), Error> {
        self.client.create(cancel, BASE_PATH, subscriptions).await
    }
}
