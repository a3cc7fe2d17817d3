use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::{Metadata, ResourceLink};

const BASE_PATH: &str = "ips/";
const DETAIL_PATH: &str = "ips/detail/";

/// A subscribed public IP address. `uuid` is the address itself.
///
/// `tags` is always serialized, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ip {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    /// Server the address is attached to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ResourceLink>,
    #[serde(default)]
    pub tags: Vec<ResourceLink>,
}

/// `ips/` endpoints.
pub struct IpsService<'a> {
    client: &'a Client,
}

impl<'a> IpsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Ip>, Response), Error> {
        self.client.get_list(cancel, DETAIL_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(Ip, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn tags_are_always_an_array() {
        let ip = Ip {
            uuid: "185.12.6.183".into(),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&ip).unwrap(),
            json!({ "uuid": "185.12.6.183", "tags": [] })
        );
    }
}
