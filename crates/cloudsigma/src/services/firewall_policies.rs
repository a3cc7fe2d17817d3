use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::{Metadata, ResourceLink};

const BASE_PATH: &str = "fwpolicies/";
const DETAIL_PATH: &str = "fwpolicies/detail/";

/// A set of firewall rules that can be attached to server NICs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallPolicy {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FirewallPolicyRule>,
    /// Servers the policy is applied to. Read-only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ResourceLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallPolicyRule {
    /// `accept` or `drop`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// `in` or `out`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, rename = "dst_ip", skip_serializing_if = "Option::is_none")]
    pub destination_ip: Option<String>,
    #[serde(default, rename = "dst_port", skip_serializing_if = "Option::is_none")]
    pub destination_port: Option<String>,
    /// `tcp` or `udp`.
    #[serde(default, rename = "ip_proto", skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, rename = "src_ip", skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,
    #[serde(default, rename = "src_port", skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FirewallPolicyUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<FirewallPolicyRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ResourceLink>>,
}

impl FirewallPolicyUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.meta.is_none() && self.rules.is_none() && self.tags.is_none()
    }
}

impl From<FirewallPolicy> for FirewallPolicyUpdateRequest {
    fn from(policy: FirewallPolicy) -> Self {
        Self {
            name: policy.name,
            meta: (!policy.meta.is_empty()).then_some(policy.meta),
            rules: (!policy.rules.is_empty()).then_some(policy.rules),
            tags: (!policy.tags.is_empty()).then_some(policy.tags),
        }
    }
}

/// `fwpolicies/` endpoints.
pub struct FirewallPoliciesService<'a> {
    client: &'a Client,
}

impl<'a> FirewallPoliciesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<FirewallPolicy>, Response), Error> {
        self.client.get_list(cancel, DETAIL_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(FirewallPolicy, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        policies: &[FirewallPolicy],
    ) -> Result<(Vec<FirewallPolicy>, Response), Error> {
        self.client.create(cancel, BASE_PATH, policies).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &FirewallPolicyUpdateRequest,
    ) -> Result<(FirewallPolicy, Response), Error> {
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rule_uses_wire_names() {
        let rule: FirewallPolicyRule = serde_json::from_value(json!({
            "action": "drop",
            "direction": "in",
            "dst_port": "22",
            "ip_proto": "tcp",
            "src_ip": "10.0.0.0/8"
        }))
        .unwrap();

        assert_eq!(rule.destination_port.as_deref(), Some("22"));
        assert_eq!(rule.protocol.as_deref(), Some("tcp"));
        assert_eq!(rule.source_ip.as_deref(), Some("10.0.0.0/8"));
        assert!(rule.destination_ip.is_none());
    }
}
