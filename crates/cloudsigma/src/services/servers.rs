use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{item_path, require_id};
use crate::client::{Client, Response};
use crate::error::Error;
use crate::options::ListOptions;
use crate::types::{Metadata, ResourceLink};

const BASE_PATH: &str = "servers/";
const DETAIL_PATH: &str = "servers/detail/";

// ── Server ───────────────────────────────────────────────────────────

/// A virtual machine definition.
///
/// `name`, `cpu`, `mem` and `vnc_password` are required on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Server {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// CPU frequency in MHz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,
    /// Memory in bytes.
    #[serde(default, rename = "mem", skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smp: Option<u32>,
    /// `amd` or `intel`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_type: Option<String>,
    #[serde(default)]
    pub cpus_instead_of_cores: bool,
    #[serde(default)]
    pub enable_numa: bool,
    #[serde(default)]
    pub auto_start: bool,
    #[serde(default)]
    pub context: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypervisor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnc_password: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drives: Vec<ServerDrive>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nics: Vec<ServerNic>,
    #[serde(default, rename = "epcs", skip_serializing_if = "Vec::is_empty")]
    pub enclave_page_caches: Vec<EnclavePageCache>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
    #[serde(default, rename = "pubkeys", skip_serializing_if = "Vec::is_empty")]
    pub public_keys: Vec<ResourceLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceLink>,

    // Assigned by CloudSigma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<ServerRuntime>,
    /// `stopped`, `starting`, `running`, `stopping`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A drive attached to a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDrive {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_order: Option<u32>,
    /// Bus channel, e.g. `0:0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_channel: Option<String>,
    /// `virtio` or `ide`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive: Option<ResourceLink>,
}

/// SGX enclave page cache section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclavePageCache {
    #[serde(default)]
    pub size: u64,
}

/// A network interface of a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerNic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_policy: Option<ResourceLink>,
    #[serde(default, rename = "ip_v4_conf", skip_serializing_if = "Option::is_none")]
    pub ipv4_conf: Option<ServerIpConfiguration>,
    #[serde(default, rename = "ip_v6_conf", skip_serializing_if = "Option::is_none")]
    pub ipv6_conf: Option<ServerIpConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    /// `virtio`, `e1000`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<ResourceLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIpConfiguration {
    /// `dhcp`, `static` or `manual`.
    #[serde(default)]
    pub conf: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<ResourceLink>,
}

/// Live state of a running server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRuntime {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nics: Vec<ServerRuntimeNic>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRuntimeNic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_type: Option<String>,
    #[serde(default, rename = "ip_v4", skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<ServerRuntimeIp>,
    #[serde(default, rename = "ip_v6", skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<ServerRuntimeIp>,
}

/// Address leased to a running NIC.
pub type ServerRuntimeIp = ResourceLink;

/// Reply to `start`, `stop` and `shutdown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerAction {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub uuid: String,
}

// ── Update ───────────────────────────────────────────────────────────

/// Mutable server fields. Most changes need the server to be stopped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,
    #[serde(rename = "mem", skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus_instead_of_cores: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_numa: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_start: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypervisor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vnc_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drives: Option<Vec<ServerDrive>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nics: Option<Vec<ServerNic>>,
    #[serde(rename = "epcs", skip_serializing_if = "Option::is_none")]
    pub enclave_page_caches: Option<Vec<EnclavePageCache>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(rename = "pubkeys", skip_serializing_if = "Option::is_none")]
    pub public_keys: Option<Vec<ResourceLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ResourceLink>>,
}

impl ServerUpdateRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<Server> for ServerUpdateRequest {
    fn from(server: Server) -> Self {
        fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
            (!items.is_empty()).then_some(items)
        }

        Self {
            name: server.name,
            cpu: server.cpu,
            memory: server.memory,
            smp: server.smp,
            cpu_type: server.cpu_type,
            cpus_instead_of_cores: Some(server.cpus_instead_of_cores),
            enable_numa: Some(server.enable_numa),
            auto_start: Some(server.auto_start),
            context: Some(server.context),
            hypervisor: server.hypervisor,
            vnc_password: server.vnc_password,
            drives: non_empty(server.drives),
            nics: non_empty(server.nics),
            enclave_page_caches: non_empty(server.enclave_page_caches),
            meta: (!server.meta.is_empty()).then_some(server.meta),
            public_keys: non_empty(server.public_keys),
            tags: non_empty(server.tags),
        }
    }
}

// ── Service ──────────────────────────────────────────────────────────

/// `servers/` endpoints.
pub struct ServersService<'a> {
    client: &'a Client,
}

impl<'a> ServersService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List servers with full details.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<Server>, Response), Error> {
        self.client.get_list(cancel, DETAIL_PATH, opts).await
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(Server, Response), Error> {
        require_id(uuid)?;
        self.client.get(cancel, &item_path(BASE_PATH, uuid)).await
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        servers: &[Server],
    ) -> Result<(Vec<Server>, Response), Error> {
        self.client.create(cancel, BASE_PATH, servers).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        request: &ServerUpdateRequest,
    ) -> Result<(Server, Response), Error> {
        require_id(uuid)?;
        if request.is_empty() {
            return Err(Error::EmptyPayload);
        }
        self.client
            .put(cancel, &item_path(BASE_PATH, uuid), request)
            .await
    }

    /// Delete a stopped server. Attached drives are kept.
    pub async fn delete(&self, cancel: &CancellationToken, uuid: &str) -> Result<Response, Error> {
        require_id(uuid)?;
        self.client.delete(cancel, &item_path(BASE_PATH, uuid)).await
    }

    pub async fn start(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(ServerAction, Response), Error> {
        self.action(cancel, uuid, "start").await
    }

    /// Hard power-off.
    pub async fn stop(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(ServerAction, Response), Error> {
        self.action(cancel, uuid, "stop").await
    }

    /// ACPI shutdown; the guest decides when to power off.
    pub async fn shutdown(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
    ) -> Result<(ServerAction, Response), Error> {
        self.action(cancel, uuid, "shutdown").await
    }

    async fn action(
        &self,
        cancel: &CancellationToken,
        uuid: &str,
        verb: &str,
    ) -> Result<(ServerAction, Response), Error> {
        require_id(uuid)?;
        self.client
            .action::<(), _>(cancel, BASE_PATH, uuid, verb, None)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_nested_server() {
        let server: Server = serde_json::from_value(json!({
            "uuid": "long-uuid",
            "name": "web",
            "cpu": 2000,
            "mem": 536_870_912,
            "status": "running",
            "drives": [{
                "boot_order": 1,
                "dev_channel": "0:0",
                "device": "virtio",
                "drive": { "uuid": "drive-uuid", "resource_uri": "/api/2.0/drives/drive-uuid/" }
            }],
            "nics": [{
                "ip_v4_conf": { "conf": "dhcp", "ip": null },
                "model": "virtio",
                "mac": "22:a7:a0:0d:43:99"
            }],
            "runtime": {
                "nics": [{ "interface_type": "public", "ip_v4": { "uuid": "185.12.6.183" } }]
            }
        }))
        .unwrap();

        assert_eq!(server.memory, Some(536_870_912));
        assert_eq!(server.drives[0].drive, Some(ResourceLink {
            uuid: "drive-uuid".into(),
            resource_uri: Some("/api/2.0/drives/drive-uuid/".into()),
        }));
        assert_eq!(server.nics[0].ipv4_conf.as_ref().unwrap().conf, "dhcp");
        let runtime = server.runtime.unwrap();
        assert_eq!(runtime.nics[0].ipv4.as_ref().unwrap().uuid, "185.12.6.183");
    }

    #[test]
    fn update_from_server_drops_server_fields() {
        let server = Server {
            uuid: "long-uuid".into(),
            name: Some("web v2".into()),
            cpu: Some(4000),
            status: Some("stopped".into()),
            runtime: Some(ServerRuntime::default()),
            ..Default::default()
        };

        let json = serde_json::to_value(ServerUpdateRequest::from(server)).unwrap();

        assert_eq!(
            json,
            json!({
                "name": "web v2",
                "cpu": 4000,
                "cpus_instead_of_cores": false,
                "enable_numa": false,
                "auto_start": false,
                "context": false
            })
        );
    }

    #[test]
    fn update_from_server_keeps_flags() {
        let server = Server {
            name: Some("a".into()),
            auto_start: true,
            context: true,
            ..Default::default()
        };

        let request = ServerUpdateRequest::from(server);

        assert_eq!(request.auto_start, Some(true));
        assert_eq!(request.context, Some(true));
        assert_eq!(request.enable_numa, Some(false));
    }
}
