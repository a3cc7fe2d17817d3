use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::client::{Client, Response};
use crate::error::Error;

const BASE_PATH: &str = "capabilities/";

/// Resource limits of the cloud location (CPU, memory, SMP per host type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub hosts: CapabilitiesHosts,
    #[serde(default)]
    pub hypervisors: CapabilitiesHypervisors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesHosts {
    #[serde(default)]
    pub amd: CapabilitiesHost,
    #[serde(default)]
    pub intel: CapabilitiesHost,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesHost {
    #[serde(default)]
    pub cpu: CapabilitiesLimitation,
    #[serde(default)]
    pub cpu_per_smp: CapabilitiesLimitation,
    #[serde(default, rename = "mem")]
    pub memory: CapabilitiesLimitation,
    #[serde(default)]
    pub smp: CapabilitiesLimitation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesHypervisors {
    #[serde(default)]
    pub kvm: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesLimitation {
    #[serde(default)]
    pub max: u64,
    #[serde(default)]
    pub min: u64,
}

/// `capabilities/` endpoint.
pub struct CapabilitiesService<'a> {
    client: &'a Client,
}

impl<'a> CapabilitiesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, cancel: &CancellationToken) -> Result<(Capabilities, Response), Error> {
        self.client.get(cancel, BASE_PATH).await
    }
}
