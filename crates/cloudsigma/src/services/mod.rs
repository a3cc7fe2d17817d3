// Per-resource service handles.
//
// Each handle borrows the `Client` and carries no state of its own, so
// `client.drives()` is free to call as often as needed.

mod acls;
mod capabilities;
mod cloud_status;
mod drives;
mod firewall_policies;
mod ips;
mod keypairs;
mod library_drives;
mod licenses;
mod locations;
mod profile;
mod pubkeys;
mod remote_snapshots;
mod servers;
mod snapshots;
mod subscriptions;
mod tags;
mod vlans;

pub use acls::{Acl, AclRule, AclUpdateRequest, AclsService};
pub use capabilities::{
    Capabilities, CapabilitiesHost, CapabilitiesHosts, CapabilitiesHypervisors,
    CapabilitiesLimitation, CapabilitiesService,
};
pub use cloud_status::{
    CloudStatus, CloudStatusFreeTier, CloudStatusFreeTierMonthly, CloudStatusService,
};
pub use drives::{Drive, DriveCloneRequest, DriveLicense, DriveUpdateRequest, DrivesService};
pub use firewall_policies::{
    FirewallPoliciesService, FirewallPolicy, FirewallPolicyRule, FirewallPolicyUpdateRequest,
};
pub use ips::{Ip, IpsService};
pub use keypairs::{Keypair, KeypairUpdateRequest, KeypairsService};
pub use library_drives::{LibraryDrive, LibraryDriveCloneRequest, LibraryDrivesService};
pub use licenses::{License, LicensesService};
pub use locations::{Location, LocationsService};
pub use profile::{Profile, ProfileService, ProfileUpdateRequest};
pub use pubkeys::PubkeysService;
pub use remote_snapshots::{
    RemoteSnapshot, RemoteSnapshotDriveMetadata, RemoteSnapshotUpdateRequest,
    RemoteSnapshotsService,
};
pub use servers::{
    EnclavePageCache, Server, ServerAction, ServerDrive, ServerIpConfiguration, ServerNic,
    ServerRuntime, ServerRuntimeIp, ServerRuntimeNic, ServerUpdateRequest, ServersService,
};
pub use snapshots::{Snapshot, SnapshotUpdateRequest, SnapshotsService};
pub use subscriptions::{Subscription, SubscriptionsService};
pub use tags::{Tag, TagMeta, TagUpdateRequest, TagsService};
pub use vlans::{Vlan, VlanSubscription, VlanUpdateRequest, VlansService};

use crate::error::Error;
use crate::options::path_segment;

/// Reject an empty or dot-segment resource identifier before anything is sent.
pub(crate) fn require_id(uuid: &str) -> Result<(), Error> {
    if uuid.is_empty() {
        return Err(Error::EmptyArgument);
    }
    if uuid == "." || uuid == ".." {
        return Err(Error::InvalidId { id: uuid.to_owned() });
    }
    Ok(())
}

/// `{base}{uuid}/` for a base path that already ends in `/`.
pub(crate) fn item_path(base: &str, uuid: &str) -> String {
    format!("{base}{}/", path_segment(uuid))
}
