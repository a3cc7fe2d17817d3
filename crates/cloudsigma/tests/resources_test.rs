#![allow(clippy::unwrap_used)]
// Integration tests for account, networking, and catalogue services using wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudsigma::services::{
    Acl, AclRule, AclUpdateRequest, FirewallPolicy, FirewallPolicyRule, Keypair,
    KeypairUpdateRequest, ProfileUpdateRequest, Subscription, Tag, TagMeta, TagUpdateRequest,
    VlanUpdateRequest,
};
use cloudsigma::{CancellationToken, Client, Error, ResourceLink, TokenCredentialsProvider};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::with_client(
        reqwest::Client::new(),
        Url::parse(&format!("{}/", server.uri())).unwrap(),
        Arc::new(TokenCredentialsProvider::new("token")),
    );
    (server, client)
}

// ── Tags ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_tag() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/tags/"))
        .and(body_json(json!({
            "objects": [{ "name": "prod", "resources": [{ "uuid": "srv-1" }] }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "objects": [{
                "uuid": "tag-uuid",
                "name": "prod",
                "resources": [{ "uuid": "srv-1", "resource_uri": "/api/2.0/servers/srv-1/" }],
                "owner": { "uuid": "owner-uuid" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tag = Tag {
        name: Some("prod".into()),
        resources: vec![ResourceLink::new("srv-1")],
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (tags, _) = client.tags().create(&cancel, &[tag]).await.unwrap();

    assert_eq!(tags[0].uuid, "tag-uuid");
    assert_eq!(tags[0].owner.as_ref().unwrap().uuid, "owner-uuid");
    assert_eq!(
        tags[0].resources[0].resource_uri.as_deref(),
        Some("/api/2.0/servers/srv-1/")
    );
}

#[tokio::test]
async fn test_update_tag_color() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/tags/tag-uuid/"))
        .and(body_json(json!({ "meta": { "color": "red" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "tag-uuid",
            "name": "prod",
            "meta": { "color": "red" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TagUpdateRequest {
        meta: Some(TagMeta {
            color: Some("red".into()),
        }),
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (tag, _) = client
        .tags()
        .update(&cancel, "tag-uuid", &request)
        .await
        .unwrap();

    assert_eq!(tag.meta.color.as_deref(), Some("red"));
}

// ── ACLs ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_acl_sends_empty_arrays() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/acls/"))
        .and(body_json(json!({
            "objects": [{ "name": "readers", "rules": [], "tags": [] }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "objects": [{ "uuid": "acl-uuid", "name": "readers", "rules": [], "tags": [] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let acl = Acl {
        name: Some("readers".into()),
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (acls, _) = client.acls().create(&cancel, &[acl]).await.unwrap();

    assert_eq!(acls[0].uuid, "acl-uuid");
}

#[tokio::test]
async fn test_update_acl_rules() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/acls/acl-uuid/"))
        .and(body_json(json!({
            "name": "readers",
            "rules": [{ "permission": "LIST" }],
            "tags": [{ "uuid": "tag-uuid" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "acl-uuid",
            "name": "readers",
            "rules": [{ "permission": "LIST" }],
            "tags": [{ "uuid": "tag-uuid" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let acl = Acl {
        uuid: "acl-uuid".into(),
        name: Some("readers".into()),
        rules: vec![AclRule {
            permission: Some("LIST".into()),
        }],
        tags: vec![ResourceLink::new("tag-uuid")],
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (updated, _) = client
        .acls()
        .update(&cancel, "acl-uuid", &AclUpdateRequest::from(acl))
        .await
        .unwrap();

    assert_eq!(updated.rules.len(), 1);
}

// ── Firewall policies ───────────────────────────────────────────────

#[tokio::test]
async fn test_create_firewall_policy() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fwpolicies/"))
        .and(body_json(json!({
            "objects": [{
                "name": "web",
                "rules": [{
                    "action": "accept",
                    "direction": "in",
                    "dst_port": "443",
                    "ip_proto": "tcp"
                }]
            }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "objects": [{ "uuid": "fw-uuid", "name": "web" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let policy = FirewallPolicy {
        name: Some("web".into()),
        rules: vec![FirewallPolicyRule {
            action: Some("accept".into()),
            direction: Some("in".into()),
            destination_port: Some("443".into()),
            protocol: Some("tcp".into()),
            ..Default::default()
        }],
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (policies, _) = client
        .firewall_policies()
        .create(&cancel, &[policy])
        .await
        .unwrap();

    assert_eq!(policies[0].uuid, "fw-uuid");
}

// ── IPs and VLANs ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_ips() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/ips/detail/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{
                "uuid": "185.12.6.183",
                "gateway": "185.12.6.1",
                "netmask": 24,
                "nameservers": ["8.8.8.8"],
                "server": { "uuid": "srv-1" },
                "tags": []
            }],
            "meta": { "total_count": 1 }
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let (ips, _) = client.ips().list(&cancel, None).await.unwrap();

    assert_eq!(ips[0].uuid, "185.12.6.183");
    assert_eq!(ips[0].netmask, Some(24));
    assert_eq!(ips[0].server.as_ref().unwrap().uuid, "srv-1");
}

#[tokio::test]
async fn test_update_vlan() {
    let (server, client) = setup().await;

    let mut meta = serde_json::Map::new();
    meta.insert("name".into(), json!("backend"));

    Mock::given(method("PUT"))
        .and(path("/vlans/vlan-uuid/"))
        .and(body_json(json!({ "meta": { "name": "backend" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "vlan-uuid",
            "meta": { "name": "backend" },
            "subscription": { "id": 7 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = VlanUpdateRequest {
        meta: Some(meta),
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (vlan, _) = client
        .vlans()
        .update(&cancel, "vlan-uuid", &request)
        .await
        .unwrap();

    assert_eq!(vlan.meta["name"], "backend");
    assert_eq!(vlan.subscription.unwrap().id, 7);
}

// ── Keys ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_keypair_omits_read_only_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/keypairs/"))
        .and(body_json(json!({
            "objects": [{ "name": "laptop", "public_key": "ssh-ed25519 AAAA" }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "objects": [{
                "uuid": "kp-uuid",
                "name": "laptop",
                "public_key": "ssh-ed25519 AAAA",
                "has_private_key": false
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let keypair = Keypair {
        name: Some("laptop".into()),
        public_key: Some("ssh-ed25519 AAAA".into()),
        has_private_key: true,
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (created, _) = client
        .keypairs()
        .create(&cancel, &[keypair])
        .await
        .unwrap();

    assert_eq!(created[0].uuid, "kp-uuid");
    assert!(!created[0].has_private_key);
}

#[tokio::test]
async fn test_update_keypair_needs_a_field() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let err = client
        .keypairs()
        .update(&cancel, "kp-uuid", &KeypairUpdateRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyPayload));
}

#[tokio::test]
async fn test_get_pubkey() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pubkeys/kp-uuid/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "kp-uuid",
            "fingerprint": "SHA256:abc",
            "public_key": "ssh-ed25519 AAAA"
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let (key, _) = client.pubkeys().get(&cancel, "kp-uuid").await.unwrap();

    assert_eq!(key.fingerprint.as_deref(), Some("SHA256:abc"));
}

// ── Account ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_profile() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/profile/"))
        .and(body_json(json!({ "first_name": "Ada", "mailing_list": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "user-uuid",
            "first_name": "Ada",
            "mailing_list": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ProfileUpdateRequest {
        first_name: Some("Ada".into()),
        mailing_list: Some(false),
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (profile, _) = client.profile().update(&cancel, &request).await.unwrap();

    assert_eq!(profile.uuid, "user-uuid");
    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn test_create_subscription() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/subscriptions/"))
        .and(body_json(json!({
            "objects": [{
                "resource": "vlan",
                "amount": "1",
                "period": "1 month",
                "auto_renew": true,
                "free_tier": false
            }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "objects": [{ "uuid": "sub-uuid", "id": "12345", "resource": "vlan", "status": "active" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let subscription = Subscription {
        resource: Some("vlan".into()),
        amount: Some("1".into()),
        period: Some("1 month".into()),
        auto_renew: true,
        ..Default::default()
    };

    let cancel = CancellationToken::new();
    let (subs, _) = client
        .subscriptions()
        .create(&cancel, &[subscription])
        .await
        .unwrap();

    assert_eq!(subs[0].status.as_deref(), Some("active"));
}

// ── Catalogue ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_licenses() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/licenses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{
                "name": "msft_p73_04837",
                "long_name": "SQL Server Standard",
                "type": "instance",
                "user_metric": "smp",
                "burstable": false
            }],
            "meta": { "total_count": 1 }
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let (licenses, _) = client.licenses().list(&cancel, None).await.unwrap();

    assert_eq!(licenses[0].license_type.as_deref(), Some("instance"));
    assert_eq!(licenses[0].user_metric, "smp");
}

#[tokio::test]
async fn test_get_capabilities() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/capabilities/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hypervisors": { "kvm": ["intel", "amd"] }
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let (caps, _) = client.capabilities().get(&cancel).await.unwrap();

    assert_eq!(caps.hypervisors.kvm, vec!["intel", "amd"]);
}

#[tokio::test]
async fn test_get_cloud_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cloud_status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "signup": true,
            "remote_snapshots": true,
            "sso": ["google"],
            "free_tier": { "dssd": 10, "mem": 1024 }
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let (status, _) = client.cloud_status().get(&cancel).await.unwrap();

    assert!(status.signup);
    assert!(status.remote_snapshots);
    assert_eq!(status.sso, vec!["google"]);
    assert_eq!(status.free_tier.memory, 1024);
}
