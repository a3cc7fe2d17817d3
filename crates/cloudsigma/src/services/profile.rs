use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::client::{Client, Response};
use crate::error::Error;
use crate::types::Metadata;

const BASE_PATH: &str = "profile/";

/// Account profile of the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Profile {
    #[serde(default)]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<String>,
    #[serde(default)]
    pub api_https_only: bool,
    #[serde(default)]
    pub key_auth: bool,
    #[serde(default)]
    pub mailing_list: bool,
    #[serde(default)]
    pub invoicing: bool,
    #[serde(default, rename = "has_autotopup")]
    pub has_auto_top_up: bool,
    #[serde(default, rename = "autotopup_amount", skip_serializing_if = "Option::is_none")]
    pub auto_top_up_amount: Option<String>,
    #[serde(default, rename = "autotopup_threshold", skip_serializing_if = "Option::is_none")]
    pub auto_top_up_threshold: Option<String>,
    #[serde(default, rename = "has_tx_autotopup")]
    pub has_tx_auto_top_up: bool,
    #[serde(default, rename = "tx_autotopup_amount", skip_serializing_if = "Option::is_none")]
    pub tx_auto_top_up_amount: Option<String>,
    #[serde(default, rename = "tx_autotopup_threshold", skip_serializing_if = "Option::is_none")]
    pub tx_auto_top_up_threshold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_naming: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_restrictions: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,

    // Assigned by CloudSigma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<String>,
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_https_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoicing: Option<bool>,
    #[serde(rename = "has_autotopup", skip_serializing_if = "Option::is_none")]
    pub has_auto_top_up: Option<bool>,
    #[serde(rename = "autotopup_amount", skip_serializing_if = "Option::is_none")]
    pub auto_top_up_amount: Option<String>,
    #[serde(rename = "autotopup_threshold", skip_serializing_if = "Option::is_none")]
    pub auto_top_up_threshold: Option<String>,
    #[serde(rename = "has_tx_autotopup", skip_serializing_if = "Option::is_none")]
    pub has_tx_auto_top_up: Option<bool>,
    #[serde(rename = "tx_autotopup_amount", skip_serializing_if = "Option::is_none")]
    pub tx_auto_top_up_amount: Option<String>,
    #[serde(rename = "tx_autotopup_threshold", skip_serializing_if = "Option::is_none")]
    pub tx_auto_top_up_threshold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_naming: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_restrictions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
}

impl ProfileUpdateRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<Profile> for ProfileUpdateRequest {
    fn from(p: Profile) -> Self {
        Self {
            email: p.email,
            title: p.title,
            first_name: p.first_name,
            last_name: p.last_name,
            nickname: p.nickname,
            company: p.company,
            address: p.address,
            town: p.town,
            postcode: p.postcode,
            state: p.state,
            country: p.country,
            phone: p.phone,
            language: p.language,
            vat: p.vat,
            api_https_only: Some(p.api_https_only),
            key_auth: Some(p.key_auth),
            mailing_list: Some(p.mailing_list),
            invoicing: Some(p.invoicing),
            has_auto_top_up: Some(p.has_auto_top_up),
            auto_top_up_amount: p.auto_top_up_amount,
            auto_top_up_threshold: p.auto_top_up_threshold,
            has_tx_auto_top_up: Some(p.has_tx_auto_top_up),
            tx_auto_top_up_amount: p.tx_auto_top_up_amount,
            tx_auto_top_up_threshold: p.tx_auto_top_up_threshold,
            clone_naming: p.clone_naming,
            my_notes: p.my_notes,
            network_restrictions: p.network_restrictions,
            meta: (!p.meta.is_empty()).then_some(p.meta),
        }
    }
}

/// `profile/` endpoints.
pub struct ProfileService<'a> {
    client: &'a Client,
}

impl<'a> ProfileService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, cancel: &CancellationToken) -> Result<(Profile, Response), Error> {
        self.client.get(cancel, BASE_PATH).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        request: &ProfileUpdateRequest,
    ) -> Result<(Profile, Response), Error> {
        if request.is_empty() {
            return Err(Error::EmptyPayload);
        }
        self.client.put(cancel, BASE_PATH, request).await
    }
}
