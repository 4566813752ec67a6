//! Contacts — address book listing, lookup, avatars, number verification,
//! and the blocklist.

use serde::{Deserialize, Serialize};

use crate::client::{encode_segment, DApiClient, Query};
use crate::error::DApiResult;

const BASE: &str = "/api/v1/contacts";

/// Block or unblock a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAction {
    Block,
    Unblock,
}

/// An address-book contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub jid: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_contact: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Detailed contact information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub jid: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on_whats_app: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_level: Option<u64>,
}

/// Registration check result for one number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNumberResult {
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jid: Option<String>,
    pub is_on_whats_app: bool,
}

/// Options for [`Contacts::list`] and [`Contacts::get`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContactOptions {
    pub session_id: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Contacts::get_avatar`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAvatarOptions {
    pub session_id: String,
    /// Request the low-resolution preview instead of the full image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Force a refresh instead of the cached avatar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<String>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Contacts::check_numbers`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNumbersOptions {
    pub session_id: String,
    pub numbers: Vec<String>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Contacts::get_user_info`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserInfoOptions {
    pub session_id: String,
    pub phone: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Contacts::update_blocklist`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlocklistOptions {
    pub session_id: String,
    pub phone: String,
    pub action: BlockAction,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// One blocked contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocklistEntry {
    pub jid: String,
    pub phone: String,
}

/// The session's blocklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocklistResponse {
    pub blocklist: Vec<BlocklistEntry>,
}

/// A contact's avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_avatar: Option<String>,
}

/// Contact operations.
#[derive(Debug, Clone)]
pub struct Contacts {
    client: DApiClient,
}

impl Contacts {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    /// List all contacts from the address book.
    pub async fn list(&self, options: &GetContactOptions) -> DApiResult<Vec<Contact>> {
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set_opt("async", options.run_async.as_deref());
        self.client.get(&format!("{BASE}/"), query).await
    }

    /// Get detailed information about a contact.
    pub async fn get(&self, phone: &str, options: &GetContactOptions) -> DApiResult<ContactInfo> {
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set_opt("async", options.run_async.as_deref());
        self.client
            .get(&format!("{BASE}/{}", encode_segment(phone)), query)
            .await
    }

    /// Get a contact's avatar.
    pub async fn get_avatar(
        &self,
        phone: &str,
        options: &GetAvatarOptions,
    ) -> DApiResult<AvatarResponse> {
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set_opt("preview", options.preview.as_deref())
            .set_opt("force", options.force.as_deref())
            .set_opt("async", options.run_async.as_deref());
        self.client
            .get(&format!("{BASE}/{}/avatar", encode_segment(phone)), query)
            .await
    }

    /// Check whether phone numbers are registered on WhatsApp.
    pub async fn check_numbers(
        &self,
        options: &CheckNumbersOptions,
    ) -> DApiResult<Vec<CheckNumberResult>> {
        self.client
            .post(
                &format!("{BASE}/check"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Get user information by phone number.
    pub async fn get_user_info(&self, options: &GetUserInfoOptions) -> DApiResult<ContactInfo> {
        self.client
            .post(
                &format!("{BASE}/getuser"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Get the blocklist.
    pub async fn get_blocklist(
        &self,
        session_id: &str,
        run_async: Option<&str>,
    ) -> DApiResult<BlocklistResponse> {
        let query = Query::new()
            .set("sessionId", session_id)
            .set_opt("async", run_async);
        self.client.get(&format!("{BASE}/blocklist"), query).await
    }

    /// Block or unblock a contact.
    pub async fn update_blocklist(
        &self,
        options: &UpdateBlocklistOptions,
    ) -> DApiResult<BlocklistResponse> {
        self.client
            .post(
                &format!("{BASE}/blocklist"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_action_wire_values() {
        assert_eq!(serde_json::to_value(BlockAction::Block).unwrap(), json!("block"));
        assert_eq!(serde_json::to_value(BlockAction::Unblock).unwrap(), json!("unblock"));
    }

    #[test]
    fn test_check_number_result_field_names() {
        let value = json!({
            "phone": "5511999999999",
            "jid": "5511999999999@s.whatsapp.net",
            "isOnWhatsApp": true,
        });
        let result: CheckNumberResult = serde_json::from_value(value).unwrap();

        assert!(result.is_on_whats_app);
        assert_eq!(result.jid.as_deref(), Some("5511999999999@s.whatsapp.net"));
    }
}
