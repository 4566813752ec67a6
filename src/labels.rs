//! Labels — sync, upsert, attach/detach, and listings.

use serde::{Deserialize, Serialize};

use crate::client::{DApiClient, Query};
use crate::error::DApiResult;

const BASE: &str = "/api/v1/labels";

/// A WhatsApp label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: i64,
    pub name: String,
    pub color: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Options for [`Labels::sync`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncLabelsOptions {
    pub session_id: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Labels::upsert`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertLabelOptions {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub label_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Labels::attach`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachLabelOptions {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub phone: String,
    pub label_id: i64,
    /// `true` attaches the label, `false` detaches it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labeled: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Labels::list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLabelsOptions {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
}

/// Options for [`Labels::get_contact_labels`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLabelsOptions {
    pub session_id: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
}

/// Response to label mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
}

/// Label operations.
#[derive(Debug, Clone)]
pub struct Labels {
    client: DApiClient,
}

impl Labels {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    /// Trigger a full label sync.
    pub async fn sync(&self, options: &SyncLabelsOptions) -> DApiResult<LabelResponse> {
        self.client
            .post(
                &format!("{BASE}/sync"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Create or update a label.
    pub async fn upsert(&self, options: &UpsertLabelOptions) -> DApiResult<LabelResponse> {
        self.client
            .post(
                &format!("{BASE}/upsert"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Attach or detach a label from a chat.
    pub async fn attach(&self, options: &AttachLabelOptions) -> DApiResult<LabelResponse> {
        self.client
            .post(
                &format!("{BASE}/attach"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// List all labels for a session.
    pub async fn list(&self, options: &ListLabelsOptions) -> DApiResult<Vec<Label>> {
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set_opt("includeDeleted", options.include_deleted);
        self.client.get(&format!("{BASE}/list"), query).await
    }

    /// List labels attached to a contact.
    pub async fn get_contact_labels(&self, options: &ContactLabelsOptions) -> DApiResult<Vec<Label>> {
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set("phone", options.phone.as_str())
            .set_opt("includeDeleted", options.include_deleted);
        self.client
            .get(&format!("{BASE}/contact-labels"), query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upsert_options_keep_label_id_snake_case() {
        let options = UpsertLabelOptions {
            session_id: "s1".to_string(),
            label_id: 7,
            name: Some("VIP".to_string()),
            color: None,
            deleted: None,
            run_async: None,
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({ "sessionId": "s1", "label_id": 7, "name": "VIP" })
        );
    }
}
