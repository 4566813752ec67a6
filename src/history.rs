//! History sync — full and on-demand message history imports.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{DApiClient, Query};
use crate::error::DApiResult;

const BASE: &str = "/api/v1/history";

/// Options for [`History::full_sync`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSyncOptions {
    pub session_id: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`History::on_demand_sync`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandSyncOptions {
    pub session_id: String,
    /// Number of messages to pull (server default 50).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Response to a history sync trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// History sync operations.
#[derive(Debug, Clone)]
pub struct History {
    client: DApiClient,
}

impl History {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    /// Trigger a full history sync. The session id travels in the body; the
    /// async flag is a query parameter.
    pub async fn full_sync(&self, options: &FullSyncOptions) -> DApiResult<HistoryResponse> {
        let query = Query::new().set_opt("async", options.run_async.as_deref());
        self.client
            .post(
                &format!("{BASE}/full-sync"),
                Some(json!({ "sessionId": options.session_id })),
                query,
            )
            .await
    }

    /// Trigger an on-demand history sync of up to `count` messages.
    pub async fn on_demand_sync(&self, options: &OnDemandSyncOptions) -> DApiResult<HistoryResponse> {
        let query = Query::new()
            .set_opt("count", options.count)
            .set_opt("async", options.run_async.as_deref());
        self.client
            .post(
                &format!("{BASE}/on-demand"),
                Some(json!({ "sessionId": options.session_id })),
                query,
            )
            .await
    }
}
