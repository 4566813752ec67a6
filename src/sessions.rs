//! Session lifecycle — create, pair, inspect, reconfigure, and tear down
//! WhatsApp sessions.

use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{encode_segment, DApiClient, Query};
use crate::error::DApiResult;
use crate::types::ApiResponse;

const BASE: &str = "/api/v1/sessions";

/// How a new session authenticates with the phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    Qr,
    Pair,
}

/// Connection state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Connecting,
    Connected,
    Disconnected,
    QrReady,
    PairCodeReady,
}

/// Per-event webhook toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEventConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Webhook delivery configuration for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub webhook_type: String,
    pub events: HashMap<String, WebhookEventConfig>,
}

/// Per-event RabbitMQ toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RabbitMqEventConfig {
    pub enabled: bool,
}

/// RabbitMQ delivery configuration for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RabbitMqConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<HashMap<String, RabbitMqEventConfig>>,
}

/// Options for [`Sessions::create`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionOptions {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_config: Option<WebhookConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
    /// Backend provider; currently only `whatsmeow`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_mode: Option<ConnectionMode>,
    /// Phone number to pair with, for [`ConnectionMode::Pair`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_sync: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_groups: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_status: Option<bool>,
}

/// A managed session as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub session_id: String,
    pub status: SessionStatus,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_config: Option<WebhookConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_code_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_mode: Option<ConnectionMode>,
}

/// Response to session creation and reconnection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub message: String,
    pub session_id: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_code: Option<String>,
}

/// Current QR code for a session awaiting scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub session_id: String,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_updated_at: Option<String>,
}

/// Current pairing code for a session in phone-number pairing mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCodeResponse {
    pub session_id: String,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_code_updated_at: Option<String>,
    pub connection_mode: ConnectionMode,
}

/// Options for [`Sessions::update_webhook`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhookOptions {
    pub webhook_url: String,
}

/// Options for [`Sessions::update_webhook_config`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhookConfigOptions {
    pub enabled: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub webhook_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<HashMap<String, WebhookEventConfig>>,
}

/// Options for [`Sessions::update_rabbitmq_config`]. Everything except
/// `enabled` is a partial update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRabbitMqConfigOptions {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<HashMap<String, RabbitMqEventConfig>>,
}

/// Options for [`Sessions::update_ignore_settings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreSettingsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_groups: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_status: Option<bool>,
}

/// Options for [`Sessions::update_call_settings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSettingsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_calls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_calls_message: Option<String>,
}

/// A single session log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLog {
    pub id: String,
    pub session_id: String,
    pub level: String,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// Session management operations.
#[derive(Debug, Clone)]
pub struct Sessions {
    client: DApiClient,
}

impl Sessions {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    /// Create or start a session.
    pub async fn create(&self, options: &CreateSessionOptions) -> DApiResult<SessionResponse> {
        let response: SessionResponse = self
            .client
            .post(BASE, Some(serde_json::to_value(options)?), Query::new())
            .await?;
        info!("Created session '{}'", response.session_id);
        Ok(response)
    }

    /// List all sessions.
    pub async fn list(&self) -> DApiResult<Vec<Session>> {
        self.client.get(BASE, Query::new()).await
    }

    /// Get session details.
    pub async fn get(&self, session_id: &str) -> DApiResult<Session> {
        self.client
            .get(&format!("{BASE}/{}", encode_segment(session_id)), Query::new())
            .await
    }

    /// Delete a session.
    pub async fn delete(&self, session_id: &str) -> DApiResult<ApiResponse> {
        let response = self
            .client
            .delete(&format!("{BASE}/{}", encode_segment(session_id)), None)
            .await?;
        info!("Deleted session '{session_id}'");
        Ok(response)
    }

    /// Reconnect a session (restarts the backing worker).
    pub async fn connect(&self, session_id: &str) -> DApiResult<SessionResponse> {
        self.client
            .get(
                &format!("{BASE}/{}/connect", encode_segment(session_id)),
                Query::new(),
            )
            .await
    }

    /// Disconnect a session without deleting it.
    pub async fn disconnect(&self, session_id: &str) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/disconnect", encode_segment(session_id)),
                None,
                Query::new(),
            )
            .await
    }

    /// Get the QR code for a session. With `as_image`, the server returns the
    /// QR code rendered as a PNG image URL.
    pub async fn get_qr_code(&self, session_id: &str, as_image: bool) -> DApiResult<QrCodeResponse> {
        let query = if as_image {
            Query::new().set("image", "1")
        } else {
            Query::new()
        };
        self.client
            .get(&format!("{BASE}/{}/qr", encode_segment(session_id)), query)
            .await
    }

    /// Get the pairing code for a session in phone-number pairing mode.
    pub async fn get_pair_code(&self, session_id: &str) -> DApiResult<PairCodeResponse> {
        self.client
            .get(
                &format!("{BASE}/{}/pair-code", encode_segment(session_id)),
                Query::new(),
            )
            .await
    }

    /// Update the webhook URL for a session.
    pub async fn update_webhook(
        &self,
        session_id: &str,
        options: &UpdateWebhookOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/webhook", encode_segment(session_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Update the webhook event configuration for a session.
    pub async fn update_webhook_config(
        &self,
        session_id: &str,
        options: &UpdateWebhookConfigOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/webhook-config", encode_segment(session_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Update the RabbitMQ configuration for a session.
    pub async fn update_rabbitmq_config(
        &self,
        session_id: &str,
        options: &UpdateRabbitMqConfigOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/rabbitmq-config", encode_segment(session_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Update message filtering (ignore groups/status broadcasts).
    pub async fn update_ignore_settings(
        &self,
        session_id: &str,
        options: &IgnoreSettingsOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/ignore-settings", encode_segment(session_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Update call handling (reject calls, auto-reply message).
    pub async fn update_call_settings(
        &self,
        session_id: &str,
        options: &CallSettingsOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/call-settings", encode_segment(session_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Get session logs.
    pub async fn get_logs(&self, session_id: &str) -> DApiResult<Vec<SessionLog>> {
        self.client
            .get(
                &format!("{BASE}/{}/logs", encode_segment(session_id)),
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
    fn test_create_options_skip_absent_fields() {
        let options = CreateSessionOptions {
            session_id: "my-session".to_string(),
            webhook_url: None,
            webhook_config: None,
            metadata: None,
            provider: None,
            connection_mode: Some(ConnectionMode::Qr),
            pair_phone: None,
            history_sync: Some(true),
            ignore_groups: None,
            ignore_status: None,
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "sessionId": "my-session",
                "connectionMode": "qr",
                "historySync": true,
            })
        );
    }

    #[test]
    fn test_session_status_wire_values() {
        assert_eq!(
            serde_json::to_value(SessionStatus::QrReady).unwrap(),
            json!("qr_ready")
        );
        assert_eq!(
            serde_json::to_value(SessionStatus::PairCodeReady).unwrap(),
            json!("pair_code_ready")
        );
    }

    #[test]
    fn test_webhook_config_type_field_name() {
        let config = WebhookConfig {
            enabled: true,
            webhook_type: "global".to_string(),
            events: HashMap::new(),
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], json!("global"));
    }
}
