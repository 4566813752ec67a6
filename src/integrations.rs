//! Integrations — S3 storage targets and RabbitMQ connection testing.

use log::info;
use serde::{Deserialize, Serialize};

use crate::client::{encode_segment, DApiClient, Query};
use crate::error::DApiResult;

const BASE: &str = "/api/v1/integrations";

/// Kind of integration. Only S3 targets exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationType {
    S3,
}

/// S3/MinIO connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_path_style: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_enabled: Option<bool>,
}

/// Partial S3 settings for [`Integrations::update`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_path_style: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_enabled: Option<bool>,
}

/// A configured integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: String,
    pub integration_name: String,
    pub integration_type: IntegrationType,
    pub config: S3Config,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Options for [`Integrations::create`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntegrationOptions {
    pub integration_name: String,
    pub integration_type: IntegrationType,
    pub config: S3Config,
}

/// Options for [`Integrations::update`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntegrationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<S3ConfigUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Options for [`Integrations::test_rabbitmq_connection`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRabbitMqConnectionOptions {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
}

/// Response to integration mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration: Option<Integration>,
}

/// Result of a connection test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestResponse {
    pub success: bool,
    pub message: String,
}

/// Integration operations.
#[derive(Debug, Clone)]
pub struct Integrations {
    client: DApiClient,
}

impl Integrations {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    /// List all integrations.
    pub async fn list(&self) -> DApiResult<Vec<Integration>> {
        self.client.get(BASE, Query::new()).await
    }

    /// Get a specific integration.
    pub async fn get(&self, id: &str) -> DApiResult<Integration> {
        self.client
            .get(&format!("{BASE}/{}", encode_segment(id)), Query::new())
            .await
    }

    /// Create a new S3 integration.
    pub async fn create(&self, options: &CreateIntegrationOptions) -> DApiResult<IntegrationResponse> {
        let response = self
            .client
            .post(BASE, Some(serde_json::to_value(options)?), Query::new())
            .await?;
        info!("Created integration '{}'", options.integration_name);
        Ok(response)
    }

    /// Partially update an integration.
    pub async fn update(
        &self,
        id: &str,
        options: &UpdateIntegrationOptions,
    ) -> DApiResult<IntegrationResponse> {
        self.client
            .patch(
                &format!("{BASE}/{}", encode_segment(id)),
                Some(serde_json::to_value(options)?),
            )
            .await
    }

    /// Delete an integration.
    pub async fn delete(&self, id: &str) -> DApiResult<IntegrationResponse> {
        self.client
            .delete(&format!("{BASE}/{}", encode_segment(id)), None)
            .await
    }

    /// Test an S3/MinIO connection without saving it.
    pub async fn test_s3_connection(&self, options: &S3Config) -> DApiResult<ConnectionTestResponse> {
        self.client
            .post(
                &format!("{BASE}/test-s3"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Test a RabbitMQ connection without saving it.
    pub async fn test_rabbitmq_connection(
        &self,
        options: &TestRabbitMqConnectionOptions,
    ) -> DApiResult<ConnectionTestResponse> {
        self.client
            .post(
                "/api/v1/rabbitmq/test-connection",
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
    fn test_integration_type_wire_value() {
        assert_eq!(serde_json::to_value(IntegrationType::S3).unwrap(), json!("S3"));
    }

    #[test]
    fn test_update_options_partial_config() {
        let options = UpdateIntegrationOptions {
            integration_name: None,
            config: Some(S3ConfigUpdate {
                bucket: Some("media-archive".to_string()),
                ..Default::default()
            }),
            is_active: Some(false),
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({ "config": { "bucket": "media-archive" }, "isActive": false })
        );
    }
}
