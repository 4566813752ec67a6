//! Media retrieval — decrypt and download media referenced by messages.

use serde::{Deserialize, Serialize};

use crate::client::{DApiClient, Query};
use crate::error::DApiResult;

const BASE: &str = "/api/v1/media";

/// Options for [`Media::download`]. The fields mirror the media descriptor
/// delivered with a message (URL or direct path, decryption key, checksums).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadMediaOptions {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_path: Option<String>,
    pub media_key: String,
    pub mimetype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_enc_sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_length: Option<u64>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
    /// Return the payload inline as base64 instead of uploading to S3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<bool>,
}

/// Response to a media download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDownloadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(rename = "fileName", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Media operations.
#[derive(Debug, Clone)]
pub struct Media {
    client: DApiClient,
}

impl Media {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    /// Download media (image, video, audio, document) using its descriptor.
    /// With `base64` set, the data comes back inline; otherwise the server
    /// uploads to S3 and returns `media_url`.
    pub async fn download(&self, options: &DownloadMediaOptions) -> DApiResult<MediaDownloadResponse> {
        self.client
            .post(
                &format!("{BASE}/download"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }
}
