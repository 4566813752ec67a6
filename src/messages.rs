//! Outbound messaging — text, media, locations, contacts, polls, reactions,
//! albums, and message edits.

use serde::{Deserialize, Serialize};

use crate::client::{encode_segment, DApiClient, Query};
use crate::error::DApiResult;
use crate::types::ContextInfo;

const BASE: &str = "/api/v1/messages";

/// Options for [`Messages::send_text`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTextOptions {
    pub session_id: String,
    pub to: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_image`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendImageOptions {
    pub session_id: String,
    pub to: String,
    /// Image URL or base64 payload.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_video`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVideoOptions {
    pub session_id: String,
    pub to: String,
    pub video: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Send as a round video note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ptv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_playback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_audio`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAudioOptions {
    pub session_id: String,
    pub to: String,
    pub audio: String,
    /// Send as a push-to-talk voice note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ptt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDocumentOptions {
    pub session_id: String,
    pub to: String,
    pub document: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_sticker`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendStickerOptions {
    pub session_id: String,
    pub to: String,
    pub sticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_location`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendLocationOptions {
    pub session_id: String,
    pub to: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_contact`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendContactOptions {
    pub session_id: String,
    pub to: String,
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_poll`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPollOptions {
    pub session_id: String,
    pub to: String,
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_answers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::send_reaction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReactionOptions {
    pub session_id: String,
    pub to: String,
    pub message_id: String,
    /// Reaction emoji; an empty string removes the reaction.
    pub emoji: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Media kind of an album entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumMediaType {
    Image,
    Video,
}

/// One entry of an album message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumMediaItem {
    #[serde(rename = "type")]
    pub media_type: AlbumMediaType,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Options for [`Messages::send_album`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAlbumOptions {
    pub session_id: String,
    pub to: String,
    pub media: Vec<AlbumMediaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Messages::edit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageOptions {
    pub session_id: String,
    pub to: String,
    pub text: String,
}

/// Response to a send operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Message sending operations.
#[derive(Debug, Clone)]
pub struct Messages {
    client: DApiClient,
}

impl Messages {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    async fn send(&self, kind: &str, body: serde_json::Value) -> DApiResult<MessageResponse> {
        self.client
            .post(&format!("{BASE}/send/{kind}"), Some(body), Query::new())
            .await
    }

    /// Send a text message.
    pub async fn send_text(&self, options: &SendTextOptions) -> DApiResult<MessageResponse> {
        self.send("text", serde_json::to_value(options)?).await
    }

    /// Send an image with an optional caption.
    pub async fn send_image(&self, options: &SendImageOptions) -> DApiResult<MessageResponse> {
        self.send("image", serde_json::to_value(options)?).await
    }

    /// Send a video with optional caption, video note (ptv), or GIF playback.
    pub async fn send_video(&self, options: &SendVideoOptions) -> DApiResult<MessageResponse> {
        self.send("video", serde_json::to_value(options)?).await
    }

    /// Send an audio message or voice note (ptt).
    pub async fn send_audio(&self, options: &SendAudioOptions) -> DApiResult<MessageResponse> {
        self.send("audio", serde_json::to_value(options)?).await
    }

    /// Send a document (PDF, DOC, ...).
    pub async fn send_document(&self, options: &SendDocumentOptions) -> DApiResult<MessageResponse> {
        self.send("document", serde_json::to_value(options)?).await
    }

    /// Send a sticker.
    pub async fn send_sticker(&self, options: &SendStickerOptions) -> DApiResult<MessageResponse> {
        self.send("sticker", serde_json::to_value(options)?).await
    }

    /// Send a location with GPS coordinates.
    pub async fn send_location(&self, options: &SendLocationOptions) -> DApiResult<MessageResponse> {
        self.send("location", serde_json::to_value(options)?).await
    }

    /// Send a contact card.
    pub async fn send_contact(&self, options: &SendContactOptions) -> DApiResult<MessageResponse> {
        self.send("contact", serde_json::to_value(options)?).await
    }

    /// Send a poll.
    pub async fn send_poll(&self, options: &SendPollOptions) -> DApiResult<MessageResponse> {
        self.send("poll", serde_json::to_value(options)?).await
    }

    /// React to a message with an emoji.
    pub async fn send_reaction(&self, options: &SendReactionOptions) -> DApiResult<MessageResponse> {
        self.send("reaction", serde_json::to_value(options)?).await
    }

    /// Send an album of images and videos.
    pub async fn send_album(&self, options: &SendAlbumOptions) -> DApiResult<MessageResponse> {
        self.send("album", serde_json::to_value(options)?).await
    }

    /// Edit the text of a previously sent message.
    pub async fn edit(
        &self,
        message_id: &str,
        options: &EditMessageOptions,
    ) -> DApiResult<MessageResponse> {
        self.client
            .put(
                &format!("{BASE}/{}", encode_segment(message_id)),
                Some(serde_json::to_value(options)?),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_text_options_minimal_body() {
        let options = SendTextOptions {
            session_id: "s1".to_string(),
            to: "5511999999999".to_string(),
            text: "hello".to_string(),
            context_info: None,
            mention_all: None,
            run_async: None,
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({ "sessionId": "s1", "to": "5511999999999", "text": "hello" })
        );
    }

    #[test]
    fn test_run_async_serializes_as_async() {
        let options = SendReactionOptions {
            session_id: "s1".to_string(),
            to: "5511999999999".to_string(),
            message_id: "MSG1".to_string(),
            emoji: "\u{1F44D}".to_string(),
            run_async: Some("true".to_string()),
        };
        let value = serde_json::to_value(&options).unwrap();

        assert_eq!(value["async"], json!("true"));
        assert!(value.get("runAsync").is_none());
    }

    #[test]
    fn test_album_item_type_field() {
        let item = AlbumMediaItem {
            media_type: AlbumMediaType::Video,
            url: "https://cdn.test/v.mp4".to_string(),
            caption: None,
        };

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({ "type": "video", "url": "https://cdn.test/v.mp4" })
        );
    }
}
