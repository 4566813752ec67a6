//! Chat management — listings, message history, presence, read receipts,
//! and message deletion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{encode_segment, DApiClient, Query};
use crate::error::DApiResult;
use crate::types::{PaginatedResponse, SortOrder};

const BASE: &str = "/api/v1/chats";

/// Sort key for chat listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSortField {
    Id,
    LastMessageTimestamp,
    ChatName,
    UnreadCount,
    CreatedAt,
    UpdatedAt,
}

impl ChatSortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::LastMessageTimestamp => "last_message_timestamp",
            Self::ChatName => "chat_name",
            Self::UnreadCount => "unread_count",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Sort key for message listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSortField {
    Timestamp,
    Id,
}

impl MessageSortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Id => "id",
        }
    }
}

/// Presence state broadcast to a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceType {
    Available,
    Unavailable,
    Typing,
    Recording,
    Paused,
}

/// A chat as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub jid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub is_group: bool,
    pub unread_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute_expiration: Option<u64>,
}

/// A reaction aggregate on a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReaction {
    pub key: String,
    pub count: u64,
    pub users: Vec<String>,
}

/// A stored chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub message_id: String,
    pub chat_id: String,
    pub from_me: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_message: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_forwarded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentioned_jids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<MessageReaction>>,
}

/// Options for [`Chats::list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListChatsOptions {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<ChatSortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Include chats with no stored messages.
    #[serde(rename = "includeEmpty", skip_serializing_if = "Option::is_none")]
    pub include_empty: Option<bool>,
}

/// Options for [`Chats::list_messages`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesOptions {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<MessageSortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Options for [`Chats::send_presence`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPresenceOptions {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub presence: PresenceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Chats::mark_as_read`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAsReadOptions {
    pub session_id: String,
    pub to: String,
    pub message_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Chats::delete_message`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageOptions {
    pub session_id: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_everyone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Response to chat state operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Chat operations.
#[derive(Debug, Clone)]
pub struct Chats {
    client: DApiClient,
}

impl Chats {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    /// List chats with optional search, sorting, and pagination.
    pub async fn list(&self, options: &ListChatsOptions) -> DApiResult<PaginatedResponse<Chat>> {
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set_opt("search", options.search.as_deref())
            .set_opt("sort_field", options.sort_field.map(ChatSortField::as_str))
            .set_opt("sort_order", options.sort_order.map(SortOrder::as_str))
            .set_opt("limit", options.limit)
            .set_opt("page", options.page)
            .set_opt("includeEmpty", options.include_empty);
        self.client.get(&format!("{BASE}/"), query).await
    }

    /// Get details of a specific chat.
    pub async fn get(&self, chat_id: &str, session_id: &str) -> DApiResult<Chat> {
        let query = Query::new().set("sessionId", session_id);
        self.client
            .get(&format!("{BASE}/{}", encode_segment(chat_id)), query)
            .await
    }

    /// List messages in a chat with optional search, sorting, and pagination.
    pub async fn list_messages(
        &self,
        chat_id: &str,
        options: &ListMessagesOptions,
    ) -> DApiResult<PaginatedResponse<ChatMessage>> {
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set_opt("search", options.search.as_deref())
            .set_opt("sort_field", options.sort_field.map(MessageSortField::as_str))
            .set_opt("sort_order", options.sort_order.map(SortOrder::as_str))
            .set_opt("limit", options.limit)
            .set_opt("page", options.page);
        self.client
            .get(&format!("{BASE}/{}/messages", encode_segment(chat_id)), query)
            .await
    }

    /// Broadcast presence (available, typing, recording, ...).
    pub async fn send_presence(&self, options: &SendPresenceOptions) -> DApiResult<ChatResponse> {
        self.client
            .post(
                &format!("{BASE}/presence"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Mark messages as read.
    pub async fn mark_as_read(&self, options: &MarkAsReadOptions) -> DApiResult<ChatResponse> {
        self.client
            .post(
                &format!("{BASE}/read"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Delete a message, optionally for everyone.
    pub async fn delete_message(
        &self,
        message_id: &str,
        options: &DeleteMessageOptions,
    ) -> DApiResult<ChatResponse> {
        self.client
            .delete(
                &format!("{BASE}/messages/{}", encode_segment(message_id)),
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
    fn test_sort_field_strings() {
        assert_eq!(ChatSortField::LastMessageTimestamp.as_str(), "last_message_timestamp");
        assert_eq!(ChatSortField::UnreadCount.as_str(), "unread_count");
        assert_eq!(MessageSortField::Timestamp.as_str(), "timestamp");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
    }

    #[test]
    fn test_presence_wire_values() {
        assert_eq!(
            serde_json::to_value(PresenceType::Recording).unwrap(),
            json!("recording")
        );
    }

    #[test]
    fn test_delete_message_options_shape() {
        let options = DeleteMessageOptions {
            session_id: "s1".to_string(),
            to: "5511999999999".to_string(),
            for_everyone: Some(true),
            sender: None,
            run_async: None,
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({ "sessionId": "s1", "to": "5511999999999", "forEveryone": true })
        );
    }

    #[test]
    fn test_chat_message_type_field() {
        let value = json!({
            "id": "1",
            "messageId": "M1",
            "chatId": "C1",
            "fromMe": false,
            "timestamp": 1700000000,
            "type": "text",
            "content": "hi",
        });
        let message: ChatMessage = serde_json::from_value(value).unwrap();

        assert_eq!(message.message_type, "text");
        assert_eq!(message.content.as_deref(), Some("hi"));
    }
}
