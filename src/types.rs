//! Shared wire types used across resource modules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Context of a message being replied to or quoted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stanza_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentioned_jid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_message: Option<Value>,
    /// Any further context fields, passed through untouched.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Generic response envelope returned by many endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

/// Page descriptor attached to paginated listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Sort direction for listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_info_keeps_unknown_fields() {
        let value = json!({
            "stanzaId": "ABCD",
            "participant": "5511999999999@s.whatsapp.net",
            "ephemeralSettingTimestamp": 1700000000,
        });
        let info: ContextInfo = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(info.stanza_id.as_deref(), Some("ABCD"));
        assert_eq!(
            info.extra.get("ephemeralSettingTimestamp"),
            Some(&json!(1700000000))
        );
        assert_eq!(serde_json::to_value(&info).unwrap(), value);
    }

    #[test]
    fn test_paginated_response_shape() {
        let value = json!({
            "data": [{"id": "c1"}],
            "pagination": {"page": 1, "limit": 25, "total": 1, "totalPages": 1},
        });
        let page: PaginatedResponse<Value> = serde_json::from_value(value).unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.pagination.total_pages, 1);
    }
}
