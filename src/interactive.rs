//! Interactive content — list messages, carousels, CTA templates, native
//! flow buttons, and PIX payment prompts.

use serde::{Deserialize, Serialize};

use crate::client::{DApiClient, Query};
use crate::error::DApiResult;

const BASE: &str = "/api/v1/interactive";

/// One selectable row of a list message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub row_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A titled section of list rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub rows: Vec<ListRow>,
}

/// Options for [`Interactive::send_list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendListOptions {
    pub session_id: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    pub button_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    pub sections: Vec<ListSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
}

/// Button kind on a carousel card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselButtonType {
    QuickReply,
    Url,
    Call,
}

/// A button on a carousel card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselButton {
    #[serde(rename = "type")]
    pub button_type: CarouselButtonType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Media header of a carousel card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselCardHeader {
    #[serde(rename = "type")]
    pub header_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub media: String,
}

/// One card of a carousel (max 10 cards, 2 buttons per card).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CarouselCardHeader>,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<CarouselButton>>,
}

/// Options for [`Interactive::send_carousel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCarouselOptions {
    pub session_id: String,
    pub to: String,
    pub cards: Vec<CarouselCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
}

/// Button kind on a CTA template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateButtonType {
    Url,
    Call,
}

/// A CTA button on a template message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateButton {
    #[serde(rename = "type")]
    pub button_type: TemplateButtonType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Options for [`Interactive::send_template`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTemplateOptions {
    pub session_id: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub buttons: Vec<TemplateButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
}

/// Button kind on a native-flow message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeFlowButtonType {
    QuickReply,
    Url,
    Call,
    Copy,
}

/// A button on a native-flow message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeFlowButton {
    #[serde(rename = "type")]
    pub button_type: NativeFlowButtonType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "copy_code", skip_serializing_if = "Option::is_none")]
    pub copy_code: Option<String>,
}

/// Options for [`Interactive::send_native_flow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNativeFlowOptions {
    pub session_id: String,
    pub to: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub buttons: Vec<NativeFlowButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
}

/// Options for [`Interactive::send_pix`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPixOptions {
    pub session_id: String,
    pub to: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub pix_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_all: Option<bool>,
}

/// Response to an interactive send.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Interactive messaging operations.
#[derive(Debug, Clone)]
pub struct Interactive {
    client: DApiClient,
}

impl Interactive {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    async fn send(&self, kind: &str, body: serde_json::Value) -> DApiResult<InteractiveResponse> {
        self.client
            .post(&format!("{BASE}/send/{kind}"), Some(body), Query::new())
            .await
    }

    /// Send an interactive list message.
    pub async fn send_list(&self, options: &SendListOptions) -> DApiResult<InteractiveResponse> {
        self.send("list", serde_json::to_value(options)?).await
    }

    /// Send a carousel of cards.
    pub async fn send_carousel(
        &self,
        options: &SendCarouselOptions,
    ) -> DApiResult<InteractiveResponse> {
        self.send("carousel", serde_json::to_value(options)?).await
    }

    /// Send a template message with URL/call CTA buttons.
    pub async fn send_template(
        &self,
        options: &SendTemplateOptions,
    ) -> DApiResult<InteractiveResponse> {
        self.send("template", serde_json::to_value(options)?).await
    }

    /// Send a native-flow message with interactive buttons (mobile only).
    pub async fn send_native_flow(
        &self,
        options: &SendNativeFlowOptions,
    ) -> DApiResult<InteractiveResponse> {
        self.send("nativeflow", serde_json::to_value(options)?).await
    }

    /// Send a message with a PIX copy button.
    pub async fn send_pix(&self, options: &SendPixOptions) -> DApiResult<InteractiveResponse> {
        self.send("pix", serde_json::to_value(options)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_button_type_wire_values() {
        assert_eq!(
            serde_json::to_value(CarouselButtonType::QuickReply).unwrap(),
            json!("quick_reply")
        );
        assert_eq!(
            serde_json::to_value(NativeFlowButtonType::Copy).unwrap(),
            json!("copy")
        );
        assert_eq!(
            serde_json::to_value(TemplateButtonType::Call).unwrap(),
            json!("call")
        );
    }

    #[test]
    fn test_native_flow_button_copy_code_field() {
        let button = NativeFlowButton {
            button_type: NativeFlowButtonType::Copy,
            title: "Copy code".to_string(),
            id: None,
            url: None,
            phone: None,
            copy_code: Some("ABC-123".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&button).unwrap(),
            json!({ "type": "copy", "title": "Copy code", "copy_code": "ABC-123" })
        );
    }

    #[test]
    fn test_send_list_options_shape() {
        let options = SendListOptions {
            session_id: "s1".to_string(),
            to: "5511999999999".to_string(),
            title: None,
            description: "Pick one".to_string(),
            button_text: "Open".to_string(),
            footer_text: None,
            sections: vec![ListSection {
                title: Some("Fruits".to_string()),
                rows: vec![ListRow {
                    row_id: "r1".to_string(),
                    title: "Apple".to_string(),
                    description: None,
                }],
            }],
            mention_all: None,
        };
        let value = serde_json::to_value(&options).unwrap();

        assert_eq!(value["buttonText"], json!("Open"));
        assert_eq!(value["sections"][0]["rows"][0]["rowId"], json!("r1"));
        assert!(value.get("footerText").is_none());
    }
}
