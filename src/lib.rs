//! # dapi-client — D-API WhatsApp Platform Client
//!
//! Typed async client for the D-API messaging platform.
//!
//! ## Capabilities
//!
//! - **Sessions** – create, pair (QR or pairing code), inspect, reconfigure
//!   (webhooks, RabbitMQ, ignore/call settings), and tear down sessions
//! - **Messaging** – text, image, video, audio, document, sticker, location,
//!   contact, poll, reaction, album, and message edits
//! - **Interactive** – list messages, carousels, CTA templates, native-flow
//!   buttons, PIX payment prompts
//! - **Groups** – create, participants, invites, settings, join requests
//! - **Chats** – listings with search/sort/pagination, message history,
//!   presence, read receipts, message deletion
//! - **Contacts** – address book, lookups, avatars, number verification,
//!   blocklist
//! - **Labels** – sync, upsert, attach/detach, listings
//! - **Media** – download media referenced by messages
//! - **History** – full and on-demand history sync
//! - **Integrations** – S3 storage targets, RabbitMQ connection tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dapi_client::{DApi, DApiConfig, SendTextOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dapi = DApi::new(&DApiConfig::new("your-api-key"))?;
//!
//!     let response = dapi
//!         .messages()
//!         .send_text(&SendTextOptions {
//!             session_id: "my-session".to_string(),
//!             to: "5511999999999".to_string(),
//!             text: "Hello from Rust!".to_string(),
//!             context_info: None,
//!             mention_all: None,
//!             run_async: None,
//!         })
//!         .await?;
//!     println!("sent: {:?}", response.message_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! Errors reported by the API over HTTP are normalized into
//! [`DApiError::Api`] (and timeouts into [`DApiError::Timeout`], status 408);
//! network-level failures pass through unchanged as [`DApiError::Http`].

pub mod api;
pub mod chats;
pub mod client;
pub mod contacts;
pub mod error;
pub mod groups;
pub mod history;
pub mod integrations;
pub mod interactive;
pub mod labels;
pub mod media;
pub mod messages;
pub mod sessions;
pub mod types;

// Re-exports
pub use api::{ApiInfo, DApi, Health};
pub use chats::*;
pub use client::{DApiClient, DApiConfig, Query, QueryValue, RequestOptions, ResponseBody};
pub use contacts::*;
pub use error::{DApiError, DApiResult};
pub use groups::*;
pub use history::*;
pub use integrations::*;
pub use interactive::*;
pub use labels::*;
pub use media::*;
pub use messages::*;
pub use sessions::*;
pub use types::*;
