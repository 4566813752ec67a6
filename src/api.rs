//! Top-level D-API entry point aggregating all resource modules.

use serde::{Deserialize, Serialize};

use crate::chats::Chats;
use crate::client::{DApiClient, DApiConfig, Query};
use crate::contacts::Contacts;
use crate::error::DApiResult;
use crate::groups::Groups;
use crate::history::History;
use crate::integrations::Integrations;
use crate::interactive::Interactive;
use crate::labels::Labels;
use crate::media::Media;
use crate::messages::Messages;
use crate::sessions::Sessions;

/// API health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

/// API identity and version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub version: String,
    pub name: String,
}

/// The D-API client facade.
///
/// Owns one transport and exposes the ten resource modules through
/// accessors; every module shares the same underlying connection pool. All
/// modules are constructed eagerly, so construction fails exactly when the
/// transport configuration is invalid.
#[derive(Debug, Clone)]
pub struct DApi {
    client: DApiClient,
    sessions: Sessions,
    messages: Messages,
    interactive: Interactive,
    groups: Groups,
    chats: Chats,
    contacts: Contacts,
    labels: Labels,
    media: Media,
    history: History,
    integrations: Integrations,
}

impl DApi {
    /// Build the facade from a configuration.
    pub fn new(config: &DApiConfig) -> DApiResult<Self> {
        let client = DApiClient::new(config)?;

        Ok(Self {
            sessions: Sessions::new(client.clone()),
            messages: Messages::new(client.clone()),
            interactive: Interactive::new(client.clone()),
            groups: Groups::new(client.clone()),
            chats: Chats::new(client.clone()),
            contacts: Contacts::new(client.clone()),
            labels: Labels::new(client.clone()),
            media: Media::new(client.clone()),
            history: History::new(client.clone()),
            integrations: Integrations::new(client.clone()),
            client,
        })
    }

    /// Session management.
    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    /// Message sending.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Interactive content (lists, carousels, templates, PIX).
    pub fn interactive(&self) -> &Interactive {
        &self.interactive
    }

    /// Group management.
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Chats and stored messages.
    pub fn chats(&self) -> &Chats {
        &self.chats
    }

    /// Contacts and blocklist.
    pub fn contacts(&self) -> &Contacts {
        &self.contacts
    }

    /// Labels.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Media download.
    pub fn media(&self) -> &Media {
        &self.media
    }

    /// History sync.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// S3/RabbitMQ integrations.
    pub fn integrations(&self) -> &Integrations {
        &self.integrations
    }

    /// Get the API health status.
    pub async fn get_health(&self) -> DApiResult<Health> {
        self.client.get("/health", Query::new()).await
    }

    /// Get the API name and version.
    pub async fn get_info(&self) -> DApiResult<ApiInfo> {
        self.client.get("/", Query::new()).await
    }
}
