//! Group management — creation, participants, invites, settings, and join
//! requests.

use log::info;
use serde::{Deserialize, Serialize};

use crate::client::{encode_segment, DApiClient, Query};
use crate::error::DApiResult;
use crate::types::ApiResponse;

const BASE: &str = "/api/v1/groups";

/// Disappearing-messages timer values accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisappearingMessagesTimer {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "off")]
    Off,
}

/// Participant operation for [`Groups::manage_participants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantAction {
    Add,
    Remove,
    Promote,
    Demote,
}

/// Who may add members to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberAddMode {
    All,
    Admin,
}

/// A group member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupParticipant {
    pub jid: String,
    pub is_admin: bool,
    pub is_super_admin: bool,
}

/// A group as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<GroupParticipant>>,
    /// Only admins may send messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announce: Option<bool>,
    /// Only admins may edit group info.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ephemeral_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_add_mode: Option<MemberAddMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_approval_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
}

/// Options for [`Groups::list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGroupsOptions {
    pub session_id: String,
    /// Include the participant list of every group (slower).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Groups::get_info`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGroupInfoOptions {
    pub session_id: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Groups::create`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupOptions {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub name: String,
    pub participants: Vec<String>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_only_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_settings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_add_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Group picture, base64 or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disappearing_messages: Option<DisappearingMessagesTimer>,
}

/// Options for [`Groups::manage_participants`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageParticipantsOptions {
    pub session_id: String,
    pub participants: Vec<String>,
    pub action: ParticipantAction,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Groups::join`], [`Groups::leave`], and
/// [`Groups::revoke_invite_link`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinLeaveGroupOptions {
    pub session_id: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Groups::set_description`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetGroupDescriptionOptions {
    pub session_id: String,
    pub description: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Groups::set_name`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetGroupNameOptions {
    pub session_id: String,
    pub name: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Groups::set_picture`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetGroupPictureOptions {
    pub session_id: String,
    /// New picture, base64 or URL.
    pub photo: String,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Groups::set_settings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetGroupSettingsOptions {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announce: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_add_mode: Option<MemberAddMode>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Options for [`Groups::approve_join_requests`] and
/// [`Groups::reject_join_requests`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRejectRequestsOptions {
    pub session_id: String,
    pub participants: Vec<String>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub run_async: Option<String>,
}

/// Response to group creation and invite-link calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
}

/// Group management operations.
#[derive(Debug, Clone)]
pub struct Groups {
    client: DApiClient,
}

impl Groups {
    pub fn new(client: DApiClient) -> Self {
        Self { client }
    }

    /// List all groups for a session.
    pub async fn list(&self, options: &ListGroupsOptions) -> DApiResult<Vec<Group>> {
        // `participants` travels only when set true.
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set_opt(
                "participants",
                options.participants.filter(|&p| p).map(|_| "true"),
            )
            .set_opt("timeout", options.timeout)
            .set_opt("async", options.run_async.as_deref());
        self.client.get(&format!("{BASE}/list"), query).await
    }

    /// Get detailed information about a group.
    pub async fn get_info(&self, group_id: &str, options: &GetGroupInfoOptions) -> DApiResult<Group> {
        let query = Query::new()
            .set("sessionId", options.session_id.as_str())
            .set_opt("async", options.run_async.as_deref());
        self.client
            .get(&format!("{BASE}/{}/info", encode_segment(group_id)), query)
            .await
    }

    /// Create a new group with participants and optional settings.
    pub async fn create(&self, options: &CreateGroupOptions) -> DApiResult<GroupResponse> {
        let response: GroupResponse = self
            .client
            .post(
                &format!("{BASE}/create"),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await?;
        info!(
            "Created group '{}' -> {}",
            options.name,
            response.group_id.as_deref().unwrap_or("?")
        );
        Ok(response)
    }

    /// Add, remove, promote, or demote participants.
    pub async fn manage_participants(
        &self,
        group_id: &str,
        options: &ManageParticipantsOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/participants", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Join a group by its id.
    pub async fn join(
        &self,
        group_id: &str,
        options: &JoinLeaveGroupOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/join", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Leave a group.
    pub async fn leave(
        &self,
        group_id: &str,
        options: &JoinLeaveGroupOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/leave", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Get the group invite link.
    pub async fn get_invite_link(
        &self,
        group_id: &str,
        session_id: &str,
        run_async: Option<&str>,
    ) -> DApiResult<GroupResponse> {
        let query = Query::new()
            .set("sessionId", session_id)
            .set_opt("async", run_async);
        self.client
            .get(&format!("{BASE}/{}/invite", encode_segment(group_id)), query)
            .await
    }

    /// Revoke the current invite link, generating a new one.
    pub async fn revoke_invite_link(
        &self,
        group_id: &str,
        options: &JoinLeaveGroupOptions,
    ) -> DApiResult<GroupResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/invite/revoke", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Set the group description/topic.
    pub async fn set_description(
        &self,
        group_id: &str,
        options: &SetGroupDescriptionOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .put(
                &format!("{BASE}/{}/description", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
            )
            .await
    }

    /// Set the group name (subject).
    pub async fn set_name(
        &self,
        group_id: &str,
        options: &SetGroupNameOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .put(
                &format!("{BASE}/{}/name", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
            )
            .await
    }

    /// Set the group profile picture.
    pub async fn set_picture(
        &self,
        group_id: &str,
        options: &SetGroupPictureOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .put(
                &format!("{BASE}/{}/profile-picture", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
            )
            .await
    }

    /// Set group privacy settings (announce, locked, join approval, member
    /// add mode).
    pub async fn set_settings(
        &self,
        group_id: &str,
        options: &SetGroupSettingsOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .put(
                &format!("{BASE}/{}/settings", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
            )
            .await
    }

    /// Approve pending join requests.
    pub async fn approve_join_requests(
        &self,
        group_id: &str,
        options: &ApproveRejectRequestsOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/join-requests/approve", encode_segment(group_id)),
                Some(serde_json::to_value(options)?),
                Query::new(),
            )
            .await
    }

    /// Reject pending join requests.
    pub async fn reject_join_requests(
        &self,
        group_id: &str,
        options: &ApproveRejectRequestsOptions,
    ) -> DApiResult<ApiResponse> {
        self.client
            .post(
                &format!("{BASE}/{}/join-requests/reject", encode_segment(group_id)),
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
    fn test_disappearing_timer_wire_values() {
        assert_eq!(
            serde_json::to_value(DisappearingMessagesTimer::Day).unwrap(),
            json!("24h")
        );
        assert_eq!(
            serde_json::to_value(DisappearingMessagesTimer::Quarter).unwrap(),
            json!("90d")
        );
        assert_eq!(
            serde_json::to_value(DisappearingMessagesTimer::Off).unwrap(),
            json!("off")
        );
    }

    #[test]
    fn test_create_group_options_keep_snake_case_flags() {
        let options = CreateGroupOptions {
            session_id: "s1".to_string(),
            name: "Team".to_string(),
            participants: vec!["5511999999999".to_string()],
            run_async: None,
            admin_only_messages: Some(true),
            lock_settings: None,
            admin_approval: None,
            admin_add_only: None,
            description: None,
            picture: None,
            disappearing_messages: Some(DisappearingMessagesTimer::Week),
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "sessionId": "s1",
                "name": "Team",
                "participants": ["5511999999999"],
                "admin_only_messages": true,
                "disappearing_messages": "7d",
            })
        );
    }

    #[test]
    fn test_participant_action_values() {
        assert_eq!(
            serde_json::to_value(ParticipantAction::Promote).unwrap(),
            json!("promote")
        );
    }
}
