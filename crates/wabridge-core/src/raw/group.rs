// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group membership and metadata events.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::jid::Jid;

/// Full metadata snapshot of a group, as delivered when joining it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupSnapshot {
    #[serde(rename = "JID")]
    pub jid: Jid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_announce: bool,
    #[serde(default)]
    pub is_parent: bool,
    #[serde(rename = "LinkedParentJID", default, deserialize_with = "crate::jid::empty_as_none")]
    pub linked_parent_jid: Option<Jid>,
    #[serde(default)]
    pub is_default_sub_group: bool,
    #[serde(default)]
    pub is_join_approval_required: bool,
    #[serde(default, deserialize_with = "crate::raw::time::zero_as_none")]
    pub group_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub participants: Vec<SnapshotParticipant>,
    #[serde(default)]
    pub member_add_mode: MemberAddMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotParticipant {
    #[serde(rename = "JID")]
    pub jid: Jid,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_super_admin: bool,
}

/// Who may add members to a group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum MemberAddMode {
    Admin,
    #[default]
    AllMembers,
}

impl From<String> for MemberAddMode {
    fn from(value: String) -> Self {
        if value == "admin_add" {
            Self::Admin
        } else {
            Self::AllMembers
        }
    }
}

/// The account joined, or was added to, a group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JoinedGroupEvent {
    #[serde(default)]
    pub reason: String,
    #[serde(flatten)]
    pub group: GroupSnapshot,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupName {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupTopic {
    pub topic: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupLocked {
    pub is_locked: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupAnnounce {
    pub is_announce: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupMembershipApprovalMode {
    pub is_join_approval_required: bool,
}

/// A change to group metadata or membership. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupInfoEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    #[serde(default, deserialize_with = "crate::jid::empty_as_none")]
    pub sender: Option<Jid>,
    pub timestamp: DateTime<Utc>,
    pub name: Option<GroupName>,
    pub topic: Option<GroupTopic>,
    pub locked: Option<GroupLocked>,
    pub announce: Option<GroupAnnounce>,
    pub membership_approval_mode: Option<GroupMembershipApprovalMode>,
    pub new_invite_link: Option<String>,
    #[serde(default)]
    pub join: Vec<Jid>,
    #[serde(default)]
    pub leave: Vec<Jid>,
    #[serde(default)]
    pub promote: Vec<Jid>,
    #[serde(default)]
    pub demote: Vec<Jid>,
}

/// A user's or group's profile picture changed or was removed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PictureEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    #[serde(default, deserialize_with = "crate::jid::empty_as_none")]
    pub author: Option<Jid>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub remove: bool,
    #[serde(rename = "PictureID", default)]
    pub picture_id: String,
}
