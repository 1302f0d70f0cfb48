// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! App-state sync events: per-chat settings changed on another device.
//!
//! The outer event structs use the transport's PascalCase field names; the
//! embedded sync actions are protobuf payloads with camelCase names.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::jid::Jid;

/// A contact entry in the address book changed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    pub timestamp: DateTime<Utc>,
    pub action: Option<ContactAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAction {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
}

/// A user changed their push name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PushNameEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    #[serde(default)]
    pub old_push_name: String,
    pub new_push_name: String,
}

/// A business account changed its verified name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessNameEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    #[serde(default)]
    pub old_business_name: String,
    pub new_business_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PinEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    pub timestamp: DateTime<Utc>,
    pub action: Option<PinAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinAction {
    pub pinned: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MuteEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    pub timestamp: DateTime<Utc>,
    pub action: Option<MuteAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteAction {
    pub muted: Option<bool>,
    pub mute_end_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArchiveEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    pub timestamp: DateTime<Utc>,
    pub action: Option<ArchiveAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveAction {
    pub archived: Option<bool>,
}

/// Status updates from a contact were muted or unmuted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserStatusMuteEvent {
    #[serde(rename = "JID")]
    pub jid: Jid,
    pub timestamp: DateTime<Utc>,
    pub action: Option<UserStatusMuteAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusMuteAction {
    pub muted: Option<bool>,
}

/// A message was starred or unstarred.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StarEvent {
    #[serde(rename = "ChatJID")]
    pub chat_jid: Jid,
    #[serde(rename = "SenderJID", default, deserialize_with = "crate::jid::empty_as_none")]
    pub sender_jid: Option<Jid>,
    #[serde(default)]
    pub is_from_me: bool,
    #[serde(rename = "MessageID")]
    pub message_id: String,
    pub timestamp: DateTime<Utc>,
    pub action: Option<StarAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarAction {
    pub starred: Option<bool>,
}

/// A message was deleted on this account only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteForMeEvent {
    #[serde(rename = "ChatJID")]
    pub chat_jid: Jid,
    #[serde(rename = "SenderJID", default, deserialize_with = "crate::jid::empty_as_none")]
    pub sender_jid: Option<Jid>,
    #[serde(default)]
    pub is_from_me: bool,
    #[serde(rename = "MessageID")]
    pub message_id: String,
    pub timestamp: DateTime<Utc>,
    pub action: Option<DeleteForMeAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteForMeAction {
    pub delete_media: Option<bool>,
    pub message_timestamp: Option<i64>,
}

/// The account's own display name changed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PushNameSettingEvent {
    pub timestamp: DateTime<Utc>,
    pub action: Option<PushNameSettingAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNameSettingAction {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppStateSyncCompleteEvent {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OfflineSyncPreviewEvent {
    pub total: u64,
    pub app_data_changes: u64,
    pub messages: u64,
    pub notifications: u64,
    pub receipts: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OfflineSyncCompletedEvent {
    pub count: u64,
}
