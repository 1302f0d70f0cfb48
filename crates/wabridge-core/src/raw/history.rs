// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History sync: a one-time bundle of prior conversations and their messages.

use serde::Deserialize;

use crate::raw::message::WebMessageInfo;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistorySyncEvent {
    pub data: HistorySync,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySync {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// One chat or group with its stored messages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(default)]
    pub messages: Vec<HistorySyncMessage>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub archived: Option<bool>,
    /// Pin timestamp; zero means not pinned.
    pub pinned: Option<u32>,
    /// Unix seconds; zero means not muted.
    pub mute_end_time: Option<u64>,
    pub description: Option<String>,
    pub locked: Option<bool>,
    pub is_parent_group: Option<bool>,
    #[serde(rename = "parentGroupID")]
    pub parent_group_id: Option<String>,
    pub is_default_subgroup: Option<bool>,
    #[serde(default)]
    pub participant: Vec<HistoryParticipant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySyncMessage {
    pub message: Option<WebMessageInfo>,
    #[serde(rename = "msgOrderID")]
    pub msg_order_id: Option<u64>,
}

/// Participant rank codes in history sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i32")]
pub enum HistoryRank {
    Regular,
    Admin,
    SuperAdmin,
    Unrecognized(i32),
}

impl From<i32> for HistoryRank {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Regular,
            1 => Self::Admin,
            2 => Self::SuperAdmin,
            other => Self::Unrecognized(other),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParticipant {
    #[serde(rename = "userJID", default)]
    pub user_jid: String,
    pub rank: Option<HistoryRank>,
}
