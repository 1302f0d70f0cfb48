// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Receipts, online presence, and typing/recording indicators.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::jid::Jid;

/// Where a message or chat-scoped event originated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageSource {
    pub chat: Jid,
    pub sender: Jid,
    #[serde(default)]
    pub is_from_me: bool,
    #[serde(default)]
    pub is_group: bool,
}

/// Receipt type as sent by the server. The empty string means "delivered".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ReceiptType {
    Delivered,
    Sender,
    Retry,
    Read,
    ReadSelf,
    Played,
    PlayedSelf,
    ServerError,
    Inactive,
    PeerMsg,
    HistorySync,
    Other(String),
}

impl From<String> for ReceiptType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Self::Delivered,
            "sender" => Self::Sender,
            "retry" => Self::Retry,
            "read" => Self::Read,
            "read-self" => Self::ReadSelf,
            "played" => Self::Played,
            "played-self" => Self::PlayedSelf,
            "server-error" => Self::ServerError,
            "inactive" => Self::Inactive,
            "peer_msg" => Self::PeerMsg,
            "hist_sync" => Self::HistorySync,
            _ => Self::Other(value),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptEvent {
    #[serde(flatten)]
    pub source: MessageSource,
    #[serde(rename = "MessageIDs", default)]
    pub message_ids: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Type", default = "delivered")]
    pub receipt_type: ReceiptType,
}

fn delivered() -> ReceiptType {
    ReceiptType::Delivered
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatPresenceState {
    Composing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ChatPresenceMedia {
    #[default]
    #[serde(rename = "")]
    Text,
    #[serde(rename = "audio")]
    Audio,
}

/// Typing or recording indicator inside a chat.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChatPresenceEvent {
    #[serde(flatten)]
    pub source: MessageSource,
    pub state: ChatPresenceState,
    #[serde(default)]
    pub media: ChatPresenceMedia,
}

/// Online/offline presence of a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PresenceEvent {
    pub from: Jid,
    #[serde(default)]
    pub unavailable: bool,
    #[serde(default, deserialize_with = "crate::raw::time::zero_as_none")]
    pub last_seen: Option<DateTime<Utc>>,
}
