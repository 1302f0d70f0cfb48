// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records handed to the consumer.
//!
//! Every record is a partial update: an unset field means "this event carried
//! no information about it", never "reset". Consumers merge successive records
//! for the same key with last-write-wins per field. Unset fields are omitted
//! from serialized output entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Connection state reported through the ConnStatus callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ConnStatus {
    Connected,
    Disconnected,
    QrCodeScan,
    LoggedOut,
    Error,
}

/// Delivery state of a message derived from receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
    ServerError,
}

/// Call signaling event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CallStatus {
    Offer,
    Accept,
    PreAccept,
    Transport,
    Terminate,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CallMedia {
    Audio,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CallType {
    Group,
}

/// Outcome recorded in a call-log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CallLogOutcome {
    Connected,
    Missed,
    Failed,
    Rejected,
    Accepted,
    Ongoing,
    Silenced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CallLogType {
    Regular,
    Scheduled,
    VoiceChat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParticipantRank {
    Regular,
    Admin,
    SuperAdmin,
}

/// A member of a group together with their rank, when the event states it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupParticipant {
    #[serde(rename = "UserJID")]
    pub user_jid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<ParticipantRank>,
}

impl GroupParticipant {
    pub fn new(user_jid: impl Into<String>, rank: Option<ParticipantRank>) -> Self {
        Self {
            user_jid: user_jid.into(),
            rank,
        }
    }
}

/// Group metadata embedded in a [`Contact`].
///
/// A record carries either the replace list or the add/remove deltas, never
/// both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_info_locked_to_admins: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_only_admin_can_message: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_only_admins_can_add_members: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_is_parent: Option<bool>,
    #[serde(
        rename = "GroupLinkedParentJID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub group_linked_parent_jid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_is_default_sub_group: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_join_approval_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_created: Option<DateTime<Utc>>,
    /// Supersedes the consumer's whole member set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_replace_participants: Vec<GroupParticipant>,
    /// Joins the consumer's member set, or updates the rank of a member.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_add_participants: Vec<GroupParticipant>,
    /// Leaves the consumer's member set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_removed_participants: Vec<GroupParticipant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_invite_link: Option<String>,
}

/// Partial update for a user, chat, or group keyed by JID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(rename = "JID")]
    pub jid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Filename of the stored profile photo inside the media directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute_end_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_muted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    /// JID currently typing; `Some("")` means typing stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typing: Option<String>,
    /// JID currently recording audio; `Some("")` means recording stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,

    #[serde(flatten)]
    pub group: Group,
}

impl Contact {
    /// A contact update carrying nothing but its key.
    pub fn new(jid: impl Into<String>) -> Self {
        Self {
            jid: jid.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a message keyed by (message id, chat JID).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(rename = "MessageID", default, skip_serializing_if = "String::is_empty")]
    pub message_id: String,
    #[serde(rename = "ChatJID", default, skip_serializing_if = "String::is_empty")]
    pub chat_jid: String,
    #[serde(rename = "SenderJID", default, skip_serializing_if = "Option::is_none")]
    pub sender_jid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_from_me: Option<bool>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_body: Option<String>,

    #[serde(
        rename = "InfoQuotedMessageID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub info_quoted_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_participant: Option<String>,
    #[serde(rename = "InfoRemoteJID", default, skip_serializing_if = "Option::is_none")]
    pub info_remote_jid: Option<String>,

    /// Filenames inside the media directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_vcard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
    #[serde(rename = "LocationURL", default, skip_serializing_if = "Option::is_none")]
    pub location_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_is_live: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_accuracy_in_meters: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_log_outcome: Option<CallLogOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_log_duration_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_log_type: Option<CallLogType>,
    #[serde(
        rename = "CallLogParticipantJIDs",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub call_log_participant_jids: Vec<String>,
}

impl Message {
    /// A message update carrying nothing but its key.
    pub fn keyed(message_id: impl Into<String>, chat_jid: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            chat_jid: chat_jid.into(),
            ..Self::default()
        }
    }
}

/// One call signaling event. Not a call session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Call {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "CallID")]
    pub call_id: String,
    pub from: String,
    pub call_creator: String,
    pub status: CallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<CallMedia>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub call_type: Option<CallType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminate_reason: Option<String>,
}

/// Account-level settings update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn enum_wire_names_match_consumer_contract() {
        assert_eq!(ConnStatus::QrCodeScan.to_string(), "qr-code-scan");
        assert_eq!(ConnStatus::LoggedOut.to_string(), "logged-out");
        assert_eq!(MessageStatus::ServerError.to_string(), "server-error");
        assert_eq!(CallStatus::PreAccept.to_string(), "pre-accept");
        assert_eq!(CallLogType::VoiceChat.to_string(), "voice-chat");
        assert_eq!(ParticipantRank::SuperAdmin.to_string(), "superadmin");

        assert_eq!(
            serde_json::to_string(&ConnStatus::QrCodeScan).unwrap(),
            "\"qr-code-scan\""
        );
        assert_eq!(
            ParticipantRank::from_str("superadmin").unwrap(),
            ParticipantRank::SuperAdmin
        );
    }

    #[test]
    fn empty_contact_serializes_only_jid() {
        let json = serde_json::to_value(Contact::new("1@s.whatsapp.net")).unwrap();
        assert_eq!(json, serde_json::json!({ "JID": "1@s.whatsapp.net" }));
    }

    #[test]
    fn group_fields_flatten_into_contact() {
        let mut contact = Contact::new("42@g.us");
        contact.is_group = Some(true);
        contact.group.group_name = Some("Hikers".into());
        contact.group.group_linked_parent_jid = Some("1@g.us".into());
        contact.group.group_add_participants =
            vec![GroupParticipant::new("7@s.whatsapp.net", Some(ParticipantRank::Admin))];

        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "JID": "42@g.us",
                "IsGroup": true,
                "GroupName": "Hikers",
                "GroupLinkedParentJID": "1@g.us",
                "GroupAddParticipants": [{ "UserJID": "7@s.whatsapp.net", "Rank": "admin" }],
            })
        );

        let back: Contact = serde_json::from_value(json).unwrap();
        assert_eq!(back, contact);
    }

    #[test]
    fn explicit_false_is_kept_distinct_from_unset() {
        let mut contact = Contact::new("1@s.whatsapp.net");
        contact.available = Some(false);
        contact.typing = Some(String::new());
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["Available"], serde_json::json!(false));
        assert_eq!(json["Typing"], serde_json::json!(""));
        assert!(json.get("Recording").is_none());
    }

    #[test]
    fn message_key_fields_use_jid_spelling() {
        let mut message = Message::keyed("ABC", "1@s.whatsapp.net");
        message.status = Some(MessageStatus::Read);
        message.call_log_participant_jids = vec!["2@s.whatsapp.net".into()];
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "MessageID": "ABC",
                "ChatJID": "1@s.whatsapp.net",
                "Status": "read",
                "CallLogParticipantJIDs": ["2@s.whatsapp.net"],
            })
        );
    }
}
