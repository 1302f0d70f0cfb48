// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound message events and their content payloads.
//!
//! Only the content kinds the bridge maps are typed. Every other key of the
//! content object lands in [`MessageContent::other`] and surfaces as
//! [`ContentKind::Unsupported`], so new protocol kinds never fail decoding.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use strum::Display;

use crate::error::BridgeError;
use crate::jid::Jid;
use crate::raw::bytes;
use crate::raw::presence::MessageSource;

/// Per-message device metadata, present on nearly every message and never mapped.
pub const MESSAGE_CONTEXT_INFO: &str = "messageContextInfo";

/// A live (or history-replayed) inbound message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageEvent {
    pub info: MessageInfo,
    pub message: Option<MessageContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageInfo {
    #[serde(flatten)]
    pub source: MessageSource,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Type", default)]
    pub message_type: String,
    #[serde(default)]
    pub push_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Media kinds that carry a downloadable payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Audio,
    Video,
    Document,
    Sticker,
}

impl AttachmentKind {
    /// Extension used when the declared MIME type has no known mapping.
    pub fn fallback_extension(self) -> Option<&'static str> {
        match self {
            Self::Audio => Some(".ogg"),
            Self::Video => Some(".mp4"),
            Self::Image | Self::Document | Self::Sticker => None,
        }
    }
}

/// Location of an encrypted media blob on the transport's CDN.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    #[serde(rename = "URL")]
    pub url: Option<String>,
    pub direct_path: Option<String>,
    #[serde(default, deserialize_with = "bytes::option")]
    pub media_key: Option<Vec<u8>>,
    #[serde(rename = "fileSHA256", default, deserialize_with = "bytes::option")]
    pub file_sha256: Option<Vec<u8>>,
    #[serde(rename = "fileEncSHA256", default, deserialize_with = "bytes::option")]
    pub file_enc_sha256: Option<Vec<u8>>,
    pub file_length: Option<u64>,
    pub mimetype: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    #[serde(flatten)]
    pub media: MediaDescriptor,
    pub caption: Option<String>,
    #[serde(rename = "JPEGThumbnail", default, deserialize_with = "bytes::option")]
    pub jpeg_thumbnail: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMessage {
    #[serde(flatten)]
    pub media: MediaDescriptor,
    pub caption: Option<String>,
    pub seconds: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    #[serde(flatten)]
    pub media: MediaDescriptor,
    pub seconds: Option<u32>,
    #[serde(rename = "PTT")]
    pub ptt: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMessage {
    #[serde(flatten)]
    pub media: MediaDescriptor,
    pub caption: Option<String>,
    pub file_name: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessage {
    #[serde(flatten)]
    pub media: MediaDescriptor,
    #[serde(default, deserialize_with = "bytes::option")]
    pub png_thumbnail: Option<Vec<u8>>,
}

/// Reply/quote metadata attached to extended text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    /// Id of the quoted message.
    #[serde(rename = "stanzaID")]
    pub stanza_id: Option<String>,
    pub participant: Option<String>,
    #[serde(rename = "remoteJID")]
    pub remote_jid: Option<String>,
    pub quoted_message: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTextMessage {
    pub text: Option<String>,
    pub context_info: Option<ContextInfo>,
    #[serde(rename = "JPEGThumbnail", default, deserialize_with = "bytes::option")]
    pub jpeg_thumbnail: Option<Vec<u8>>,
    pub matched_text: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub display_name: Option<String>,
    pub vcard: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMessage {
    pub degrees_latitude: Option<f64>,
    pub degrees_longitude: Option<f64>,
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "URL")]
    pub url: Option<String>,
    pub is_live: Option<bool>,
    pub accuracy_in_meters: Option<u32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveLocationMessage {
    pub degrees_latitude: Option<f64>,
    pub degrees_longitude: Option<f64>,
    pub accuracy_in_meters: Option<u32>,
    pub caption: Option<String>,
    pub sequence_number: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInviteMessage {
    #[serde(rename = "groupJID")]
    pub group_jid: Option<String>,
    pub invite_code: Option<String>,
    pub invite_expiration: Option<i64>,
    pub group_name: Option<String>,
    #[serde(rename = "JPEGThumbnail", default, deserialize_with = "bytes::option")]
    pub jpeg_thumbnail: Option<Vec<u8>>,
    pub caption: Option<String>,
}

/// Identifies a message within a chat.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    #[serde(rename = "remoteJID")]
    pub remote_jid: Option<String>,
    pub from_me: Option<bool>,
    #[serde(rename = "ID")]
    pub id: Option<String>,
    pub participant: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionMessage {
    pub key: Option<MessageKey>,
    pub text: Option<String>,
    #[serde(rename = "senderTimestampMS")]
    pub sender_timestamp_ms: Option<i64>,
}

/// Outcome codes carried in call-log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i32")]
pub enum CallOutcome {
    Connected,
    Missed,
    Failed,
    Rejected,
    AcceptedElsewhere,
    Ongoing,
    SilencedByDnd,
    SilencedUnknownCaller,
    Unrecognized(i32),
}

impl From<i32> for CallOutcome {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Connected,
            1 => Self::Missed,
            2 => Self::Failed,
            3 => Self::Rejected,
            4 => Self::AcceptedElsewhere,
            5 => Self::Ongoing,
            6 => Self::SilencedByDnd,
            7 => Self::SilencedUnknownCaller,
            other => Self::Unrecognized(other),
        }
    }
}

/// Call kind codes carried in call-log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i32")]
pub enum CallLogKind {
    Regular,
    ScheduledCall,
    VoiceChat,
    Unrecognized(i32),
}

impl From<i32> for CallLogKind {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Regular,
            1 => Self::ScheduledCall,
            2 => Self::VoiceChat,
            other => Self::Unrecognized(other),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLogParticipant {
    #[serde(rename = "JID")]
    pub jid: Option<String>,
    pub call_outcome: Option<CallOutcome>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLogMessage {
    pub is_video: Option<bool>,
    pub call_outcome: Option<CallOutcome>,
    pub duration_secs: Option<i64>,
    pub call_type: Option<CallLogKind>,
    #[serde(default)]
    pub participants: Vec<CallLogParticipant>,
}

/// The content object of a message. At most a handful of keys are set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    pub conversation: Option<String>,
    pub extended_text_message: Option<ExtendedTextMessage>,
    pub contact_message: Option<ContactMessage>,
    pub location_message: Option<LocationMessage>,
    pub live_location_message: Option<LiveLocationMessage>,
    pub image_message: Option<ImageMessage>,
    pub video_message: Option<VideoMessage>,
    pub audio_message: Option<AudioMessage>,
    pub document_message: Option<DocumentMessage>,
    pub sticker_message: Option<StickerMessage>,
    pub group_invite_message: Option<GroupInviteMessage>,
    pub reaction_message: Option<ReactionMessage>,
    // The protocol field name carries three `s`.
    #[serde(rename = "callLogMesssage")]
    pub call_log_message: Option<CallLogMessage>,
    /// Every content key without a typed mapping.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// One content kind present in a message, in extraction order.
#[derive(Debug, Clone, Copy)]
pub enum ContentKind<'a> {
    Image(&'a ImageMessage),
    Audio(&'a AudioMessage),
    Video(&'a VideoMessage),
    Document(&'a DocumentMessage),
    Sticker(&'a StickerMessage),
    Conversation(&'a str),
    Contact(&'a ContactMessage),
    Location(&'a LocationMessage),
    ExtendedText(&'a ExtendedTextMessage),
    LiveLocation(&'a LiveLocationMessage),
    GroupInvite(&'a GroupInviteMessage),
    Reaction(&'a ReactionMessage),
    CallLog(&'a CallLogMessage),
    Unsupported(&'a str),
}

impl<'a> ContentKind<'a> {
    /// Protocol key of this kind, for diagnostics.
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Image(_) => "imageMessage",
            Self::Audio(_) => "audioMessage",
            Self::Video(_) => "videoMessage",
            Self::Document(_) => "documentMessage",
            Self::Sticker(_) => "stickerMessage",
            Self::Conversation(_) => "conversation",
            Self::Contact(_) => "contactMessage",
            Self::Location(_) => "locationMessage",
            Self::ExtendedText(_) => "extendedTextMessage",
            Self::LiveLocation(_) => "liveLocationMessage",
            Self::GroupInvite(_) => "groupInviteMessage",
            Self::Reaction(_) => "reactionMessage",
            Self::CallLog(_) => "callLogMesssage",
            Self::Unsupported(name) => name,
        }
    }
}

impl MessageContent {
    /// All content kinds present, in the fixed extraction order: downloadable
    /// media first, then text-like and structured kinds, then unsupported keys.
    pub fn kinds(&self) -> Vec<ContentKind<'_>> {
        let mut kinds = Vec::new();

        if let Some(m) = &self.image_message {
            kinds.push(ContentKind::Image(m));
        }
        if let Some(m) = &self.audio_message {
            kinds.push(ContentKind::Audio(m));
        }
        if let Some(m) = &self.video_message {
            kinds.push(ContentKind::Video(m));
        }
        if let Some(m) = &self.document_message {
            kinds.push(ContentKind::Document(m));
        }
        if let Some(m) = &self.sticker_message {
            kinds.push(ContentKind::Sticker(m));
        }
        if let Some(text) = self.conversation.as_deref().filter(|t| !t.is_empty()) {
            kinds.push(ContentKind::Conversation(text));
        }
        if let Some(m) = &self.contact_message {
            kinds.push(ContentKind::Contact(m));
        }
        if let Some(m) = &self.location_message {
            kinds.push(ContentKind::Location(m));
        }
        if let Some(m) = &self.extended_text_message {
            kinds.push(ContentKind::ExtendedText(m));
        }
        if let Some(m) = &self.live_location_message {
            kinds.push(ContentKind::LiveLocation(m));
        }
        if let Some(m) = &self.group_invite_message {
            kinds.push(ContentKind::GroupInvite(m));
        }
        if let Some(m) = &self.reaction_message {
            kinds.push(ContentKind::Reaction(m));
        }
        if let Some(m) = &self.call_log_message {
            kinds.push(ContentKind::CallLog(m));
        }

        kinds.extend(
            self.other
                .iter()
                .filter(|(name, value)| name.as_str() != MESSAGE_CONTEXT_INFO && !value.is_null())
                .map(|(name, _)| ContentKind::Unsupported(name.as_str())),
        );

        kinds
    }

    /// Coarse message type as the transport labels it.
    pub fn message_type(&self) -> &'static str {
        if self.reaction_message.is_some() {
            "reaction"
        } else if self.image_message.is_some()
            || self.video_message.is_some()
            || self.audio_message.is_some()
            || self.document_message.is_some()
            || self.sticker_message.is_some()
            || self.contact_message.is_some()
            || self.location_message.is_some()
            || self.live_location_message.is_some()
        {
            "media"
        } else {
            "text"
        }
    }
}

/// A stored message as bundled in history sync.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebMessageInfo {
    #[serde(default)]
    pub key: MessageKey,
    pub message: Option<MessageContent>,
    /// Unix seconds.
    pub message_timestamp: Option<i64>,
    pub participant: Option<String>,
    pub push_name: Option<String>,
}

impl WebMessageInfo {
    /// Rebuild the live-message shape for a stored message in `chat`.
    ///
    /// `own` is the account's JID, used as the sender of messages sent from
    /// this account. In groups the sender comes from the participant field.
    pub fn to_message_event(&self, chat: &Jid, own: &Jid) -> Result<MessageEvent, BridgeError> {
        let id = self.key.id.clone().ok_or_else(|| {
            BridgeError::Internal(format!("stored message in {chat} has no id"))
        })?;
        let is_from_me = self.key.from_me.unwrap_or(false);

        let sender = if is_from_me {
            own.clone()
        } else if chat.is_group() {
            let participant = self
                .key
                .participant
                .as_deref()
                .or(self.participant.as_deref())
                .ok_or_else(|| {
                    BridgeError::Internal(format!("group message {id} has no participant"))
                })?;
            Jid::parse(participant)?
        } else {
            chat.clone()
        };

        let timestamp = self
            .message_timestamp
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_default();

        Ok(MessageEvent {
            info: MessageInfo {
                source: MessageSource {
                    chat: chat.clone(),
                    sender,
                    is_from_me,
                    is_group: chat.is_group(),
                },
                id,
                message_type: self
                    .message
                    .as_ref()
                    .map(|m| m.message_type())
                    .unwrap_or("text")
                    .to_string(),
                push_name: self.push_name.clone().unwrap_or_default(),
                timestamp,
            },
            message: self.message.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_audio_and_video_have_fallbacks() {
        assert_eq!(AttachmentKind::Audio.fallback_extension(), Some(".ogg"));
        assert_eq!(AttachmentKind::Video.fallback_extension(), Some(".mp4"));
        assert_eq!(AttachmentKind::Sticker.fallback_extension(), None);
        assert_eq!(AttachmentKind::Image.to_string(), "image");
    }

    fn content(json: &str) -> MessageContent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn context_info_is_not_a_kind() {
        let c = content(
            r#"{"conversation":"Hello world!","messageContextInfo":{"deviceListMetadataVersion":2}}"#,
        );
        let names: Vec<_> = c.kinds().iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["conversation"]);
    }

    #[test]
    fn unknown_keys_become_unsupported_kinds() {
        let c = content(r#"{"pollCreationMessage":{"name":"lunch?"},"protocolMessage":{}}"#);
        let kinds = c.kinds();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.iter().all(|k| matches!(k, ContentKind::Unsupported(_))));
        assert_eq!(kinds[0].name(), "pollCreationMessage");
    }

    #[test]
    fn media_kinds_come_before_text_kinds() {
        let c = content(
            r#"{"extendedTextMessage":{"text":"hi"},"imageMessage":{"mimetype":"image/jpeg","caption":"cap"}}"#,
        );
        let names: Vec<_> = c.kinds().iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["imageMessage", "extendedTextMessage"]);
        assert_eq!(c.message_type(), "media");
    }

    #[test]
    fn empty_conversation_is_ignored() {
        let c = content(r#"{"conversation":""}"#);
        assert!(c.kinds().is_empty());
    }

    #[test]
    fn call_log_codes_decode() {
        let c = content(
            r#"{"callLogMesssage":{"callOutcome":6,"callType":2,"durationSecs":30,
                "participants":[{"JID":"1@s.whatsapp.net","callOutcome":1}]}}"#,
        );
        let log = c.call_log_message.unwrap();
        assert_eq!(log.call_outcome, Some(CallOutcome::SilencedByDnd));
        assert_eq!(log.call_type, Some(CallLogKind::VoiceChat));
        assert_eq!(log.participants[0].call_outcome, Some(CallOutcome::Missed));
        assert_eq!(CallOutcome::from(42), CallOutcome::Unrecognized(42));
    }

    #[test]
    fn media_descriptor_flattens_into_image() {
        let c = content(
            r#"{"imageMessage":{"URL":"https://mmg.example/x","mimetype":"image/jpeg",
                "mediaKey":"aGVsbG8=","fileLength":5,"caption":"look"}}"#,
        );
        let image = c.image_message.unwrap();
        assert_eq!(image.media.url.as_deref(), Some("https://mmg.example/x"));
        assert_eq!(image.media.media_key.as_deref(), Some(&b"hello"[..]));
        assert_eq!(image.media.file_length, Some(5));
        assert_eq!(image.caption.as_deref(), Some("look"));
    }

    #[test]
    fn web_message_sender_resolution() {
        let own = Jid::parse("100@s.whatsapp.net").unwrap();
        let direct = Jid::parse("200@s.whatsapp.net").unwrap();
        let group = Jid::parse("300@g.us").unwrap();

        let mut web: WebMessageInfo = serde_json::from_str(
            r#"{"key":{"ID":"M1","fromMe":false},"message":{"conversation":"hi"},"messageTimestamp":1746184408}"#,
        )
        .unwrap();
        let evt = web.to_message_event(&direct, &own).unwrap();
        assert_eq!(evt.info.source.sender, direct);
        assert_eq!(evt.info.id, "M1");
        assert_eq!(evt.info.message_type, "text");
        assert_eq!(evt.info.timestamp.to_rfc3339(), "2025-05-02T11:13:28+00:00");

        web.key.from_me = Some(true);
        assert_eq!(web.to_message_event(&direct, &own).unwrap().info.source.sender, own);

        web.key.from_me = Some(false);
        assert!(web.to_message_event(&group, &own).is_err());
        web.key.participant = Some("400@s.whatsapp.net".into());
        let evt = web.to_message_event(&group, &own).unwrap();
        assert_eq!(evt.info.source.sender.to_string(), "400@s.whatsapp.net");
        assert!(evt.info.source.is_group);
    }
}
