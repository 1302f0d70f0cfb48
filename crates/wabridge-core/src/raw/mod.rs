// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw transport events.
//!
//! [`RawEvent`] is the closed set of variants the router understands, plus
//! two catch-alls: [`RawEvent::Unmapped`] for known transport events that have
//! no domain mapping, and [`RawEvent::Unknown`] for anything else.

pub mod appstate;
pub mod bytes;
pub mod call;
pub mod connection;
pub mod group;
pub mod history;
pub mod message;
pub mod outgoing;
pub mod presence;
pub mod time;

use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::BridgeError;

pub use appstate::{
    AppStateSyncCompleteEvent, ArchiveEvent, BusinessNameEvent, ContactEvent, DeleteForMeEvent,
    MuteEvent, OfflineSyncCompletedEvent, OfflineSyncPreviewEvent, PinEvent, PushNameEvent,
    PushNameSettingEvent, StarEvent, UserStatusMuteEvent,
};
pub use call::{CallMeta, CallOfferNoticeEvent, CallTerminateEvent};
pub use connection::{
    CatRefreshErrorEvent, ConnectFailureEvent, ConnectFailureReason, LoggedOutEvent,
    StreamErrorEvent, TempBanReason, TemporaryBanEvent,
};
pub use group::{GroupInfoEvent, GroupSnapshot, JoinedGroupEvent, PictureEvent};
pub use history::{Conversation, HistorySyncEvent};
pub use message::{AttachmentKind, ContentKind, MediaDescriptor, MessageContent, MessageEvent, WebMessageInfo};
pub use outgoing::{
    OutgoingMedia, OutgoingMessage, PresenceState, ProfilePictureInfo, ReadReceipt, SendReceipt,
    StoredContact, UploadedMedia,
};
pub use presence::{ChatPresenceEvent, PresenceEvent, ReceiptEvent, ReceiptType};

/// A tagged event as serialized by the transport: `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// Transport events that are recognised but intentionally not mapped yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum UnmappedKind {
    MarkChatAsRead,
    ClearChat,
    DeleteChat,
    UnarchiveChatsSetting,
    LabelEdit,
    LabelAssociationChat,
    LabelAssociationMessage,
    CallRelayLatency,
    UnknownCallEvent,
    #[strum(serialize = "QR")]
    Qr,
    PairSuccess,
    PairError,
    #[strum(serialize = "QRScannedWithoutMultidevice")]
    QrScannedWithoutMultidevice,
    KeepAliveTimeout,
    KeepAliveRestored,
    DecryptFailMode,
    UndecryptableMessage,
    NewsletterMessageMeta,
    #[strum(serialize = "FBMessage")]
    FbMessage,
    UserAbout,
    IdentityChange,
    PrivacySettings,
    MediaRetryError,
    MediaRetry,
    BlocklistAction,
    Blocklist,
    BlocklistChangeAction,
    BlocklistChange,
    NewsletterJoin,
    NewsletterLeave,
    NewsletterMuteChange,
    NewsletterLiveUpdate,
}

/// One event delivered by the transport.
#[derive(Debug, Clone, IntoStaticStr)]
pub enum RawEvent {
    Contact(ContactEvent),
    PushName(PushNameEvent),
    BusinessName(BusinessNameEvent),
    Pin(PinEvent),
    Star(StarEvent),
    DeleteForMe(DeleteForMeEvent),
    Mute(MuteEvent),
    Archive(ArchiveEvent),
    PushNameSetting(PushNameSettingEvent),
    UserStatusMute(UserStatusMuteEvent),
    AppStateSyncComplete(AppStateSyncCompleteEvent),

    CallOffer(CallMeta),
    CallAccept(CallMeta),
    CallPreAccept(CallMeta),
    CallTransport(CallMeta),
    CallOfferNotice(CallOfferNoticeEvent),
    CallTerminate(CallTerminateEvent),
    CallReject(CallMeta),

    Connected,
    Disconnected,
    PermanentDisconnect,
    LoggedOut(LoggedOutEvent),
    StreamReplaced,
    ManualLoginReconnect,
    TemporaryBan(TemporaryBanEvent),
    ConnectFailure(ConnectFailureEvent),
    ClientOutdated,
    #[strum(serialize = "CATRefreshError")]
    CatRefreshError(CatRefreshErrorEvent),
    StreamError(StreamErrorEvent),

    HistorySync(HistorySyncEvent),
    Message(MessageEvent),
    Receipt(ReceiptEvent),
    ChatPresence(ChatPresenceEvent),
    Presence(PresenceEvent),
    JoinedGroup(JoinedGroupEvent),
    GroupInfo(GroupInfoEvent),
    Picture(PictureEvent),
    OfflineSyncPreview(OfflineSyncPreviewEvent),
    OfflineSyncCompleted(OfflineSyncCompletedEvent),

    Unmapped { kind: UnmappedKind, payload: Value },
    Unknown { kind: String, payload: Value },
}

impl RawEvent {
    /// Build an event from its transport type name and JSON payload.
    ///
    /// Unrecognised type names become [`RawEvent::Unknown`]; only a payload
    /// that does not match its declared type is an error.
    pub fn decode(kind: &str, data: Value) -> Result<Self, BridgeError> {
        Ok(match kind {
            "Contact" => Self::Contact(payload(kind, data)?),
            "PushName" => Self::PushName(payload(kind, data)?),
            "BusinessName" => Self::BusinessName(payload(kind, data)?),
            "Pin" => Self::Pin(payload(kind, data)?),
            "Star" => Self::Star(payload(kind, data)?),
            "DeleteForMe" => Self::DeleteForMe(payload(kind, data)?),
            "Mute" => Self::Mute(payload(kind, data)?),
            "Archive" => Self::Archive(payload(kind, data)?),
            "PushNameSetting" => Self::PushNameSetting(payload(kind, data)?),
            "UserStatusMute" => Self::UserStatusMute(payload(kind, data)?),
            "AppStateSyncComplete" => Self::AppStateSyncComplete(payload(kind, data)?),
            "CallOffer" => Self::CallOffer(payload(kind, data)?),
            "CallAccept" => Self::CallAccept(payload(kind, data)?),
            "CallPreAccept" => Self::CallPreAccept(payload(kind, data)?),
            "CallTransport" => Self::CallTransport(payload(kind, data)?),
            "CallOfferNotice" => Self::CallOfferNotice(payload(kind, data)?),
            "CallTerminate" => Self::CallTerminate(payload(kind, data)?),
            "CallReject" => Self::CallReject(payload(kind, data)?),
            "Connected" => Self::Connected,
            "Disconnected" => Self::Disconnected,
            "PermanentDisconnect" => Self::PermanentDisconnect,
            "LoggedOut" => Self::LoggedOut(payload(kind, data)?),
            "StreamReplaced" => Self::StreamReplaced,
            "ManualLoginReconnect" => Self::ManualLoginReconnect,
            "TemporaryBan" => Self::TemporaryBan(payload(kind, data)?),
            "ConnectFailure" => Self::ConnectFailure(payload(kind, data)?),
            "ClientOutdated" => Self::ClientOutdated,
            "CATRefreshError" => Self::CatRefreshError(payload(kind, data)?),
            "StreamError" => Self::StreamError(payload(kind, data)?),
            "HistorySync" => Self::HistorySync(payload(kind, data)?),
            "Message" => Self::Message(payload(kind, data)?),
            "Receipt" => Self::Receipt(payload(kind, data)?),
            "ChatPresence" => Self::ChatPresence(payload(kind, data)?),
            "Presence" => Self::Presence(payload(kind, data)?),
            "JoinedGroup" => Self::JoinedGroup(payload(kind, data)?),
            "GroupInfo" => Self::GroupInfo(payload(kind, data)?),
            "Picture" => Self::Picture(payload(kind, data)?),
            "OfflineSyncPreview" => Self::OfflineSyncPreview(payload(kind, data)?),
            "OfflineSyncCompleted" => Self::OfflineSyncCompleted(payload(kind, data)?),
            other => match UnmappedKind::from_str(other) {
                Ok(kind) => Self::Unmapped {
                    kind,
                    payload: data,
                },
                Err(_) => Self::Unknown {
                    kind: other.to_string(),
                    payload: data,
                },
            },
        })
    }

    /// Decode a tagged envelope.
    pub fn from_envelope(envelope: Envelope) -> Result<Self, BridgeError> {
        Self::decode(&envelope.kind, envelope.data)
    }

    /// Transport type name of this event.
    pub fn kind(&self) -> &str {
        match self {
            Self::Unmapped { kind, .. } => <&'static str>::from(kind),
            Self::Unknown { kind, .. } => kind,
            other => <&'static str>::from(other),
        }
    }
}

fn payload<T: DeserializeOwned>(kind: &str, data: Value) -> Result<T, BridgeError> {
    serde_json::from_value(data).map_err(|source| BridgeError::Decode {
        kind: kind.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_known_kinds() {
        let evt = RawEvent::decode(
            "Pin",
            json!({"JID":"1@s.whatsapp.net","Timestamp":"2025-05-02T11:13:28Z","Action":{"pinned":true}}),
        )
        .unwrap();
        assert!(matches!(evt, RawEvent::Pin(_)));
        assert_eq!(evt.kind(), "Pin");
    }

    #[test]
    fn unit_events_ignore_payload() {
        let evt = RawEvent::decode("Connected", Value::Null).unwrap();
        assert!(matches!(evt, RawEvent::Connected));
        assert_eq!(RawEvent::ClientOutdated.kind(), "ClientOutdated");
    }

    #[test]
    fn kind_names_match_transport_spelling() {
        let evt = RawEvent::decode("CATRefreshError", json!({"Error":"expired"})).unwrap();
        assert_eq!(evt.kind(), "CATRefreshError");

        let evt = RawEvent::decode("QR", json!({"Codes":["a"]})).unwrap();
        assert!(matches!(evt, RawEvent::Unmapped { kind: UnmappedKind::Qr, .. }));
        assert_eq!(evt.kind(), "QR");
    }

    #[test]
    fn unrecognised_kind_is_unknown_not_error() {
        let evt = RawEvent::decode("SomethingNew", json!({"x":1})).unwrap();
        match &evt {
            RawEvent::Unknown { kind, payload } => {
                assert_eq!(kind, "SomethingNew");
                assert_eq!(payload["x"], 1);
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
        assert_eq!(evt.kind(), "SomethingNew");
    }

    #[test]
    fn malformed_payload_is_decode_error() {
        let err = RawEvent::decode("Pin", json!({"JID": 12})).unwrap_err();
        match err {
            BridgeError::Decode { kind, .. } => assert_eq!(kind, "Pin"),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn envelope_round_trip_through_decoder() {
        let env: Envelope = serde_json::from_str(r#"{"type":"Disconnected"}"#).unwrap();
        assert!(matches!(RawEvent::from_envelope(env).unwrap(), RawEvent::Disconnected));
    }
}
