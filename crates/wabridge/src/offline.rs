// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A transport with no connection behind it, for replaying recorded events.
//!
//! Media and profile pictures are unavailable and every send fails. History
//! messages are rebuilt locally.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wabridge_core::jid::DEFAULT_USER_SERVER;
use wabridge_core::raw::{
    AttachmentKind, MediaDescriptor, MessageEvent, OutgoingMessage, PresenceState,
    ProfilePictureInfo, ReadReceipt, SendReceipt, StoredContact, UploadedMedia, WebMessageInfo,
};
use wabridge_core::{BridgeError, Jid, Transport};

pub struct OfflineTransport {
    own_jid: Jid,
}

impl OfflineTransport {
    /// `number` is the account's phone number, as configured.
    pub fn new(number: &str) -> Self {
        Self {
            own_jid: Jid::new(number, DEFAULT_USER_SERVER),
        }
    }
}

fn offline(what: &str) -> BridgeError {
    BridgeError::Send {
        message: format!("cannot {what} while replaying offline"),
        source: None,
    }
}

#[async_trait]
impl Transport for OfflineTransport {
    async fn download(
        &self,
        kind: AttachmentKind,
        _media: &MediaDescriptor,
    ) -> Result<Vec<u8>, BridgeError> {
        Err(BridgeError::Download {
            message: format!("{kind} media is not available offline"),
            source: None,
        })
    }

    async fn profile_picture_info(
        &self,
        _jid: &Jid,
        _existing_id: Option<&str>,
    ) -> Result<Option<ProfilePictureInfo>, BridgeError> {
        Ok(None)
    }

    fn parse_web_message(
        &self,
        chat: &Jid,
        message: &WebMessageInfo,
    ) -> Result<Option<MessageEvent>, BridgeError> {
        if message.message.is_none() {
            return Ok(None);
        }
        message.to_message_event(chat, &self.own_jid).map(Some)
    }

    async fn send_presence(&self, _state: PresenceState) -> Result<(), BridgeError> {
        Ok(())
    }

    async fn disconnect(&self) {}

    async fn upload(
        &self,
        _data: Vec<u8>,
        _kind: AttachmentKind,
    ) -> Result<UploadedMedia, BridgeError> {
        Err(offline("upload media"))
    }

    async fn send_message(
        &self,
        _chat: &Jid,
        _message: OutgoingMessage,
    ) -> Result<SendReceipt, BridgeError> {
        Err(offline("send a message"))
    }

    async fn send_edit(
        &self,
        _chat: &Jid,
        _message_id: &str,
        _message: OutgoingMessage,
    ) -> Result<SendReceipt, BridgeError> {
        Err(offline("send an edit"))
    }

    async fn mark_read(
        &self,
        _message_ids: &[String],
        _when: DateTime<Utc>,
        _chat: &Jid,
        _sender: &Jid,
        _receipt: ReadReceipt,
    ) -> Result<(), BridgeError> {
        Err(offline("send receipts"))
    }

    async fn all_contacts(&self) -> Result<Vec<StoredContact>, BridgeError> {
        Ok(Vec::new())
    }
}
