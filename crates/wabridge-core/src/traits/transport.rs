// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The messaging transport client, as seen from the bridge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::BridgeError;
use crate::jid::Jid;
use crate::raw::{
    AttachmentKind, MediaDescriptor, MessageEvent, OutgoingMessage, PresenceState,
    ProfilePictureInfo, ReadReceipt, SendReceipt, StoredContact, UploadedMedia, WebMessageInfo,
};

/// Operations the bridge needs from the transport client.
///
/// Session setup, pairing, reconnects, and the wire protocol stay inside the
/// implementation. Calls are awaited inline with event handling and are not
/// subject to a timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch and decrypt the media payload referenced by a message.
    async fn download(
        &self,
        kind: AttachmentKind,
        media: &MediaDescriptor,
    ) -> Result<Vec<u8>, BridgeError>;

    /// Query profile picture metadata. Passing the last known id lets the
    /// transport answer `Ok(None)` when the picture is unchanged.
    async fn profile_picture_info(
        &self,
        jid: &Jid,
        existing_id: Option<&str>,
    ) -> Result<Option<ProfilePictureInfo>, BridgeError>;

    /// Rebuild a live message event from a stored history message.
    /// `Ok(None)` means the stored entry carries no message.
    fn parse_web_message(
        &self,
        chat: &Jid,
        message: &WebMessageInfo,
    ) -> Result<Option<MessageEvent>, BridgeError>;

    /// Announce the account's presence.
    async fn send_presence(&self, state: PresenceState) -> Result<(), BridgeError>;

    /// Drop the current connection.
    async fn disconnect(&self);

    /// Upload media for sending.
    async fn upload(
        &self,
        data: Vec<u8>,
        kind: AttachmentKind,
    ) -> Result<UploadedMedia, BridgeError>;

    async fn send_message(
        &self,
        chat: &Jid,
        message: OutgoingMessage,
    ) -> Result<SendReceipt, BridgeError>;

    /// Replace the text of a previously sent message.
    async fn send_edit(
        &self,
        chat: &Jid,
        message_id: &str,
        message: OutgoingMessage,
    ) -> Result<SendReceipt, BridgeError>;

    async fn mark_read(
        &self,
        message_ids: &[String],
        when: DateTime<Utc>,
        chat: &Jid,
        sender: &Jid,
        receipt: ReadReceipt,
    ) -> Result<(), BridgeError>;

    /// Every contact in the transport's local store.
    async fn all_contacts(&self) -> Result<Vec<StoredContact>, BridgeError>;
}
