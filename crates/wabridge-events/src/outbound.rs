// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sending messages, edits, and read receipts.
//!
//! Outgoing messages use the same [`Message`] record the consumer receives.
//! Attachments are referenced by their filename in the media directory.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use wabridge_core::raw::{AttachmentKind, OutgoingMedia, OutgoingMessage, ReadReceipt};
use wabridge_core::types::Message;
use wabridge_core::{BridgeError, EventSink, Jid, Transport};
use wabridge_media::{AttachmentStore, outbound_media};

/// Sends records from the consumer back through the transport.
pub struct Outbox {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
    store: Arc<AttachmentStore>,
}

impl Outbox {
    pub fn new(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn EventSink>,
        store: Arc<AttachmentStore>,
    ) -> Self {
        Self {
            transport,
            sink,
            store,
        }
    }

    /// Send `message` to its chat.
    ///
    /// Only the first attachment is sent, with the content body as its
    /// caption. Without attachments the content body is sent as text. The
    /// returned message carries the id, sender, and timestamp assigned by the
    /// transport; with `echo` it is also delivered to the Message callback.
    pub async fn send_message(&self, mut message: Message, echo: bool) -> Result<Message, BridgeError> {
        let chat = Jid::parse(&message.chat_jid)?;

        let outgoing = match message.attachments.first() {
            Some(name) => OutgoingMessage::Media(self.prepare_media(name, &message).await?),
            None => OutgoingMessage::Text(text_body(&message)?),
        };

        let receipt = self.transport.send_message(&chat, outgoing).await?;
        debug!(chat = %chat, message_id = %receipt.id, "message sent");

        message.message_id = receipt.id;
        message.sender_jid = Some(receipt.sender.to_string());
        message.timestamp = Some(receipt.timestamp);

        if echo {
            self.sink.message(message.clone());
        }
        Ok(message)
    }

    /// Replace the text of a message this account sent earlier.
    pub async fn send_edit(&self, message: &Message) -> Result<(), BridgeError> {
        let chat = Jid::parse(&message.chat_jid)?;
        if message.message_id.is_empty() {
            return Err(send_error("edit is missing the message id"));
        }
        let body = text_body(message)?;
        self.transport
            .send_edit(&chat, &message.message_id, OutgoingMessage::Text(body))
            .await?;
        Ok(())
    }

    pub async fn send_read(
        &self,
        message_ids: &[String],
        when: DateTime<Utc>,
        chat: &str,
        sender: &str,
    ) -> Result<(), BridgeError> {
        self.mark(message_ids, when, chat, sender, ReadReceipt::Read).await
    }

    /// Mark voice or video messages as played.
    pub async fn send_played(
        &self,
        message_ids: &[String],
        when: DateTime<Utc>,
        chat: &str,
        sender: &str,
    ) -> Result<(), BridgeError> {
        self.mark(message_ids, when, chat, sender, ReadReceipt::Played).await
    }

    async fn mark(
        &self,
        message_ids: &[String],
        when: DateTime<Utc>,
        chat: &str,
        sender: &str,
        receipt: ReadReceipt,
    ) -> Result<(), BridgeError> {
        let chat = Jid::parse(chat)?;
        let sender = Jid::parse(sender)?;
        self.transport
            .mark_read(message_ids, when, &chat, &sender, receipt)
            .await
    }

    async fn prepare_media(&self, name: &str, message: &Message) -> Result<OutgoingMedia, BridgeError> {
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext,
            _ => return Err(send_error(format!("invalid attachment with no extension: {name}"))),
        };
        let (kind, mimetype) = outbound_media(ext)?;

        let path = self.store.path_for(name);
        let data = tokio::fs::read(&path).await.map_err(|e| {
            BridgeError::storage(format!("failed to read {} to send", path.display()), e)
        })?;
        let upload = self.transport.upload(data, kind).await?;

        // Voice notes carry no caption.
        let caption = match kind {
            AttachmentKind::Audio => None,
            _ => message.content_body.clone(),
        };

        Ok(OutgoingMedia {
            kind,
            mimetype,
            caption,
            upload,
        })
    }
}

fn text_body(message: &Message) -> Result<String, BridgeError> {
    message
        .content_body
        .clone()
        .ok_or_else(|| send_error("message has no content body"))
}

fn send_error(message: impl Into<String>) -> BridgeError {
    BridgeError::Send {
        message: message.into(),
        source: None,
    }
}
