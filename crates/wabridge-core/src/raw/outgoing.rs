// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Values exchanged with the transport when sending.

use chrono::{DateTime, Utc};

use crate::jid::Jid;
use crate::raw::message::AttachmentKind;

/// Result of uploading media to the transport's CDN.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub direct_path: String,
    pub media_key: Vec<u8>,
    pub file_enc_sha256: Vec<u8>,
    pub file_sha256: Vec<u8>,
    pub file_length: u64,
}

/// An uploaded attachment ready to be referenced from a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMedia {
    pub kind: AttachmentKind,
    pub mimetype: String,
    pub caption: Option<String>,
    pub upload: UploadedMedia,
}

/// Message content to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    Text(String),
    Media(OutgoingMedia),
}

/// What the transport reports after accepting a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub id: String,
    pub sender: Jid,
    pub timestamp: DateTime<Utc>,
}

/// Receipt kinds the account can send for received messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadReceipt {
    Read,
    Played,
}

/// Account-wide presence announced to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    Available,
    Unavailable,
}

/// A contact held in the transport's local store. Empty names are unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredContact {
    pub jid: Jid,
    pub full_name: String,
    pub push_name: String,
}

/// Profile picture metadata returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePictureInfo {
    pub id: String,
    pub url: String,
}
