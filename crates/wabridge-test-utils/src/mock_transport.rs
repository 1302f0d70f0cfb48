// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted transport for deterministic tests.
//!
//! Downloads are keyed by the media descriptor's direct path, profile
//! pictures by JID string. Anything not scripted fails the way a real
//! transport would: unknown downloads error, unknown pictures are absent.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use wabridge_core::raw::{
    AttachmentKind, MediaDescriptor, MessageEvent, OutgoingMessage, PresenceState,
    ProfilePictureInfo, ReadReceipt, SendReceipt, StoredContact, UploadedMedia, WebMessageInfo,
};
use wabridge_core::{BridgeError, Jid, Transport};

use crate::fixtures;

/// One call made against the mock, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Download {
        kind: AttachmentKind,
        direct_path: String,
    },
    ProfilePictureInfo {
        jid: String,
        existing_id: Option<String>,
    },
    SendPresence(PresenceState),
    Disconnect,
    Upload {
        kind: AttachmentKind,
        size: usize,
    },
    SendMessage {
        chat: String,
        message: OutgoingMessage,
    },
    SendEdit {
        chat: String,
        message_id: String,
        message: OutgoingMessage,
    },
    MarkRead {
        ids: Vec<String>,
        chat: String,
        sender: String,
        receipt: ReadReceipt,
    },
    AllContacts,
}

enum PictureScript {
    Info(ProfilePictureInfo),
    Fail,
}

/// A transport whose answers are set up ahead of time.
pub struct MockTransport {
    own_jid: Jid,
    downloads: Mutex<HashMap<String, Vec<u8>>>,
    pictures: Mutex<HashMap<String, PictureScript>>,
    contacts: Mutex<Vec<StoredContact>>,
    fail_presence: bool,
    fail_send: bool,
    calls: Mutex<Vec<TransportCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            own_jid: fixtures::own_jid(),
            downloads: Mutex::new(HashMap::new()),
            pictures: Mutex::new(HashMap::new()),
            contacts: Mutex::new(Vec::new()),
            fail_presence: false,
            fail_send: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serve `bytes` for media whose direct path is `direct_path`.
    pub fn with_download(self, direct_path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.downloads
            .lock()
            .unwrap()
            .insert(direct_path.to_string(), bytes.into());
        self
    }

    /// Report a profile picture for `jid`.
    pub fn with_picture(self, jid: &str, id: &str, url: &str) -> Self {
        self.pictures.lock().unwrap().insert(
            jid.to_string(),
            PictureScript::Info(ProfilePictureInfo {
                id: id.to_string(),
                url: url.to_string(),
            }),
        );
        self
    }

    /// Make the profile picture query for `jid` fail.
    pub fn with_picture_error(self, jid: &str) -> Self {
        self.pictures
            .lock()
            .unwrap()
            .insert(jid.to_string(), PictureScript::Fail);
        self
    }

    pub fn with_contacts(self, contacts: Vec<StoredContact>) -> Self {
        *self.contacts.lock().unwrap() = contacts;
        self
    }

    pub fn failing_presence(mut self) -> Self {
        self.fail_presence = true;
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of sends (messages and edits) so far.
    pub fn send_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, TransportCall::SendMessage { .. } | TransportCall::SendEdit { .. }))
            .count()
    }

    /// Timestamp stamped on every send receipt.
    pub fn sent_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 2, 12, 0, 0).unwrap()
    }

    fn record(&self, call: TransportCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn receipt(&self) -> Result<SendReceipt, BridgeError> {
        if self.fail_send {
            return Err(BridgeError::Send {
                message: "mock send rejected".to_string(),
                source: None,
            });
        }
        Ok(SendReceipt {
            id: format!("SENT{}", self.send_count()),
            sender: self.own_jid.clone(),
            timestamp: Self::sent_at(),
        })
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn download(
        &self,
        kind: AttachmentKind,
        media: &MediaDescriptor,
    ) -> Result<Vec<u8>, BridgeError> {
        let direct_path = media.direct_path.clone().unwrap_or_default();
        self.record(TransportCall::Download {
            kind,
            direct_path: direct_path.clone(),
        });
        self.downloads
            .lock()
            .unwrap()
            .get(&direct_path)
            .cloned()
            .ok_or_else(|| BridgeError::Download {
                message: format!("no scripted media at {direct_path:?}"),
                source: None,
            })
    }

    async fn profile_picture_info(
        &self,
        jid: &Jid,
        existing_id: Option<&str>,
    ) -> Result<Option<ProfilePictureInfo>, BridgeError> {
        let key = jid.to_string();
        self.record(TransportCall::ProfilePictureInfo {
            jid: key.clone(),
            existing_id: existing_id.map(str::to_string),
        });
        match self.pictures.lock().unwrap().get(&key) {
            Some(PictureScript::Info(info)) if Some(info.id.as_str()) == existing_id => Ok(None),
            Some(PictureScript::Info(info)) => Ok(Some(info.clone())),
            Some(PictureScript::Fail) => Err(BridgeError::Transport {
                message: "profile picture query failed".to_string(),
                source: None,
            }),
            None => Ok(None),
        }
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

    async fn send_presence(&self, state: PresenceState) -> Result<(), BridgeError> {
        self.record(TransportCall::SendPresence(state));
        if self.fail_presence {
            return Err(BridgeError::Transport {
                message: "presence rejected".to_string(),
                source: None,
            });
        }
        Ok(())
    }

    async fn disconnect(&self) {
        self.record(TransportCall::Disconnect);
    }

    async fn upload(
        &self,
        data: Vec<u8>,
        kind: AttachmentKind,
    ) -> Result<UploadedMedia, BridgeError> {
        self.record(TransportCall::Upload {
            kind,
            size: data.len(),
        });
        Ok(UploadedMedia {
            url: format!("https://mmg.example.net/{kind}"),
            direct_path: format!("/v/{kind}"),
            file_length: data.len() as u64,
            ..UploadedMedia::default()
        })
    }

    async fn send_message(
        &self,
        chat: &Jid,
        message: OutgoingMessage,
    ) -> Result<SendReceipt, BridgeError> {
        self.record(TransportCall::SendMessage {
            chat: chat.to_string(),
            message,
        });
        self.receipt()
    }

    async fn send_edit(
        &self,
        chat: &Jid,
        message_id: &str,
        message: OutgoingMessage,
    ) -> Result<SendReceipt, BridgeError> {
        self.record(TransportCall::SendEdit {
            chat: chat.to_string(),
            message_id: message_id.to_string(),
            message,
        });
        self.receipt()
    }

    async fn mark_read(
        &self,
        message_ids: &[String],
        _when: DateTime<Utc>,
        chat: &Jid,
        sender: &Jid,
        receipt: ReadReceipt,
    ) -> Result<(), BridgeError> {
        self.record(TransportCall::MarkRead {
            ids: message_ids.to_vec(),
            chat: chat.to_string(),
            sender: sender.to_string(),
            receipt,
        });
        Ok(())
    }

    async fn all_contacts(&self) -> Result<Vec<StoredContact>, BridgeError> {
        self.record(TransportCall::AllContacts);
        Ok(self.contacts.lock().unwrap().clone())
    }
}
