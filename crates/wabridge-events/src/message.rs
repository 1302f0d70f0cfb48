// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message content extraction.
//!
//! A message event is flattened into one [`Message`] by walking its content
//! kinds in a fixed order. Later text-bearing kinds overwrite the content body
//! set by earlier ones, so an attachment caption only survives when nothing
//! else in the message carries text.

use std::sync::Arc;

use tracing::{debug, warn};
use wabridge_core::Transport;
use wabridge_core::raw::message::{
    CallLogKind, CallLogMessage, CallOutcome, GroupInviteMessage, MediaDescriptor,
};
use wabridge_core::raw::{AttachmentKind, ContentKind, MessageEvent};
use wabridge_core::types::{CallLogOutcome, CallLogType, Message};
use wabridge_media::{AttachmentStore, MimeRegistry};

/// Turns transport message events into domain messages, storing attachments
/// along the way.
pub struct MessageNormalizer {
    transport: Arc<dyn Transport>,
    store: Arc<AttachmentStore>,
    mime: MimeRegistry,
}

impl MessageNormalizer {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<AttachmentStore>, mime: MimeRegistry) -> Self {
        Self {
            transport,
            store,
            mime,
        }
    }

    /// Build the message for `evt`, or `None` when the event has no content.
    ///
    /// Attachment failures are logged and drop only the attachment concerned.
    pub async fn normalize(&self, evt: &MessageEvent) -> Option<Message> {
        let content = evt.message.as_ref()?;
        let info = &evt.info;

        let mut message = Message {
            timestamp: Some(info.timestamp),
            message_id: info.id.clone(),
            chat_jid: info.source.chat.to_string(),
            sender_jid: Some(info.source.sender.to_string()),
            is_from_me: Some(info.source.is_from_me),
            message_type: Some(info.message_type.clone()).filter(|t| !t.is_empty()),
            ..Message::default()
        };

        for kind in content.kinds() {
            self.apply(&mut message, kind).await;
        }

        Some(message)
    }

    async fn apply(&self, message: &mut Message, kind: ContentKind<'_>) {
        match kind {
            ContentKind::Image(m) => {
                set_caption(message, m.caption.as_deref());
                self.download(message, AttachmentKind::Image, &m.media).await;
            }
            ContentKind::Audio(m) => {
                self.download(message, AttachmentKind::Audio, &m.media).await;
            }
            ContentKind::Video(m) => {
                set_caption(message, m.caption.as_deref());
                self.download(message, AttachmentKind::Video, &m.media).await;
            }
            ContentKind::Document(m) => {
                set_caption(message, m.caption.as_deref());
                self.download(message, AttachmentKind::Document, &m.media).await;
            }
            ContentKind::Sticker(m) => {
                self.download(message, AttachmentKind::Sticker, &m.media).await;
                self.thumbnail(message, m.png_thumbnail.as_deref(), ".png").await;
            }
            ContentKind::Conversation(text) => {
                message.content_body = Some(text.to_string());
            }
            ContentKind::Contact(m) => {
                message.contact_vcard = m.vcard.clone();
                message.contact_display_name = m.display_name.clone();
            }
            ContentKind::Location(m) => {
                message.location_lat = m.degrees_latitude;
                message.location_lon = m.degrees_longitude;
                message.location_name = m.name.clone();
                message.location_address = m.address.clone();
                message.location_url = m.url.clone();
                message.location_is_live = m.is_live;
                message.location_accuracy_in_meters = m.accuracy_in_meters;
                message.location_comment = m.comment.clone();
            }
            ContentKind::ExtendedText(m) => {
                self.thumbnail(message, m.jpeg_thumbnail.as_deref(), ".jpeg").await;
                if let Some(text) = &m.text {
                    message.content_body = Some(text.clone());
                }
                if let Some(quoted) = m.context_info.as_ref().and_then(|c| c.stanza_id.clone()) {
                    message.info_quoted_message_id = Some(quoted);
                }
            }
            ContentKind::LiveLocation(m) => {
                message.location_lat = m.degrees_latitude;
                message.location_lon = m.degrees_longitude;
                message.location_accuracy_in_meters = m.accuracy_in_meters;
                message.location_comment = m.caption.clone();
                message.location_is_live = Some(true);
            }
            ContentKind::GroupInvite(m) => {
                message.content_body = Some(group_invite_summary(m));
                self.thumbnail(message, m.jpeg_thumbnail.as_deref(), ".jpeg").await;
            }
            ContentKind::Reaction(m) => {
                // An empty reaction text means the reaction was withdrawn.
                message.content_body = m.text.clone();
                let key = m.key.as_ref();
                message.info_quoted_message_id = key.and_then(|k| k.id.clone());
                message.info_remote_jid = key.and_then(|k| k.remote_jid.clone());
                message.info_participant = key.and_then(|k| k.participant.clone());
            }
            ContentKind::CallLog(m) => apply_call_log(message, m),
            ContentKind::Unsupported(name) => {
                warn!(
                    message_id = %message.message_id,
                    kind = name,
                    "message content kind not implemented"
                );
            }
        }
    }

    async fn download(&self, message: &mut Message, kind: AttachmentKind, media: &MediaDescriptor) {
        let bytes = match self.transport.download(kind, media).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    message_id = %message.message_id,
                    kind = %kind,
                    error = %e,
                    "failed to download attachment"
                );
                return;
            }
        };
        if bytes.is_empty() {
            debug!(message_id = %message.message_id, kind = %kind, "empty attachment skipped");
            return;
        }

        let ext = self.mime.resolve(kind, media.mimetype.as_deref());
        self.store_attachment(message, &bytes, ext).await;
    }

    async fn thumbnail(&self, message: &mut Message, bytes: Option<&[u8]>, ext: &str) {
        if let Some(bytes) = bytes.filter(|b| !b.is_empty()) {
            self.store_attachment(message, bytes, Some(ext)).await;
        }
    }

    async fn store_attachment(&self, message: &mut Message, bytes: &[u8], ext: Option<&str>) {
        match self.store.materialize(bytes, ext).await {
            Ok(name) => message.attachments.push(name),
            Err(e) => warn!(
                message_id = %message.message_id,
                error = %e,
                "failed to store attachment"
            ),
        }
    }
}

fn set_caption(message: &mut Message, caption: Option<&str>) {
    if let Some(caption) = caption.filter(|c| !c.is_empty()) {
        message.content_body = Some(caption.to_string());
    }
}

/// Human-readable rendering of a group invite.
pub fn group_invite_summary(invite: &GroupInviteMessage) -> String {
    let mut summary = String::from("**Group Invite**\n");
    if let Some(jid) = &invite.group_jid {
        summary.push_str(&format!("\nGroupJID: {jid}"));
    }
    if let Some(code) = &invite.invite_code {
        summary.push_str(&format!("\nInviteCode: {code}"));
    }
    if let Some(expiration) = invite.invite_expiration {
        summary.push_str(&format!("\nInviteExpiration: {expiration}"));
    }
    if let Some(name) = &invite.group_name {
        summary.push_str(&format!("\nGroupName: {name}"));
    }
    if let Some(caption) = &invite.caption {
        summary.push_str(&format!("\nCaption: {caption}"));
    }
    summary
}

fn apply_call_log(message: &mut Message, log: &CallLogMessage) {
    message.call_log_outcome = log.call_outcome.and_then(call_log_outcome);
    message.call_log_type = log.call_type.and_then(call_log_type);
    message.call_log_duration_seconds = log.duration_secs;
    message.call_log_participant_jids = log
        .participants
        .iter()
        .filter_map(|p| p.jid.clone())
        .collect();
}

fn call_log_outcome(outcome: CallOutcome) -> Option<CallLogOutcome> {
    Some(match outcome {
        CallOutcome::Connected => CallLogOutcome::Connected,
        CallOutcome::Missed => CallLogOutcome::Missed,
        CallOutcome::Failed => CallLogOutcome::Failed,
        CallOutcome::Rejected => CallLogOutcome::Rejected,
        CallOutcome::AcceptedElsewhere => CallLogOutcome::Accepted,
        CallOutcome::Ongoing => CallLogOutcome::Ongoing,
        CallOutcome::SilencedByDnd | CallOutcome::SilencedUnknownCaller => CallLogOutcome::Silenced,
        CallOutcome::Unrecognized(_) => return None,
    })
}

fn call_log_type(kind: CallLogKind) -> Option<CallLogType> {
    match kind {
        CallLogKind::Regular => Some(CallLogType::Regular),
        CallLogKind::ScheduledCall => Some(CallLogType::Scheduled),
        CallLogKind::VoiceChat => Some(CallLogType::VoiceChat),
        CallLogKind::Unrecognized(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wabridge_core::raw::message::CallLogParticipant;

    #[test]
    fn invite_summary_lists_present_fields_in_order() {
        let invite = GroupInviteMessage {
            group_jid: Some("120363000000000000@g.us".to_string()),
            invite_code: Some("AbC123".to_string()),
            invite_expiration: Some(1746400000),
            group_name: Some("Climbing".to_string()),
            caption: None,
            jpeg_thumbnail: None,
        };
        assert_eq!(
            group_invite_summary(&invite),
            "**Group Invite**\n\nGroupJID: 120363000000000000@g.us\nInviteCode: AbC123\nInviteExpiration: 1746400000\nGroupName: Climbing"
        );
        assert_eq!(group_invite_summary(&GroupInviteMessage::default()), "**Group Invite**\n");
    }

    #[test]
    fn call_log_translates_codes() {
        let mut message = Message::default();
        apply_call_log(
            &mut message,
            &CallLogMessage {
                is_video: Some(false),
                call_outcome: Some(CallOutcome::SilencedUnknownCaller),
                duration_secs: Some(42),
                call_type: Some(CallLogKind::VoiceChat),
                participants: vec![
                    CallLogParticipant {
                        jid: Some("1@s.whatsapp.net".to_string()),
                        call_outcome: Some(CallOutcome::Missed),
                    },
                    CallLogParticipant::default(),
                ],
            },
        );
        assert_eq!(message.call_log_outcome, Some(CallLogOutcome::Silenced));
        assert_eq!(message.call_log_type, Some(CallLogType::VoiceChat));
        assert_eq!(message.call_log_duration_seconds, Some(42));
        assert_eq!(message.call_log_participant_jids, vec!["1@s.whatsapp.net"]);
    }

    #[test]
    fn unrecognized_call_codes_are_unset() {
        assert_eq!(call_log_outcome(CallOutcome::Unrecognized(99)), None);
        assert_eq!(call_log_type(CallLogKind::Unrecognized(7)), None);
    }
}
