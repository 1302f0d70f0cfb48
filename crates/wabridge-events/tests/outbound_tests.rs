// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use wabridge_core::raw::{AttachmentKind, OutgoingMessage, ReadReceipt};
use wabridge_core::{BridgeError, Message};
use wabridge_events::Outbox;
use wabridge_media::AttachmentStore;
use wabridge_test_utils::fixtures::{self, peer_jid};
use wabridge_test_utils::{MockTransport, RecordingSink, TransportCall};

struct Setup {
    outbox: Outbox,
    transport: Arc<MockTransport>,
    sink: Arc<RecordingSink>,
    media: tempfile::TempDir,
}

fn setup(transport: MockTransport) -> Setup {
    let media = tempfile::tempdir().unwrap();
    let transport = Arc::new(transport);
    let sink = Arc::new(RecordingSink::new());
    let outbox = Outbox::new(
        transport.clone(),
        sink.clone(),
        Arc::new(AttachmentStore::new(media.path())),
    );
    Setup {
        outbox,
        transport,
        sink,
        media,
    }
}

fn draft(body: Option<&str>) -> Message {
    Message {
        content_body: body.map(str::to_string),
        ..Message::keyed("", peer_jid().to_string())
    }
}

#[tokio::test]
async fn text_message_gets_transport_identity() {
    let s = setup(MockTransport::new());
    let sent = s.outbox.send_message(draft(Some("hello")), false).await.unwrap();

    assert_eq!(sent.message_id, "SENT1");
    assert_eq!(sent.sender_jid, Some(fixtures::own_jid().to_string()));
    assert_eq!(sent.timestamp, Some(MockTransport::sent_at()));
    assert_eq!(
        s.transport.calls(),
        vec![TransportCall::SendMessage {
            chat: peer_jid().to_string(),
            message: OutgoingMessage::Text("hello".into()),
        }]
    );
    assert!(s.sink.is_empty());
}

#[tokio::test]
async fn echo_delivers_the_sent_message() {
    let s = setup(MockTransport::new());
    let sent = s.outbox.send_message(draft(Some("hello")), true).await.unwrap();
    assert_eq!(s.sink.messages(), vec![sent]);
}

#[tokio::test]
async fn first_attachment_is_uploaded_with_caption() {
    let s = setup(MockTransport::new());
    std::fs::write(s.media.path().join("photo.JPG"), b"jpeg").unwrap();
    std::fs::write(s.media.path().join("second.png"), b"png").unwrap();

    let mut message = draft(Some("look"));
    message.attachments = vec!["photo.JPG".into(), "second.png".into()];
    s.outbox.send_message(message, false).await.unwrap();

    let calls = s.transport.calls();
    assert_eq!(
        calls[0],
        TransportCall::Upload {
            kind: AttachmentKind::Image,
            size: 4
        }
    );
    let TransportCall::SendMessage {
        message: OutgoingMessage::Media(media),
        ..
    } = &calls[1]
    else {
        panic!("expected a media send, got {:?}", calls[1]);
    };
    assert_eq!(media.mimetype, "image/jpeg");
    assert_eq!(media.caption.as_deref(), Some("look"));
    assert_eq!(media.upload.url, "https://mmg.example.net/image");
    assert_eq!(calls.len(), 2);
}

#[tokio::test]
async fn audio_is_sent_without_caption() {
    let s = setup(MockTransport::new());
    std::fs::write(s.media.path().join("note.mp3"), b"id3").unwrap();

    let mut message = draft(Some("ignored"));
    message.attachments = vec!["note.mp3".into()];
    s.outbox.send_message(message, false).await.unwrap();

    match &s.transport.calls()[1] {
        TransportCall::SendMessage {
            message: OutgoingMessage::Media(media),
            ..
        } => {
            assert_eq!(media.kind, AttachmentKind::Audio);
            assert_eq!(media.mimetype, "audio/mpeg");
            assert_eq!(media.caption, None);
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn attachment_without_extension_is_rejected_before_upload() {
    let s = setup(MockTransport::new());
    let mut message = draft(None);
    message.attachments = vec!["README".into()];

    let err = s.outbox.send_message(message, true).await.unwrap_err();
    assert!(err.to_string().contains("no extension"), "{err}");
    assert!(s.transport.calls().is_empty());
    assert!(s.sink.is_empty());
}

#[tokio::test]
async fn missing_attachment_file_is_a_storage_error() {
    let s = setup(MockTransport::new());
    let mut message = draft(None);
    message.attachments = vec!["gone.pdf".into()];

    let err = s.outbox.send_message(message, false).await.unwrap_err();
    assert!(matches!(err, BridgeError::Storage { .. }), "{err:?}");
}

#[tokio::test]
async fn unknown_extension_is_rejected() {
    let s = setup(MockTransport::new());
    std::fs::write(s.media.path().join("tool.exe"), b"MZ").unwrap();
    let mut message = draft(None);
    message.attachments = vec!["tool.exe".into()];

    let err = s.outbox.send_message(message, false).await.unwrap_err();
    assert!(err.to_string().contains("exe"));
    assert!(s.transport.calls().is_empty());
}

#[tokio::test]
async fn text_without_body_or_bad_chat_fails() {
    let s = setup(MockTransport::new());
    assert!(s.outbox.send_message(draft(None), false).await.is_err());

    let mut bad_chat = draft(Some("hi"));
    bad_chat.chat_jid = "a@b@c".into();
    assert!(matches!(
        s.outbox.send_message(bad_chat, false).await,
        Err(BridgeError::InvalidJid { .. })
    ));
    assert_eq!(s.transport.send_count(), 0);
}

#[tokio::test]
async fn send_failure_is_not_echoed() {
    let s = setup(MockTransport::new().failing_send());
    let err = s.outbox.send_message(draft(Some("hello")), true).await.unwrap_err();
    assert!(matches!(err, BridgeError::Send { .. }));
    assert!(s.sink.is_empty());
}

#[tokio::test]
async fn edit_requires_message_id() {
    let s = setup(MockTransport::new());
    assert!(s.outbox.send_edit(&draft(Some("fixed"))).await.is_err());

    let mut edit = draft(Some("fixed"));
    edit.message_id = "M7".into();
    s.outbox.send_edit(&edit).await.unwrap();
    assert_eq!(
        s.transport.calls(),
        vec![TransportCall::SendEdit {
            chat: peer_jid().to_string(),
            message_id: "M7".into(),
            message: OutgoingMessage::Text("fixed".into()),
        }]
    );
}

#[tokio::test]
async fn read_and_played_receipts() {
    let s = setup(MockTransport::new());
    let ids = vec!["A".to_string(), "B".to_string()];
    let chat = peer_jid().to_string();

    s.outbox
        .send_read(&ids, fixtures::timestamp(), &chat, &chat)
        .await
        .unwrap();
    s.outbox
        .send_played(&ids[..1], fixtures::timestamp(), &chat, &chat)
        .await
        .unwrap();

    assert_eq!(
        s.transport.calls(),
        vec![
            TransportCall::MarkRead {
                ids: ids.clone(),
                chat: chat.clone(),
                sender: chat.clone(),
                receipt: ReadReceipt::Read,
            },
            TransportCall::MarkRead {
                ids: vec!["A".into()],
                chat: chat.clone(),
                sender: chat.clone(),
                receipt: ReadReceipt::Played,
            },
        ]
    );

    assert!(s.outbox.send_read(&ids, fixtures::timestamp(), &chat, "").await.is_err());
}
