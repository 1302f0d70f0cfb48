// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile photo bridge against a mock HTTP server.

use std::sync::Arc;

use wabridge_core::{BridgeError, MemoryPhotoIdStore, PhotoIdStore};
use wabridge_media::{AttachmentStore, ProfilePhotoBridge, content_address};
use wabridge_test_utils::fixtures::peer_jid;
use wabridge_test_utils::{MockTransport, TransportCall};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Setup {
    bridge: ProfilePhotoBridge,
    transport: Arc<MockTransport>,
    ids: Arc<MemoryPhotoIdStore>,
    dir: tempfile::TempDir,
}

fn setup(transport: MockTransport) -> Setup {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(transport);
    let ids = Arc::new(MemoryPhotoIdStore::new());
    let store = Arc::new(AttachmentStore::new(dir.path()));
    let bridge = ProfilePhotoBridge::new(transport.clone(), ids.clone(), store);
    Setup {
        bridge,
        transport,
        ids,
        dir,
    }
}

#[tokio::test]
async fn new_photo_is_stored_and_id_remembered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pp/peer.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let peer = peer_jid().to_string();
    let url = format!("{}/pp/peer.jpg", server.uri());
    let s = setup(MockTransport::new().with_picture(&peer, "pic-1", &url));

    let name = s.bridge.pull(&peer_jid()).await.unwrap();
    assert_eq!(name.as_deref(), Some(content_address(b"jpeg-bytes").as_str()));
    assert_eq!(
        std::fs::read(s.dir.path().join(name.unwrap())).unwrap(),
        b"jpeg-bytes"
    );
    assert_eq!(s.ids.lookup(&peer_jid()).as_deref(), Some("pic-1"));

    // Second pull passes the known id and the transport reports no change.
    assert_eq!(s.bridge.pull(&peer_jid()).await.unwrap(), None);
    assert_eq!(
        s.transport.calls().last(),
        Some(&TransportCall::ProfilePictureInfo {
            jid: peer,
            existing_id: Some("pic-1".to_string()),
        })
    );
}

#[tokio::test]
async fn missing_picture_is_nothing_new() {
    let s = setup(MockTransport::new());
    assert_eq!(s.bridge.pull(&peer_jid()).await.unwrap(), None);
    assert!(s.ids.is_empty());
}

#[tokio::test]
async fn failed_query_is_nothing_new() {
    let s = setup(MockTransport::new().with_picture_error(&peer_jid().to_string()));
    assert_eq!(s.bridge.pull(&peer_jid()).await.unwrap(), None);
    assert!(s.ids.is_empty());
}

#[tokio::test]
async fn http_error_keeps_previous_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let peer = peer_jid().to_string();
    let s = setup(MockTransport::new().with_picture(&peer, "pic-2", &format!("{}/gone", server.uri())));
    s.ids.store(&peer_jid(), "pic-1");

    match s.bridge.pull(&peer_jid()).await {
        Err(BridgeError::Download { message, .. }) => assert!(message.contains("404")),
        other => panic!("expected download error, got {other:?}"),
    }
    assert_eq!(s.ids.lookup(&peer_jid()).as_deref(), Some("pic-1"));
}

#[tokio::test]
async fn storage_failure_does_not_advance_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
        .mount(&server)
        .await;

    let peer = peer_jid().to_string();
    let transport = Arc::new(MockTransport::new().with_picture(&peer, "pic-9", &server.uri()));
    let ids = Arc::new(MemoryPhotoIdStore::new());
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(AttachmentStore::new(dir.path().join("not-created")));
    let bridge = ProfilePhotoBridge::new(transport, ids.clone(), store);

    assert!(matches!(
        bridge.pull(&peer_jid()).await,
        Err(BridgeError::Storage { .. })
    ));
    assert!(ids.lookup(&peer_jid()).is_none());
}
