// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared identifiers and event builders.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use wabridge_core::jid::{DEFAULT_USER_SERVER, GROUP_SERVER};
use wabridge_core::{Jid, RawEvent};

/// The logged-in account.
pub fn own_jid() -> Jid {
    Jid::new("15550100", DEFAULT_USER_SERVER)
}

/// A one-to-one peer.
pub fn peer_jid() -> Jid {
    Jid::new("123456789", DEFAULT_USER_SERVER)
}

pub fn group_jid() -> Jid {
    Jid::new("120363000000000000", GROUP_SERVER)
}

/// 2025-05-02T11:13:28Z, the timestamp used across fixtures.
pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 2, 11, 13, 28).unwrap()
}

/// Decode a raw event from its transport type name and JSON payload.
///
/// # Panics
///
/// If the payload does not match the kind.
pub fn raw(kind: &str, data: Value) -> RawEvent {
    RawEvent::decode(kind, data).unwrap_or_else(|e| panic!("bad {kind} fixture: {e}"))
}

/// A `Message` event from the peer with the given id and content JSON.
pub fn message(id: &str, content: Value) -> RawEvent {
    raw(
        "Message",
        serde_json::json!({
            "Info": {
                "Chat": peer_jid().to_string(),
                "Sender": peer_jid().to_string(),
                "IsFromMe": false,
                "IsGroup": false,
                "ID": id,
                "Type": "text",
                "PushName": "Peer",
                "Timestamp": "2025-05-02T11:13:28Z"
            },
            "Message": content
        }),
    )
}
