// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for wabridge.
//!
//! This crate holds the domain records consumers receive, the typed model of
//! raw transport events, the JID type, error types, and the traits at the
//! bridge's seams. Every other wabridge crate builds on it.

pub mod error;
pub mod jid;
pub mod raw;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BridgeError, ConnectionError};
pub use jid::Jid;
pub use raw::RawEvent;
pub use types::{
    Call, CallLogOutcome, CallLogType, CallMedia, CallStatus, CallType, ConnStatus, Contact,
    Group, GroupParticipant, Message, MessageStatus, ParticipantRank, User,
};

pub use traits::{EventSink, MemoryPhotoIdStore, PhotoIdStore, Transport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_error_variants_render() {
        let jid = BridgeError::InvalidJid {
            value: "a@b@c".into(),
            reason: "unexpected number of `@` separators".into(),
        };
        assert_eq!(
            jid.to_string(),
            "invalid JID `a@b@c`: unexpected number of `@` separators"
        );

        let storage = BridgeError::storage("write /tmp/x", std::io::Error::other("disk full"));
        assert_eq!(storage.to_string(), "storage error: write /tmp/x: disk full");

        let download = BridgeError::Download {
            message: "HTTP 404".into(),
            source: None,
        };
        assert_eq!(download.to_string(), "download error: HTTP 404");
    }

    #[test]
    fn connection_errors_render_reasons() {
        use crate::raw::{ConnectFailureReason, TempBanReason};

        assert_eq!(ConnectionError::ClientOutdated.to_string(), "update is required");
        assert_eq!(
            ConnectionError::Stream { code: "515".into() }.to_string(),
            "stream error: 515"
        );
        assert_eq!(
            ConnectionError::TemporaryBan {
                reason: TempBanReason(102),
                expires: "1h0m0s".into(),
            }
            .to_string(),
            "client has been temporarily banned: 102: too many people blocked you (expires in 1h0m0s)"
        );
        assert_eq!(
            ConnectionError::ConnectFailure {
                message: "bad".into(),
                reason: ConnectFailureReason::GENERIC,
            }
            .to_string(),
            "failed to connect: bad (400: generic error)"
        );
    }

    #[test]
    fn all_seam_traits_are_object_safe() {
        fn _transport(_: &dyn Transport) {}
        fn _sink(_: &dyn EventSink) {}
        fn _photos(_: &dyn PhotoIdStore) {}
    }
}
