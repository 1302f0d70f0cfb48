// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the wabridge event-normalization layer.

use thiserror::Error;

use crate::raw::{ConnectFailureReason, TempBanReason};

/// The primary error type used across wabridge seams and operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Configuration errors (missing media directory, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A transport call failed (presence, profile picture query, contact store).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Fetching attachment or profile photo bytes failed.
    #[error("download error: {message}")]
    Download {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Media directory errors (create, write, read).
    #[error("storage error: {message}: {source}")]
    Storage {
        message: String,
        source: std::io::Error,
    },

    /// A JID string could not be parsed.
    #[error("invalid JID `{value}`: {reason}")]
    InvalidJid { value: String, reason: String },

    /// Outbound send, edit, or receipt failed.
    #[error("send error: {message}")]
    Send {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A raw event payload did not match its declared kind.
    #[error("malformed `{kind}` event: {source}")]
    Decode {
        kind: String,
        source: serde_json::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Transport faults surfaced to the consumer through the Error callback.
///
/// None of these are recoverable by the bridge; they accompany a
/// `ConnStatus::Error` (or, for logout codes, `ConnStatus::LoggedOut`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("stream has been replaced: another client connected with the same session")]
    StreamReplaced,

    #[error("client has been temporarily banned: {reason} (expires in {expires})")]
    TemporaryBan {
        reason: TempBanReason,
        expires: String,
    },

    #[error("failed to connect: {message} ({reason})")]
    ConnectFailure {
        message: String,
        reason: ConnectFailureReason,
    },

    #[error("update is required")]
    ClientOutdated,

    #[error("{0}")]
    CatRefresh(String),

    #[error("stream error: {code}")]
    Stream { code: String },
}

impl BridgeError {
    /// Wrap an I/O error with the path or operation it concerns.
    pub fn storage(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }
}
