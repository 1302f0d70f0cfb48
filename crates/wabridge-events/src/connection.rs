// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lifecycle events as status changes.

use wabridge_core::raw::connection::format_duration;
use wabridge_core::raw::{
    CatRefreshErrorEvent, ConnectFailureEvent, StreamErrorEvent, TemporaryBanEvent,
};
use wabridge_core::{ConnStatus, ConnectionError};

/// What the consumer is told about a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: ConnStatus,
    /// Delivered through the Error callback right after the status.
    pub error: Option<ConnectionError>,
}

impl Transition {
    pub fn status(status: ConnStatus) -> Self {
        Self {
            status,
            error: None,
        }
    }

    pub fn fault(error: ConnectionError) -> Self {
        Self {
            status: ConnStatus::Error,
            error: Some(error),
        }
    }
}

pub fn temporary_ban(evt: &TemporaryBanEvent) -> Transition {
    Transition::fault(ConnectionError::TemporaryBan {
        reason: evt.code,
        expires: format_duration(evt.expires_in()),
    })
}

/// Logout codes end the session instead of reporting a fault.
pub fn connect_failure(evt: &ConnectFailureEvent) -> Transition {
    if evt.reason.is_logged_out() {
        return Transition::status(ConnStatus::LoggedOut);
    }
    Transition::fault(ConnectionError::ConnectFailure {
        message: evt.message.clone(),
        reason: evt.reason,
    })
}

pub fn cat_refresh(evt: &CatRefreshErrorEvent) -> Transition {
    Transition::fault(ConnectionError::CatRefresh(evt.error.clone()))
}

pub fn stream_error(evt: &StreamErrorEvent) -> Transition {
    Transition::fault(ConnectionError::Stream {
        code: evt.code.clone(),
    })
}
