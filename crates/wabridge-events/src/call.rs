// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call signaling events.

use std::str::FromStr;

use wabridge_core::raw::{CallMeta, CallOfferNoticeEvent, CallTerminateEvent};
use wabridge_core::types::{Call, CallMedia, CallStatus, CallType};

/// The common part of every call event.
pub fn signal(meta: &CallMeta, status: CallStatus) -> Call {
    Call {
        timestamp: meta.timestamp,
        call_id: meta.call_id.clone(),
        from: meta.from.to_string(),
        call_creator: meta.call_creator.to_string(),
        status,
        media: None,
        call_type: None,
        terminate_reason: None,
    }
}

/// An offer notice. Media and type are kept only when recognised.
pub fn offer_notice(evt: &CallOfferNoticeEvent) -> Call {
    Call {
        media: CallMedia::from_str(&evt.media).ok(),
        call_type: CallType::from_str(&evt.call_type).ok(),
        ..signal(&evt.meta, CallStatus::Offer)
    }
}

pub fn terminate(evt: &CallTerminateEvent) -> Call {
    Call {
        terminate_reason: Some(evt.reason.clone()).filter(|r| !r.is_empty()),
        ..signal(&evt.meta, CallStatus::Terminate)
    }
}
