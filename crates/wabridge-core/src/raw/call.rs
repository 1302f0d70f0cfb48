// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call signaling events.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::jid::Jid;

/// Fields shared by every call signaling event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallMeta {
    pub from: Jid,
    pub timestamp: DateTime<Utc>,
    pub call_creator: Jid,
    #[serde(rename = "CallID")]
    pub call_id: String,
}

/// Offer notice, which additionally states the media and call type as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallOfferNoticeEvent {
    #[serde(flatten)]
    pub meta: CallMeta,
    #[serde(default)]
    pub media: String,
    #[serde(rename = "Type", default)]
    pub call_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallTerminateEvent {
    #[serde(flatten)]
    pub meta: CallMeta,
    #[serde(default)]
    pub reason: String,
}
