// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event normalization for wabridge.
//!
//! [`EventRouter`] consumes raw transport events and delivers Contact,
//! Message, Call, and User records to an [`EventSink`](wabridge_core::EventSink).
//! The per-event mappings live in their own modules and are pure apart from
//! [`message`], which stores attachments. [`Outbox`] covers the opposite
//! direction.

pub mod call;
pub mod connection;
pub mod contact;
pub mod history;
pub mod message;
pub mod outbound;
pub mod receipt;
pub mod router;

pub use connection::Transition;
pub use message::MessageNormalizer;
pub use outbound::Outbox;
pub use receipt::ReceiptOutcome;
pub use router::EventRouter;
