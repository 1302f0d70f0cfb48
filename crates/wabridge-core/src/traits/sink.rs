// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consumer callbacks.

use crate::error::ConnectionError;
use crate::types::{Call, ConnStatus, Contact, Message, User};

/// The fixed callback set the bridge delivers into.
///
/// Callbacks are invoked synchronously from inside event handling, in the
/// order the underlying events arrived. Implementations should return quickly.
pub trait EventSink: Send + Sync {
    /// A pairing code to render as a QR code.
    fn qr_code(&self, code: &str);

    fn conn_status(&self, status: ConnStatus);

    /// A transport fault. Always preceded by the matching status.
    fn error(&self, error: ConnectionError);

    fn contact(&self, contact: Contact);

    fn message(&self, message: Message);

    fn call(&self, call: Call);

    fn user(&self, user: User);
}
