// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media handling for wabridge.
//!
//! Attachment bytes are written once into a flat directory under a name
//! derived from their content. The same store backs profile photos pulled by
//! [`ProfilePhotoBridge`].

pub mod mime;
pub mod photo;
pub mod store;

pub use mime::{MimeRegistry, outbound_media};
pub use photo::ProfilePhotoBridge;
pub use store::{AttachmentStore, WriteOutcome, content_address, write_if_absent};
