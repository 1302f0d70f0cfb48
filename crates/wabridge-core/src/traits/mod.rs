// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seams between the bridge and its collaborators.
//!
//! [`Transport`] is the messaging client the bridge reads from and calls
//! into. [`EventSink`] is the consumer's callback set. [`PhotoIdStore`] is the
//! externally owned "last known profile photo id" capability.

pub mod photo;
pub mod sink;
pub mod transport;

pub use photo::{MemoryPhotoIdStore, PhotoIdStore};
pub use sink::EventSink;
pub use transport::Transport;
