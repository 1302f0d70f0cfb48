// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for wabridge integration tests.
//!
//! # Components
//!
//! - [`MockTransport`] - scripted transport that records every call
//! - [`RecordingSink`] - event sink capturing callbacks in delivery order
//! - [`fixtures`] - JIDs and raw event payloads shared across suites

pub mod fixtures;
pub mod mock_transport;
pub mod recording_sink;

pub use mock_transport::{MockTransport, TransportCall};
pub use recording_sink::{Emitted, RecordingSink};
