// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde helpers for binary payload fields, which travel as standard base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional base64 string into bytes.
pub fn option<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
        .transpose()
}
