// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the wabridge event bridge.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level wabridge configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WabridgeConfig {
    /// Account and session store settings.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Attachment store settings.
    #[serde(default)]
    pub media: MediaConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Account identity and the transport's session store.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Phone number or user part of the logged-in account.
    #[serde(default = "default_number")]
    pub number: String,

    /// Path to the transport's device/session database.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            number: default_number(),
            database_path: default_database_path(),
        }
    }
}

fn default_number() -> String {
    "0".to_string()
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("wabridge").join("wabridge.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("wabridge.db"))
        .to_string_lossy()
        .into_owned()
}

/// Where attachments land and how MIME types map to file extensions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Directory holding content-addressed attachment files.
    #[serde(default = "default_media_path")]
    pub path: String,

    /// Extra or overriding MIME type to extension mappings, e.g.
    /// `"audio/ogg" = ".oga"`.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            path: default_media_path(),
            extensions: BTreeMap::new(),
        }
    }
}

fn default_media_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("wabridge").join("media"))
        .unwrap_or_else(|| std::path::PathBuf::from("media"))
        .to_string_lossy()
        .into_owned()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for wabridge crates (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
