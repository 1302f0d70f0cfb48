// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/wabridge/wabridge.toml`
//! 3. `~/.config/wabridge/wabridge.toml`
//! 4. `./wabridge.toml`
//! 5. `WABRIDGE_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::WabridgeConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/wabridge/wabridge.toml";
pub(crate) const LOCAL_CONFIG: &str = "wabridge.toml";

pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wabridge/wabridge.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<WabridgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WabridgeConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<WabridgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WabridgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WabridgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WabridgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `WABRIDGE_CONNECTION_DATABASE_PATH` must become
/// `connection.database_path`, not `connection.database.path`. Keys arrive
/// uppercase as set in the environment and are lowercased first.
fn env_provider() -> Env {
    Env::prefixed("WABRIDGE_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("connection_", "connection.", 1)
            .replacen("media_", "media.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
