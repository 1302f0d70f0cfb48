// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::WabridgeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &WabridgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.connection.number.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "connection.number must not be empty".to_string(),
        });
    }

    if config.connection.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "connection.database_path must not be empty".to_string(),
        });
    }

    if config.media.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "media.path must not be empty".to_string(),
        });
    }

    for (mime, ext) in &config.media.extensions {
        if !mime.contains('/') {
            errors.push(ConfigError::Validation {
                message: format!("media.extensions key `{mime}` is not a MIME type"),
            });
        }
        if !ext.starts_with('.') || ext.len() < 2 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "media.extensions[\"{mime}\"] must be an extension with a leading dot, got `{ext}`"
                ),
            });
        }
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.logging.level
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
