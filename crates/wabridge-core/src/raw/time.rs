// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde helpers for transport timestamps.
//!
//! The transport renders an unset time as its zero value,
//! `0001-01-01T00:00:00Z`, rather than omitting the field.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional timestamp, treating the zero time as absent.
pub fn zero_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let time = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(time.filter(|t| t.year() > 1))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Seen {
        #[serde(default, deserialize_with = "super::zero_as_none")]
        at: Option<DateTime<Utc>>,
    }

    fn seen(json: &str) -> Option<DateTime<Utc>> {
        serde_json::from_str::<Seen>(json).unwrap().at
    }

    #[test]
    fn zero_time_is_absent() {
        assert_eq!(seen(r#"{"at":"0001-01-01T00:00:00Z"}"#), None);
        assert_eq!(seen(r#"{"at":null}"#), None);
        assert_eq!(seen("{}"), None);
    }

    #[test]
    fn real_time_is_kept() {
        let at = seen(r#"{"at":"2025-05-02T11:13:28Z"}"#).unwrap();
        assert_eq!(at.to_rfc3339(), "2025-05-02T11:13:28+00:00");
    }
}
