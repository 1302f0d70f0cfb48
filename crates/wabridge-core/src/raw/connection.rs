// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lifecycle events and their reason codes.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Numeric reason attached to a connect failure or logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ConnectFailureReason(pub u16);

impl ConnectFailureReason {
    pub const GENERIC: Self = Self(400);
    pub const LOGGED_OUT: Self = Self(401);
    pub const TEMP_BANNED: Self = Self(402);
    pub const MAIN_DEVICE_GONE: Self = Self(403);
    pub const CLIENT_OUTDATED: Self = Self(405);
    pub const UNKNOWN_LOGOUT: Self = Self(406);
    pub const BAD_USER_AGENT: Self = Self(409);
    pub const CAT_EXPIRED: Self = Self(413);
    pub const CAT_INVALID: Self = Self(414);
    pub const NOT_FOUND: Self = Self(415);
    pub const CLIENT_UNKNOWN: Self = Self(418);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);
    pub const EXPERIMENTAL: Self = Self(501);
    pub const SERVICE_UNAVAILABLE: Self = Self(503);

    /// Whether the session is gone and the device must be linked again.
    pub fn is_logged_out(self) -> bool {
        matches!(
            self,
            Self::LOGGED_OUT | Self::MAIN_DEVICE_GONE | Self::UNKNOWN_LOGOUT
        )
    }

    fn description(self) -> &'static str {
        match self {
            Self::GENERIC => "generic error",
            Self::LOGGED_OUT => "logged out from another device",
            Self::TEMP_BANNED => "account temporarily banned",
            Self::MAIN_DEVICE_GONE => "primary device was logged out",
            Self::CLIENT_OUTDATED => "client is out of date",
            Self::UNKNOWN_LOGOUT => "unknown logout",
            Self::BAD_USER_AGENT => "client user agent was rejected",
            Self::CAT_EXPIRED => "messenger crypto auth token has expired",
            Self::CAT_INVALID => "messenger crypto auth token is invalid",
            Self::NOT_FOUND => "not found",
            Self::CLIENT_UNKNOWN => "client unknown",
            Self::INTERNAL_SERVER_ERROR => "internal server error",
            Self::EXPERIMENTAL => "experimental",
            Self::SERVICE_UNAVAILABLE => "service unavailable",
            _ => "unknown error",
        }
    }
}

impl fmt::Display for ConnectFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0, self.description())
    }
}

/// Numeric reason for a temporary ban.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TempBanReason(pub u16);

impl TempBanReason {
    fn description(self) -> &'static str {
        match self.0 {
            101 => "you sent too many messages to people who don't have you in their address books",
            102 => "too many people blocked you",
            103 => "you created too many groups with people who don't have you in their address books",
            104 => "you sent the same message to too many people",
            106 => "you sent too many messages to a broadcast list",
            _ => "you may have violated the terms of service (unknown error)",
        }
    }
}

impl fmt::Display for TempBanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0, self.description())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggedOutEvent {
    #[serde(default)]
    pub on_connect: bool,
    pub reason: Option<ConnectFailureReason>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemporaryBanEvent {
    pub code: TempBanReason,
    /// Remaining ban time in nanoseconds.
    #[serde(default)]
    pub expire: u64,
}

impl TemporaryBanEvent {
    pub fn expires_in(&self) -> Duration {
        Duration::from_nanos(self.expire)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectFailureEvent {
    pub reason: ConnectFailureReason,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatRefreshErrorEvent {
    pub error: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamErrorEvent {
    pub code: String,
}

/// Render a duration as hours, minutes, and seconds (`1h2m3s`, `45s`).
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logout_codes() {
        assert!(ConnectFailureReason::LOGGED_OUT.is_logged_out());
        assert!(ConnectFailureReason::MAIN_DEVICE_GONE.is_logged_out());
        assert!(ConnectFailureReason::UNKNOWN_LOGOUT.is_logged_out());
        assert!(!ConnectFailureReason::TEMP_BANNED.is_logged_out());
        assert!(!ConnectFailureReason(599).is_logged_out());
    }

    #[test]
    fn reasons_render_code_and_text() {
        assert_eq!(
            ConnectFailureReason::CLIENT_OUTDATED.to_string(),
            "405: client is out of date"
        );
        assert_eq!(ConnectFailureReason(599).to_string(), "599: unknown error");
        assert_eq!(TempBanReason(102).to_string(), "102: too many people blocked you");
    }

    #[test]
    fn durations_are_compact() {
        assert_eq!(format_duration(Duration::from_secs(45)), "45s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m5s");
        assert_eq!(format_duration(Duration::from_secs(3600 * 24)), "24h0m0s");
    }

    #[test]
    fn temporary_ban_reads_nanoseconds() {
        let evt: TemporaryBanEvent =
            serde_json::from_str(r#"{"Code":101,"Expire":90000000000}"#).unwrap();
        assert_eq!(evt.expires_in(), Duration::from_secs(90));
    }
}
