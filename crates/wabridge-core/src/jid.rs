// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol-level identifiers for users, chats, and groups.
//!
//! A JID has the shape `user[.agent][:device]@server`. A bare `server` with
//! no `@` is also valid (server-only JIDs such as `s.whatsapp.net`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BridgeError;

/// Server for regular user accounts.
pub const DEFAULT_USER_SERVER: &str = "s.whatsapp.net";
/// Server for group chats.
pub const GROUP_SERVER: &str = "g.us";

/// A parsed JID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Jid {
    user: String,
    agent: u8,
    device: u16,
    server: String,
}

impl Jid {
    /// Build a JID from a user part and a server.
    pub fn new(user: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            agent: 0,
            device: 0,
            server: server.into(),
        }
    }

    /// Parse a JID string.
    pub fn parse(value: &str) -> Result<Self, BridgeError> {
        let invalid = |reason: &str| BridgeError::InvalidJid {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("empty JID"));
        }

        let Some((user_part, server)) = value.split_once('@') else {
            return Ok(Self::new("", value));
        };
        if server.is_empty() {
            return Err(invalid("missing server"));
        }
        if server.contains('@') {
            return Err(invalid("unexpected number of `@` separators"));
        }

        let mut jid = Self::new(user_part, server);

        if let Some((user, ad)) = user_part.split_once('.') {
            if ad.contains('.') {
                return Err(invalid("unexpected number of dots"));
            }
            jid.user = user.to_string();
            let (agent, device) = match ad.split_once(':') {
                Some((agent, device)) => {
                    if device.contains(':') {
                        return Err(invalid("unexpected number of colons"));
                    }
                    (agent, Some(device))
                }
                None => (ad, None),
            };
            jid.agent = agent.parse().map_err(|_| invalid("agent is not a number"))?;
            if let Some(device) = device {
                jid.device = device.parse().map_err(|_| invalid("device is not a number"))?;
            }
        } else if let Some((user, device)) = user_part.split_once(':') {
            if device.contains(':') {
                return Err(invalid("unexpected number of colons"));
            }
            jid.user = user.to_string();
            jid.device = device.parse().map_err(|_| invalid("device is not a number"))?;
        }

        Ok(jid)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn device(&self) -> u16 {
        self.device
    }

    /// Whether this JID addresses a group chat.
    pub fn is_group(&self) -> bool {
        self.server == GROUP_SERVER
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.agent > 0 {
            write!(f, "{}.{}:{}@{}", self.user, self.agent, self.device, self.server)
        } else if self.device > 0 {
            write!(f, "{}:{}@{}", self.user, self.device, self.server)
        } else if !self.user.is_empty() {
            write!(f, "{}@{}", self.user, self.server)
        } else {
            f.write_str(&self.server)
        }
    }
}

impl FromStr for Jid {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Jid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Jid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional JID where the transport's empty string means "none".
pub fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Jid>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => Jid::parse(value).map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_user_jid() {
        let jid = Jid::parse("123456789@s.whatsapp.net").unwrap();
        assert_eq!(jid.user(), "123456789");
        assert_eq!(jid.server(), DEFAULT_USER_SERVER);
        assert_eq!(jid.device(), 0);
        assert_eq!(jid.to_string(), "123456789@s.whatsapp.net");
    }

    #[test]
    fn parses_device_and_agent_forms() {
        let device = Jid::parse("123456789:12@s.whatsapp.net").unwrap();
        assert_eq!(device.user(), "123456789");
        assert_eq!(device.device(), 12);
        assert_eq!(device.to_string(), "123456789:12@s.whatsapp.net");

        let agent = Jid::parse("123456789.1:3@s.whatsapp.net").unwrap();
        assert_eq!(agent.user(), "123456789");
        assert_eq!(agent.device(), 3);
        assert_eq!(agent.to_string(), "123456789.1:3@s.whatsapp.net");
    }

    #[test]
    fn server_only_jid_displays_server() {
        let jid = Jid::parse("s.whatsapp.net").unwrap();
        assert_eq!(jid.user(), "");
        assert_eq!(jid.to_string(), "s.whatsapp.net");
    }

    #[test]
    fn group_jid_is_detected() {
        assert!(Jid::parse("120363000000000000@g.us").unwrap().is_group());
        assert!(!Jid::parse("123@s.whatsapp.net").unwrap().is_group());
    }

    #[test]
    fn malformed_jids_are_rejected_with_value() {
        for bad in ["", "user@", "a@b@c", "1.2.3@s.whatsapp.net", "1:x@s.whatsapp.net", "1:2:3@lid"] {
            match Jid::parse(bad) {
                Err(BridgeError::InvalidJid { value, .. }) => assert_eq!(value, bad),
                other => panic!("expected InvalidJid for {bad:?}, got {other:?}"),
            }
        }
    }

    proptest::proptest! {
        #[test]
        fn parse_never_panics(input in "\\PC{0,40}") {
            let _ = Jid::parse(&input);
        }

        #[test]
        fn user_server_pairs_display_as_written(user in "[0-9]{1,15}", server in "[a-z]{1,8}(\\.[a-z]{1,8})?") {
            let text = format!("{user}@{server}");
            let jid = Jid::parse(&text).unwrap();
            proptest::prop_assert_eq!(jid.to_string(), text);
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let jid = Jid::parse("42@g.us").unwrap();
        let json = serde_json::to_string(&jid).unwrap();
        assert_eq!(json, "\"42@g.us\"");
        let back: Jid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, jid);
    }
}
