// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Last known profile photo id per JID.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::jid::Jid;

/// Externally owned store of the last profile photo id seen for each JID.
///
/// The bridge never caches these ids itself; it looks one up before each
/// photo query and stores the new id after a photo has been materialized.
pub trait PhotoIdStore: Send + Sync {
    fn lookup(&self, jid: &Jid) -> Option<String>;

    fn store(&self, jid: &Jid, photo_id: &str);
}

/// In-memory [`PhotoIdStore`] for single-process use and tests.
#[derive(Debug, Default)]
pub struct MemoryPhotoIdStore {
    ids: Mutex<HashMap<String, String>>,
}

impl MemoryPhotoIdStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.lock().map(|ids| ids.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PhotoIdStore for MemoryPhotoIdStore {
    fn lookup(&self, jid: &Jid) -> Option<String> {
        let ids = self.ids.lock().ok()?;
        ids.get(&jid.to_string()).cloned()
    }

    fn store(&self, jid: &Jid, photo_id: &str) {
        if let Ok(mut ids) = self.ids.lock() {
            ids.insert(jid.to_string(), photo_id.to_string());
        }
    }
}
