// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile photo refresh.
//!
//! The transport is asked for picture metadata with the last seen picture id,
//! so an unchanged photo costs one query and no download. A new photo is
//! fetched over HTTP and stored like any other attachment.

use std::sync::Arc;

use tracing::debug;
use wabridge_core::{BridgeError, Jid, PhotoIdStore, Transport};

use crate::store::AttachmentStore;

pub struct ProfilePhotoBridge {
    transport: Arc<dyn Transport>,
    ids: Arc<dyn PhotoIdStore>,
    store: Arc<AttachmentStore>,
    http: reqwest::Client,
}

impl ProfilePhotoBridge {
    pub fn new(
        transport: Arc<dyn Transport>,
        ids: Arc<dyn PhotoIdStore>,
        store: Arc<AttachmentStore>,
    ) -> Self {
        Self::with_client(transport, ids, store, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client (proxies, timeouts).
    pub fn with_client(
        transport: Arc<dyn Transport>,
        ids: Arc<dyn PhotoIdStore>,
        store: Arc<AttachmentStore>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            transport,
            ids,
            store,
            http,
        }
    }

    /// Fetch `jid`'s photo if it changed since the last pull.
    ///
    /// Returns the stored file name, or `None` when there is nothing new
    /// (no picture, unchanged picture, or the metadata query failed). The new
    /// picture id is only remembered once the file is safely stored.
    pub async fn pull(&self, jid: &Jid) -> Result<Option<String>, BridgeError> {
        let existing = self.ids.lookup(jid);

        let info = match self
            .transport
            .profile_picture_info(jid, existing.as_deref())
            .await
        {
            Ok(Some(info)) => info,
            Ok(None) => return Ok(None),
            Err(e) => {
                debug!(jid = %jid, error = %e, "profile picture query failed");
                return Ok(None);
            }
        };

        let bytes = self.fetch(&info.url).await?;
        let name = self.store.materialize(&bytes, None).await?;
        self.ids.store(jid, &info.id);

        debug!(jid = %jid, photo_id = %info.id, file = %name, "profile photo updated");
        Ok(Some(name))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BridgeError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| BridgeError::Download {
                message: "profile photo request failed".to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Download {
                message: format!("profile photo request returned {status}"),
                source: None,
            });
        }

        let bytes = response.bytes().await.map_err(|e| BridgeError::Download {
            message: "failed to read profile photo body".to_string(),
            source: Some(Box::new(e)),
        })?;
        Ok(bytes.to_vec())
    }
}
