// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replay of recorded events through an offline router.

use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use wabridge_config::WabridgeConfig;
use wabridge_core::raw::Envelope;
use wabridge_core::{BridgeError, MemoryPhotoIdStore, RawEvent};
use wabridge_events::EventRouter;
use wabridge_media::{AttachmentStore, MimeRegistry};

use crate::offline::OfflineTransport;
use crate::sink::JsonLinesSink;

/// Pairing codes arrive outside the event stream; recordings tag them so.
const QR_CODE_KIND: &str = "QRCode";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub handled: usize,
    pub skipped: usize,
}

pub async fn run(config: &WabridgeConfig, file: &Path) -> Result<ReplaySummary, BridgeError> {
    let store = Arc::new(AttachmentStore::new(&config.media.path));
    store.ensure_root().await?;

    let router = EventRouter::new(
        Arc::new(OfflineTransport::new(&config.connection.number)),
        Arc::new(JsonLinesSink::new(std::io::stdout())),
        Arc::new(MemoryPhotoIdStore::new()),
        store,
    )
    .with_mime(MimeRegistry::with_overrides(&config.media.extensions));

    let input = tokio::fs::File::open(file)
        .await
        .map_err(|e| BridgeError::storage(format!("failed to open {}", file.display()), e))?;
    let mut lines = BufReader::new(input).lines();

    let mut summary = ReplaySummary::default();
    let mut line_no = 0usize;
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| BridgeError::storage(format!("failed to read {}", file.display()), e))?
    {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        if replay_line(&router, &line).await {
            summary.handled += 1;
        } else {
            warn!(line = line_no, "skipping undecodable event");
            summary.skipped += 1;
        }
    }

    info!(handled = summary.handled, skipped = summary.skipped, "replay finished");
    Ok(summary)
}

/// Returns false when the line is not a decodable event.
async fn replay_line(router: &EventRouter, line: &str) -> bool {
    let envelope: Envelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "line is not an event envelope");
            return false;
        }
    };

    if envelope.kind == QR_CODE_KIND {
        let Some(code) = envelope.data.as_str() else {
            warn!("QRCode event without a string payload");
            return false;
        };
        router.handle_qr_code(code).await;
        return true;
    }

    match RawEvent::from_envelope(envelope) {
        Ok(evt) => {
            router.handle_event(evt).await;
            true
        }
        Err(e) => {
            warn!(error = %e, "failed to decode event");
            false
        }
    }
}
