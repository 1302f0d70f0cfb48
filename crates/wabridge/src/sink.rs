// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback sink that writes one JSON object per record.
//!
//! Each line has the same envelope shape as the replay input:
//! `{"type": <callback>, "data": <record>}`.

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::json;
use tracing::warn;
use wabridge_core::{Call, ConnStatus, ConnectionError, Contact, EventSink, Message, User};

pub struct JsonLinesSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn emit(&self, kind: &str, data: impl Serialize) {
        let line = json!({ "type": kind, "data": data });
        let Ok(mut out) = self.out.lock() else {
            warn!(kind, "output lock poisoned, record dropped");
            return;
        };
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(kind, error = %e, "failed to write record");
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn qr_code(&self, code: &str) {
        self.emit("QRCode", code);
    }

    fn conn_status(&self, status: ConnStatus) {
        self.emit("ConnStatus", status);
    }

    fn error(&self, error: ConnectionError) {
        self.emit("Error", error.to_string());
    }

    fn contact(&self, contact: Contact) {
        self.emit("Contact", contact);
    }

    fn message(&self, message: Message) {
        self.emit("Message", message);
    }

    fn call(&self, call: Call) {
        self.emit("Call", call);
    }

    fn user(&self, user: User) {
        self.emit("User", user);
    }
}
