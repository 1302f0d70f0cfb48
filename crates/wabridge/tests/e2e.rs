// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the `wabridge` binary.
//!
//! Each test writes its own config and event file into a temp directory and
//! runs the built binary against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn media(&self) -> PathBuf {
        self.dir.path().join("media")
    }

    fn write_config(&self, body: &str) -> PathBuf {
        let path = self.dir.path().join("wabridge.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    fn valid_config(&self) -> PathBuf {
        self.write_config(&format!(
            "[connection]\nnumber = \"15550001\"\ndatabase_path = \"{}\"\n\n[media]\npath = \"{}\"\n\n[logging]\nlevel = \"warn\"\n",
            self.dir.path().join("session.db").display(),
            self.media().display(),
        ))
    }

    fn write_events(&self, lines: &[String]) -> PathBuf {
        let path = self.dir.path().join("events.ndjson");
        std::fs::write(&path, lines.join("\n")).unwrap();
        path
    }
}

fn wabridge(args: &[&str]) -> Output {
    wabridge_with_env(args, &[])
}

fn wabridge_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wabridge"))
        .args(args)
        .env_remove("RUST_LOG")
        .envs(env.iter().copied())
        .output()
        .unwrap()
}

fn records(output: &Output) -> Vec<Value> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn fixture_line(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../wabridge-events/tests/fixtures")
        .join(format!("{name}.event.json"));
    let data: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    json!({ "type": "Message", "data": data }).to_string()
}

#[test]
fn replay_emits_records_in_event_order() {
    let ws = Workspace::new();
    let config = ws.valid_config();
    let events = ws.write_events(&[
        json!({"type": "QRCode", "data": "2@pairing"}).to_string(),
        json!({"type": "Connected"}).to_string(),
        String::new(),
        json!({"type": "PushName", "data": {"JID": "1234@s.whatsapp.net", "NewPushName": "Ann"}})
            .to_string(),
        fixture_line("text_message"),
        json!({"type": "ClientOutdated"}).to_string(),
    ]);

    let output = wabridge(&[
        "--config",
        config.to_str().unwrap(),
        "replay",
        events.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let out = records(&output);
    let kinds: Vec<&str> = out.iter().map(|r| r["type"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        ["ConnStatus", "QRCode", "ConnStatus", "Contact", "Message", "ConnStatus", "Error"]
    );
    assert_eq!(out[0]["data"], "qr-code-scan");
    assert_eq!(out[1]["data"], "2@pairing");
    assert_eq!(out[2]["data"], "connected");
    assert_eq!(out[3]["data"]["JID"], "1234@s.whatsapp.net");
    assert_eq!(out[3]["data"]["PushName"], "Ann");
    assert_eq!(out[4]["data"]["ContentBody"], "Hello world!");
    assert_eq!(out[4]["data"]["MessageID"], "12345678901234567890123456789012");
    assert_eq!(out[6]["data"], "update is required");

    assert!(ws.media().is_dir(), "media directory is created on start");
}

#[test]
fn undecodable_lines_are_skipped() {
    let ws = Workspace::new();
    let config = ws.valid_config();
    let events = ws.write_events(&[
        "not json".to_string(),
        json!({"type": "PushName", "data": {"JID": 7}}).to_string(),
        json!({"type": "QRCode", "data": {"code": "x"}}).to_string(),
        json!({"type": "Disconnected"}).to_string(),
    ]);

    let output = wabridge(&[
        "--config",
        config.to_str().unwrap(),
        "replay",
        events.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(records(&output), vec![json!({"type": "ConnStatus", "data": "disconnected"})]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("skipping undecodable event"));
}

#[test]
fn missing_event_file_fails() {
    let ws = Workspace::new();
    let config = ws.valid_config();
    let missing = ws.dir.path().join("nope.ndjson");

    let output = wabridge(&[
        "--config",
        config.to_str().unwrap(),
        "replay",
        missing.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to open"));
}

#[test]
fn check_config_reports_summary() {
    let ws = Workspace::new();
    let config = ws.valid_config();

    let output = wabridge(&["check-config", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("config ok"));
    assert!(stdout.contains("15550001"));
}

#[test]
fn check_config_applies_env_overrides() {
    let ws = Workspace::new();
    let config = ws.valid_config();

    let output = wabridge_with_env(
        &["check-config", "--config", config.to_str().unwrap()],
        &[
            ("WABRIDGE_CONNECTION_NUMBER", "15559999"),
            ("WABRIDGE_MEDIA_PATH", "/srv/wabridge/media"),
            ("WABRIDGE_LOGGING_LEVEL", "debug"),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("15559999"), "{stdout}");
    assert!(stdout.contains("/srv/wabridge/media"), "{stdout}");
}

#[test]
fn check_config_rejects_invalid_values() {
    let ws = Workspace::new();
    let config = ws.write_config("[media]\npath = \"\"\n\n[logging]\nlevel = \"loud\"\n");

    let output = wabridge(&["check-config", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn check_config_rejects_unknown_keys() {
    let ws = Workspace::new();
    let config = ws.write_config("[media]\npaht = \"/srv/media\"\n");

    let output = wabridge(&["check-config", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}
