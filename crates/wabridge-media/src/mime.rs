// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MIME type to file extension mapping, in both directions.

use std::collections::HashMap;

use wabridge_core::BridgeError;
use wabridge_core::raw::AttachmentKind;

const BUILTIN_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpeg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/heic", ".heic"),
    ("video/mp4", ".mp4"),
    ("video/3gpp", ".3gp"),
    ("video/quicktime", ".mov"),
    ("video/webm", ".webm"),
    ("audio/ogg", ".ogg"),
    ("audio/mpeg", ".mp3"),
    ("audio/mp4", ".m4a"),
    ("audio/aac", ".aac"),
    ("audio/amr", ".amr"),
    ("audio/wav", ".wav"),
    ("text/plain", ".txt"),
    ("text/csv", ".csv"),
    ("text/vcard", ".vcf"),
    ("application/pdf", ".pdf"),
    ("application/zip", ".zip"),
    ("application/json", ".json"),
    ("application/msword", ".doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
    ("application/vnd.ms-excel", ".xls"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".xlsx",
    ),
    ("application/vnd.ms-powerpoint", ".ppt"),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".pptx",
    ),
];

/// Resolves declared MIME types to the extension appended to stored files.
#[derive(Debug, Clone)]
pub struct MimeRegistry {
    extensions: HashMap<String, String>,
}

impl Default for MimeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MimeRegistry {
    /// Registry holding only the built-in table.
    pub fn new() -> Self {
        let extensions = BUILTIN_EXTENSIONS
            .iter()
            .map(|(mime, ext)| (mime.to_string(), ext.to_string()))
            .collect();
        Self { extensions }
    }

    /// Built-in table with `overrides` layered on top.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut registry = Self::new();
        for (mime, ext) in overrides {
            registry.extensions.insert(essence(mime), ext.clone());
        }
        registry
    }

    /// Extension for `mime`, ignoring parameters such as `; codecs=opus`.
    pub fn extension_for(&self, mime: &str) -> Option<&str> {
        self.extensions.get(&essence(mime)).map(String::as_str)
    }

    /// Extension for a downloaded attachment: the MIME mapping if one exists,
    /// otherwise the kind's fallback.
    pub fn resolve(&self, kind: AttachmentKind, mime: Option<&str>) -> Option<&str> {
        mime.and_then(|m| self.extension_for(m))
            .or_else(|| kind.fallback_extension())
    }
}

fn essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Upload class and MIME type for a stored file extension (without the dot).
pub fn outbound_media(ext: &str) -> Result<(AttachmentKind, String), BridgeError> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    let (kind, mime) = match ext.as_str() {
        "jpg" | "jpeg" => (AttachmentKind::Image, "image/jpeg"),
        "png" => (AttachmentKind::Image, "image/png"),
        "mp4" => (AttachmentKind::Video, "video/mp4"),
        "aac" => (AttachmentKind::Audio, "audio/aac"),
        "amr" => (AttachmentKind::Audio, "audio/amr"),
        "mp3" => (AttachmentKind::Audio, "audio/mpeg"),
        "m4a" => (AttachmentKind::Audio, "audio/mp4"),
        "ogg" => (AttachmentKind::Audio, "audio/ogg"),
        "txt" => (AttachmentKind::Document, "text/plain"),
        "pdf" => (AttachmentKind::Document, "application/pdf"),
        "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" => {
            let mime = BUILTIN_EXTENSIONS
                .iter()
                .find(|(_, known)| known.trim_start_matches('.') == ext)
                .map(|(mime, _)| *mime)
                .unwrap_or("application/octet-stream");
            (AttachmentKind::Document, mime)
        }
        _ => {
            return Err(BridgeError::Send {
                message: format!("unknown attachment type (could not determine MIME type): {ext}"),
                source: None,
            });
        }
    };
    Ok((kind, mime.to_string()))
}
