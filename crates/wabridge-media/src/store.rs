// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-addressed attachment files.
//!
//! A file is named `<byte length>-<sha1 hex>[.ext]`. Since the name is a
//! function of the content, a file that already exists under that name is
//! assumed identical and never rewritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};
use wabridge_core::BridgeError;

/// Result of [`write_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// A file with this name was already present and was left untouched.
    Existing,
}

/// `<len>-<lowercase sha1 hex>` for a byte payload.
pub fn content_address(bytes: &[u8]) -> String {
    format!("{}-{}", bytes.len(), hex::encode(Sha1::digest(bytes)))
}

/// Create `path` exclusively and fill it with `bytes`.
///
/// If the file already exists this is a success and nothing is written.
/// A write that fails after the file was created removes the partial file so
/// a later attempt is not mistaken for an existing copy.
pub async fn write_if_absent(path: &Path, bytes: &[u8]) -> Result<WriteOutcome, BridgeError> {
    let mut file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(WriteOutcome::Existing),
        Err(e) => {
            return Err(BridgeError::storage(
                format!("failed to create {}", path.display()),
                e,
            ));
        }
    };

    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        let _ = tokio::fs::remove_file(path).await;
        return Err(BridgeError::storage(
            format!("failed to write {}", path.display()),
            e,
        ));
    }

    Ok(WriteOutcome::Written)
}

/// A flat directory of content-addressed files.
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    root: PathBuf,
}

impl AttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a stored file name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the media directory (and parents) if missing.
    pub async fn ensure_root(&self) -> Result<(), BridgeError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            BridgeError::storage(
                format!("failed to create media directory {}", self.root.display()),
                e,
            )
        })
    }

    /// Store `bytes` and return the file name (not the full path).
    ///
    /// `ext` is appended verbatim and should include its leading dot.
    pub async fn materialize(&self, bytes: &[u8], ext: Option<&str>) -> Result<String, BridgeError> {
        let name = format!("{}{}", content_address(bytes), ext.unwrap_or_default());
        let path = self.path_for(&name);

        match write_if_absent(&path, bytes).await? {
            WriteOutcome::Written => debug!(file = %name, size = bytes.len(), "attachment stored"),
            WriteOutcome::Existing => trace!(file = %name, "attachment already present"),
        }

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_length_and_sha1() {
        assert_eq!(
            content_address(b"hello world"),
            "11-2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
        assert_eq!(
            content_address(b""),
            "0-da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[tokio::test]
    async fn materialize_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dir.path());

        let name = store.materialize(b"hello world", Some(".txt")).await.unwrap();
        assert_eq!(name, "11-2aae6c35c94fcfb415dbe95f408b9ce91ee846ed.txt");
        assert_eq!(std::fs::read(dir.path().join(&name)).unwrap(), b"hello world");

        let bare = store.materialize(b"hello world", None).await.unwrap();
        assert_eq!(bare, "11-2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
    }

    #[tokio::test]
    async fn existing_file_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("11-2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        std::fs::write(&path, b"planted").unwrap();

        let outcome = write_if_absent(&path, b"hello world").await.unwrap();
        assert_eq!(outcome, WriteOutcome::Existing);
        assert_eq!(std::fs::read(&path).unwrap(), b"planted");
    }

    #[tokio::test]
    async fn missing_directory_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dir.path().join("absent"));

        match store.materialize(b"x", None).await {
            Err(BridgeError::Storage { source, .. }) => {
                assert_eq!(source.kind(), ErrorKind::NotFound)
            }
            other => panic!("expected storage error, got {other:?}"),
        }

        store.ensure_root().await.unwrap();
        assert!(store.materialize(b"x", None).await.is_ok());
    }

    proptest::proptest! {
        #[test]
        fn address_is_deterministic(bytes in proptest::collection::vec(proptest::num::u8::ANY, 0..512)) {
            let a = content_address(&bytes);
            proptest::prop_assert_eq!(&a, &content_address(&bytes));
            let prefix = format!("{}-", bytes.len());
            proptest::prop_assert!(a.starts_with(&prefix));
            proptest::prop_assert_eq!(a.len(), prefix.len() + 40);
        }
    }
}
