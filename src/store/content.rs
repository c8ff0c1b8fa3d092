//! Content-addressable blob store on local disk.
//!
//! # Layout
//! One file per blob in a flat directory. The file name is the lowercase hex
//! SHA-256 of the content, the file holds the raw bytes.

use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::observability::metrics;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("blob {0} not found")]
    NotFound(String),

    #[error("writing blob {digest} failed: {source}")]
    Write {
        digest: String,
        #[source]
        source: io::Error,
    },

    #[error("reading blob {digest} failed: {source}")]
    Read {
        digest: String,
        #[source]
        source: io::Error,
    },
}

/// Lowercase hex SHA-256 of `payload`.
pub fn digest(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hex::encode(hasher.finalize())
}

/// True if `key` looks like something [`digest`] produced.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == DIGEST_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Flat directory of immutable, digest-named blobs.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `payload` and return its key.
    ///
    /// Content is written to a temporary sibling and renamed into place, so a
    /// reader never observes a partially written blob. Rewriting existing
    /// content replaces the file with identical bytes.
    pub async fn put(&self, payload: &[u8]) -> Result<String, StoreError> {
        let key = digest(payload);
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", key, uuid::Uuid::new_v4()));

        let result = async {
            tokio::fs::write(&tmp, payload).await?;
            tokio::fs::rename(&tmp, self.root.join(&key)).await
        }
        .await;

        match result {
            Ok(()) => {
                metrics::record_store_op("put", "ok");
                Ok(key)
            }
            Err(source) => {
                let _ = tokio::fs::remove_file(&tmp).await;
                metrics::record_store_op("put", "error");
                Err(StoreError::Write {
                    digest: key,
                    source,
                })
            }
        }
    }

    /// Read the blob stored under `key`.
    ///
    /// Keys that could not have come from [`ContentStore::put`] are reported
    /// as missing without touching the filesystem.
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        if !is_valid_key(key) {
            metrics::record_store_op("get", "not_found");
            return Err(StoreError::NotFound(key.to_string()));
        }

        match tokio::fs::read(self.root.join(key)).await {
            Ok(content) => {
                metrics::record_store_op("get", "ok");
                Ok(content)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                metrics::record_store_op("get", "not_found");
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(source) => {
                metrics::record_store_op("get", "error");
                Err(StoreError::Read {
                    digest: key.to_string(),
                    source,
                })
            }
        }
    }
}
