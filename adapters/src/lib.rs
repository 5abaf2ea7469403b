//! Core `adapters` crate for abstracting where uploaded files live.
//!
//! This crate defines the `FileAdapter` trait, which outlines the operations the
//! portal needs from a blob store (put, get, delete), and provides the concrete
//! implementations shipped with it: local disk and in-memory.

pub mod errors;
pub mod local;
pub mod memory;
pub mod models;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

pub use errors::{AdapterError, AdapterResult};
pub use local::LocalDiskAdapter;
pub use memory::MemoryAdapter;
pub use models::StoredFile;

const MAX_KEY_LEN: usize = 128;
const MAX_EXTENSION_LEN: usize = 8;

/// Storage backend for uploaded files.
///
/// Keys are flat, generated by [`generate_key`], and validated by every
/// implementation through [`validate_key`] before touching storage.
#[async_trait]
pub trait FileAdapter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Store `data` under `key`, replacing anything already there.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> AdapterResult<StoredFile>;

    /// Fetch the file stored under `key`.
    async fn get(&self, key: &str) -> AdapterResult<(StoredFile, Bytes)>;

    /// Remove the file under `key`. Returns false when nothing was stored.
    async fn delete(&self, key: &str) -> AdapterResult<bool>;
}

/// Rejects keys that could escape the storage root or are otherwise malformed.
pub fn validate_key(key: &str) -> AdapterResult<()> {
    let well_formed = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && !key.starts_with('.')
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

    if well_formed {
        Ok(())
    } else {
        Err(AdapterError::InvalidKey(key.to_string()))
    }
}

/// Builds a fresh storage key, suffixed with `extension` once sanitized.
///
/// Callers pass the extension of the file's content type so that adapters
/// which do not persist content types can recover it from the key.
pub fn generate_key(extension: Option<&str>) -> String {
    let id = Uuid::new_v4().simple().to_string();

    let extension = extension
        .map(|ext| {
            ext.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .take(MAX_EXTENSION_LEN)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|ext| !ext.is_empty());

    match extension {
        Some(ext) => format!("{id}.{ext}"),
        None => id,
    }
}

/// Best-effort content type from a file name's extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "zip" => "application/zip",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => "application/octet-stream",
    }
}

/// Key extension for a content type; inverse of [`content_type_for`].
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "application/pdf" => Some("pdf"),
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "application/zip" => Some("zip"),
        "text/plain" => Some("txt"),
        "text/markdown" => Some("md"),
        _ => None,
    }
}
