//! Local-disk adapter implementation for uploaded files.
//!
//! This file contains the complete concrete implementation of the `FileAdapter`
//! trait for a directory on the server's filesystem. Content types are not
//! persisted; they are derived from the key's extension on read.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use crate::{content_type_for, validate_key, AdapterError, AdapterResult, FileAdapter, StoredFile};

#[derive(Debug, Clone)]
pub struct LocalDiskAdapter {
    root: PathBuf,
}

impl LocalDiskAdapter {
    /// Creates the adapter, making `root` if it does not exist yet.
    pub async fn new(root: impl AsRef<Path>) -> AdapterResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> AdapterResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl FileAdapter for LocalDiskAdapter {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> AdapterResult<StoredFile> {
        let path = self.path_for(key)?;
        fs::write(&path, &data).await?;
        debug!(key, size = data.len(), "stored file on disk");

        Ok(StoredFile {
            key: key.to_string(),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn get(&self, key: &str) -> AdapterResult<(StoredFile, Bytes)> {
        let path = self.path_for(key)?;
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(AdapterError::NotFound(key.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let file = StoredFile {
            key: key.to_string(),
            size: data.len() as u64,
            content_type: content_type_for(key).to_string(),
        };
        Ok((file, Bytes::from(data)))
    }

    async fn delete(&self, key: &str) -> AdapterResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = LocalDiskAdapter::new(dir.path().join("uploads")).await.unwrap();

        let stored = adapter
            .put("report.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(stored.size, 8);
        assert_eq!(stored.url(), "/uploads/report.pdf");
        assert!(adapter.root().join("report.pdf").exists());

        let (file, data) = adapter.get("report.pdf").await.unwrap();
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(&data[..], b"%PDF-1.4");

        assert!(adapter.delete("report.pdf").await.unwrap());
        assert!(!adapter.delete("report.pdf").await.unwrap());
        assert!(matches!(
            adapter.get("report.pdf").await,
            Err(AdapterError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = LocalDiskAdapter::new(dir.path()).await.unwrap();

        let result = adapter
            .put("../escape.txt", "text/plain", Bytes::from_static(b"x"))
            .await;
        assert!(matches!(result, Err(AdapterError::InvalidKey(_))));
    }
}
