//! In-memory adapter implementation for uploaded files.
//!
//! Used when no upload directory is configured, and throughout the test suite.
//! Contents are lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::{validate_key, AdapterError, AdapterResult, FileAdapter, StoredFile};

#[derive(Debug, Default)]
pub struct MemoryAdapter {
    files: RwLock<HashMap<String, (StoredFile, Bytes)>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileAdapter for MemoryAdapter {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> AdapterResult<StoredFile> {
        validate_key(key)?;
        let file = StoredFile {
            key: key.to_string(),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        };
        self.files
            .write()
            .await
            .insert(key.to_string(), (file.clone(), data));
        Ok(file)
    }

    async fn get(&self, key: &str) -> AdapterResult<(StoredFile, Bytes)> {
        validate_key(key)?;
        self.files
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AdapterError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> AdapterResult<bool> {
        validate_key(key)?;
        Ok(self.files.write().await.remove(key).is_some())
    }
}
