//! File-backed session store.
//!
//! Persists the single session identifier across client runs, the way the
//! browser front-end kept it in localStorage: one opaque string under one
//! key, no expiry metadata. Lives at `{data_dir}/session_id`.

use std::path::{Path, PathBuf};

use tourmate_core::session::store::SessionStore;
use tourmate_types::error::StoreError;

/// Durable session store backed by a single file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store rooted in the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session_id"),
        }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let id = content.trim();
                if id.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(id.to_string()))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err.to_string())),
        }
    }

    async fn save(&self, session_id: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        tokio::fs::write(&self.path, session_id)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err.to_string())),
        }
    }
}
