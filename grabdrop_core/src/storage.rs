//! Artifact byte storage
//!
//! Writes uploaded bytes under the uploads directory and hands back the
//! locator the web client fetches over the static file route.

use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// URL prefix the static file route serves the uploads directory under.
pub const UPLOADS_PREFIX: &str = "/uploads";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create uploads directory: {0}")]
    CreateDir(std::io::Error),
    #[error("failed to write artifact: {0}")]
    Write(std::io::Error),
}

/// Filesystem store for uploaded artifact bytes.
pub struct UploadStorage {
    dir: PathBuf,
}

impl UploadStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a fresh file and return its public locator.
    ///
    /// The client-supplied name is reduced to its final path component so a
    /// crafted name cannot escape the uploads directory; a UUID prefix keeps
    /// stored names unique across uploads of the same file.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(StorageError::CreateDir)?;

        let safe_name = Path::new(file_name)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "artifact.bin".to_string());
        let stored_name = format!("{}_{}", Uuid::new_v4().simple(), safe_name);

        let path = self.dir.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(StorageError::Write)?;

        tracing::debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(format!("{}/{}", UPLOADS_PREFIX, stored_name))
    }
}
