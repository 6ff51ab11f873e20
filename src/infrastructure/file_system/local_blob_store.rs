use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::application::ports::blob_fetcher::{BlobFetcher, BlobFetchError};
use crate::domain::entities::DocumentRef;

/// Serves documents out of a local directory. The fingerprint is an
/// ETag-like value built from file size and modification time, so change
/// detection never has to read the content.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, document: &DocumentRef) -> Result<PathBuf, BlobFetchError> {
        let name = Path::new(document.file_name());

        // The trigger supplies bare file names. Anything carrying path
        // components could escape the store root.
        if name.components().count() != 1 {
            return Err(BlobFetchError::IoError(format!(
                "invalid file name: {}",
                document.file_name()
            )));
        }

        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobFetcher for LocalBlobStore {
    async fn fingerprint(&self, document: &DocumentRef) -> Result<String, BlobFetchError> {
        let path = self.path_for(document)?;

        let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BlobFetchError::NotFound(document.file_name().to_string())
            } else {
                BlobFetchError::IoError(e.to_string())
            }
        })?;

        let modified = metadata
            .modified()
            .map_err(|e| BlobFetchError::IoError(e.to_string()))?
            .duration_since(UNIX_EPOCH)
            .map_err(|e| BlobFetchError::IoError(e.to_string()))?;

        Ok(format!(
            "{}-{}.{:09}",
            metadata.len(),
            modified.as_secs(),
            modified.subsec_nanos()
        ))
    }

    async fn fetch(&self, document: &DocumentRef) -> Result<Vec<u8>, BlobFetchError> {
        let path = self.path_for(document)?;

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BlobFetchError::NotFound(document.file_name().to_string())
            } else {
                BlobFetchError::IoError(e.to_string())
            }
        })
    }
}
