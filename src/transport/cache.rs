use crate::transport::error::TransportError;
use log::debug;
use sha2::{Digest, Sha256};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

const CACHE_FILE_EXTENSION: &str = "json";

/// Identifies one cached response: the SHA-256 of the full request URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// On-disk store of raw response bodies, one file per request.
///
/// Entries never expire. Writes land in a temporary file inside the cache
/// directory and are renamed into place, so a reader sees either nothing or a
/// complete body, and two writers racing on the same key both leave a valid file.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Derives the key for a full request URL, query string included.
    pub fn key_for(url: &str) -> CacheKey {
        CacheKey(hex::encode(Sha256::digest(url.as_bytes())))
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir
            .join(format!("{}.{}", key.as_str(), CACHE_FILE_EXTENSION))
    }

    /// Returns the cached body for `key`, or `None` on a cache miss.
    pub async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, TransportError> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => {
                debug!("Cache hit at {:?} ({} bytes)", path, bytes.len());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TransportError::CacheRead(path, e)),
        }
    }

    /// Stores `body` under `key`, replacing any previous entry.
    pub async fn put(&self, key: &CacheKey, body: &[u8]) -> Result<(), TransportError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| TransportError::CacheDirCreation(self.dir.clone(), e))?;

        let dir = self.dir.clone();
        let path = self.path_for(key);
        let body = body.to_vec();
        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new_in(&dir)
                .map_err(|e| TransportError::CacheWrite(path.clone(), e))?;
            temp_file
                .write_all(&body)
                .map_err(|e| TransportError::CacheWrite(path.clone(), e))?;
            temp_file
                .flush()
                .map_err(|e| TransportError::CacheWrite(path.clone(), e))?;
            temp_file
                .persist(&path)
                .map_err(|e| TransportError::CacheWrite(path.clone(), e.error))?;
            debug!("Cached {} bytes to {:?}", body.len(), path);
            Ok::<(), TransportError>(())
        })
        .await??;
        Ok(())
    }
}
