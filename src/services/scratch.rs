//! Scratch storage for rendered artifacts.
//!
//! Every artifact gets its own file, created exclusively, and is removed when
//! discarded or dropped. Nothing addresses an artifact by recomputing its name.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;
use crate::models::ArtifactName;

/// Attempts before giving up on finding a free artifact path
const MAX_CREATE_ATTEMPTS: usize = 8;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Process-unique token: a sequence number plus random bits so restarts
/// sharing a directory do not line up either.
fn next_token() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{seq:04x}{:08x}", rand::random::<u32>())
}

/// Directory holding in-flight artifacts
pub struct ScratchStorage {
    dir: PathBuf,
}

impl ScratchStorage {
    /// Open a scratch directory, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            tracing::error!(dir = %dir.display(), error = %e, "Cannot create scratch directory");
            StorageError::ScratchDir(e)
        })?;
        Ok(Self { dir })
    }

    /// Write `bytes` to a new artifact named after `name`
    pub async fn create(&self, name: &ArtifactName, bytes: &[u8]) -> Result<Artifact, StorageError> {
        for _ in 0..MAX_CREATE_ATTEMPTS {
            let path = self.dir.join(format!("{}_{}.pdf", name.stem(), next_token()));

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!(path = %path.display(), "Artifact path taken, retrying");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to create artifact");
                    return Err(StorageError::Write(e));
                }
            };

            // From here on a failed write still removes the file
            let artifact = Artifact::new(path);
            file.write_all(bytes).await.map_err(StorageError::Write)?;
            file.flush().await.map_err(StorageError::Write)?;

            tracing::debug!(path = %artifact.path().display(), bytes = bytes.len(), "Artifact written");
            return Ok(artifact);
        }

        Err(StorageError::Write(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "no free artifact path",
        )))
    }
}

/// One rendered file in scratch storage, owned by a single request.
///
/// Dropping an artifact deletes its file. Call [`Artifact::discard`] to delete
/// it explicitly and observe the result.
#[derive(Debug)]
pub struct Artifact {
    path: PathBuf,
    removed: bool,
}

impl Artifact {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> Result<Vec<u8>, StorageError> {
        fs::read(&self.path).await.map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to read artifact");
            StorageError::Read(e)
        })
    }

    /// Delete the file. A file that is already gone counts as deleted.
    pub async fn discard(mut self) -> Result<(), StorageError> {
        self.removed = true;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Remove(e)),
        }
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Artifact removed on drop"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove artifact")
            }
        }
    }
}
