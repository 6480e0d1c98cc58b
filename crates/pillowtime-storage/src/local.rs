use std::fs::File;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::{ObjectStore, PutOptions, StoredObject, error::StorageError};

/// Stores objects as files below a root directory
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

/// Temporary file beside the target, removed unless renamed into place
struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    fn beside(target: &Path) -> Self {
        Self {
            path: target.with_extension(format!("partial-{}", uuid::Uuid::new_v4().simple())),
            committed: false,
        }
    }

    fn commit(mut self, target: &Path) -> std::io::Result<()> {
        std::fs::rename(&self.path, target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.committed {
            std::fs::remove_file(&self.path).ok();
        }
    }
}

/// Flags the write as abandoned when the awaiting future is dropped
struct AbandonOnDrop(Arc<AtomicBool>);

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl LocalStore {
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve `key` below the root, refusing anything that could escape it
    fn object_path(&self, key: &str) -> crate::error::Result<PathBuf> {
        let relative = Path::new(key);

        if key.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }

        Ok(self.root.join(relative))
    }

    async fn write(path: PathBuf, body: Vec<u8>) -> crate::error::Result<()> {
        let abandoned = Arc::new(AtomicBool::new(false));
        let _guard = AbandonOnDrop(Arc::clone(&abandoned));

        tokio::task::spawn_blocking(move || write_object(&path, &body, &abandoned))
            .await
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))?
    }
}

/// Write `body` to a partial file and rename it over `path`
///
/// The partial file never outlives a failed or abandoned write.
fn write_object(path: &Path, body: &[u8], abandoned: &AtomicBool) -> crate::error::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let partial = PartialFile::beside(path);
    let mut file = File::create(&partial.path)?;
    file.write_all(body)?;
    file.sync_all()?;
    drop(file);

    if abandoned.load(Ordering::SeqCst) {
        return Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Interrupted,
            "upload abandoned before commit",
        )));
    }

    partial.commit(path)?;
    Ok(())
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> crate::error::Result<StoredObject> {
        let path = self.object_path(key)?;
        let size = body.len() as u64;

        tracing::debug!(path = %path.display(), size, content_type = %options.content_type, "writing object to disk");

        tokio::time::timeout(options.timeout, Self::write(path, body))
            .await
            .map_err(|_| StorageError::Timeout(options.timeout))??;

        Ok(StoredObject {
            bucket: self.root.display().to_string(),
            key: key.to_owned(),
            size,
        })
    }

    fn name(&self) -> &str {
        "local"
    }
}
