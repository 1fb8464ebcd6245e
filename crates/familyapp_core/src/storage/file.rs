//! File-system backing.
//!
//! # Invariants
//! - Intermediate directories exist once `open` returns.
//! - `write_all` stages the whole document in a sibling temp file and renames
//!   it over the target, so the previous document stays intact until the
//!   new one is complete.

use super::{default_store_path, StorageError, StorageResult, StoreBacking};
use log::{error, info};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Store document persisted at a fixed file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBacking {
    path: PathBuf,
}

impl FileBacking {
    /// Binds to `path`, creating missing parent directories.
    ///
    /// The file itself is not created until the first write.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(err) = std::fs::create_dir_all(parent) {
                error!(
                    "event=backing_open module=storage status=error error_code=create_dir_failed path={} error={}",
                    parent.display(),
                    err
                );
                return Err(StorageError::io(parent, err));
            }
        }
        info!(
            "event=backing_open module=storage status=ok path={}",
            path.display()
        );
        Ok(Self { path })
    }

    /// Binds to the per-user default location.
    pub fn open_default() -> StorageResult<Self> {
        Self::open(default_store_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the store file; staged writes are created here.
    fn staging_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl StoreBacking for FileBacking {
    fn read_all(&self) -> StorageResult<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(&self.path, err)),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> StorageResult<()> {
        let started_at = Instant::now();
        replace_contents(self.staging_dir(), &self.path, bytes)?;
        info!(
            "event=backing_write module=storage status=ok bytes={} duration_ms={}",
            bytes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Writes `bytes` to a temp file in `staging_dir`, syncs it, then renames it
/// onto `path`. A failure at any step leaves `path` untouched and removes the
/// temp file.
fn replace_contents(staging_dir: &Path, path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let mut staged = tempfile::Builder::new()
        .prefix(".store-")
        .suffix(".tmp")
        .tempfile_in(staging_dir)
        .map_err(|err| StorageError::io(staging_dir, err))?;
    staged
        .write_all(bytes)
        .map_err(|err| StorageError::io(staged.path(), err))?;
    staged
        .as_file()
        .sync_all()
        .map_err(|err| StorageError::io(staged.path(), err))?;
    staged
        .persist(path)
        .map_err(|err| StorageError::io(path, err.error))?;
    Ok(())
}
