//! Whole-file backing for the persisted store document.
//!
//! # Responsibility
//! - Resolve one stable store location per user installation.
//! - Read and overwrite the store document as a single unit.
//!
//! # Invariants
//! - Reads and writes are whole-file; there is no append or partial write.
//! - The backing is owned by one process; no locking is attempted.
//! - A missing file reads as `None`, not as an error.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

mod file;
mod memory;

pub use file::FileBacking;
pub use memory::MemoryBacking;

/// Application directory created under the per-user data root.
pub const STORE_DIR_NAME: &str = "FamilyApp";
/// Fixed file name of the store document.
pub const STORE_FILE_NAME: &str = "store.json";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The host exposes no per-user data directory.
    NoDataDir,
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::NoDataDir => write!(f, "no per-user application data directory available"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NoDataDir => None,
        }
    }
}

/// Whole-document persistence target for a store.
pub trait StoreBacking {
    /// Reads the full document, or `None` when nothing was persisted yet.
    fn read_all(&self) -> StorageResult<Option<Vec<u8>>>;
    /// Replaces the full document.
    fn write_all(&mut self, bytes: &[u8]) -> StorageResult<()>;
    /// Short label for diagnostics (`file:<path>` or `memory`).
    fn describe(&self) -> String;
}

/// Returns `<data dir>/FamilyApp/store.json` for the current user.
///
/// Pure function of the host environment; does not touch the file system.
pub fn default_store_path() -> StorageResult<PathBuf> {
    let root = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    Ok(store_path_in(&root))
}

/// Returns the store file location under an arbitrary data root.
pub fn store_path_in(root: &Path) -> PathBuf {
    root.join(STORE_DIR_NAME).join(STORE_FILE_NAME)
}
