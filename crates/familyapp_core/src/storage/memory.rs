//! In-process backing for ephemeral stores and tests.

use super::{StorageResult, StoreBacking};

/// Keeps the last written document in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBacking {
    contents: Option<Vec<u8>>,
    writes: usize,
}

impl MemoryBacking {
    /// Empty backing; reads as "nothing persisted".
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing pre-seeded with a persisted document.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(bytes.into()),
            writes: 0,
        }
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// Number of `write_all` calls since construction.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StoreBacking for MemoryBacking {
    fn read_all(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.contents.clone())
    }

    fn write_all(&mut self, bytes: &[u8]) -> StorageResult<()> {
        self.contents = Some(bytes.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
