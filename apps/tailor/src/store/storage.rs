//! Durable storage slot for the serialized snapshot.
//!
//! One named slot, overwritten wholesale on every write, read once at startup.

use std::io::Write;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

use crate::store::StoreError;

/// Name of the single slot holding the JSON snapshot.
pub const STORAGE_SLOT: &str = "ai-resume-tailor-storage";

pub trait SnapshotStorage: Send {
    /// Returns the raw slot contents, or `None` when nothing has been written yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the slot contents.
    fn write(&mut self, contents: &str) -> Result<(), StoreError>;
}

/// Slot backed by `<dir>/ai-resume-tailor-storage.json`.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_SLOT}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes to a temp file in the same directory and renames it over the slot,
    /// so a crash mid-write never leaves a truncated snapshot behind.
    fn write(&mut self, contents: &str) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory slot. Clones share the same contents.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
    /// Writes left before every later write fails.
    writes_left: Arc<Mutex<Option<usize>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.into()))),
            writes_left: Arc::default(),
        }
    }

    /// Lets `n` more writes through, then fails every write as a full disk
    /// would.
    pub fn fail_writes_after(&self, n: usize) {
        *self.writes_left.lock().unwrap_or_else(PoisonError::into_inner) = Some(n);
    }

    pub fn contents(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
impl SnapshotStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents())
    }

    fn write(&mut self, contents: &str) -> Result<(), StoreError> {
        if let Some(left) = self.writes_left.lock().unwrap_or_else(PoisonError::into_inner).as_mut() {
            if *left == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
            }
            *left -= 1;
        }
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(contents.to_string());
        Ok(())
    }
}
