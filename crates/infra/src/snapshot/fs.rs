use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::store::{SnapshotStore, StorageError};

/// Filesystem-backed snapshot store: one JSON file per slot under a data
/// directory.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    dir: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(format!("{slot}: {e}"))),
        }
    }

    fn write(&self, slot: &str, snapshot: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::Write(format!("{}: {e}", self.dir.display())))?;

        let path = self.slot_path(slot);
        fs::write(&path, snapshot).map_err(|e| StorageError::Write(format!("{slot}: {e}")))?;
        tracing::debug!(slot, bytes = snapshot.len(), "snapshot written");
        Ok(())
    }
}
