use std::collections::HashMap;
use std::sync::RwLock;

use super::store::{SnapshotStore, StorageError};

/// In-memory snapshot store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| StorageError::Read("lock poisoned".to_string()))?;
        Ok(slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, snapshot: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::Write("lock poisoned".to_string()))?;
        slots.insert(slot.to_string(), snapshot.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_slot_reads_as_none() {
        let store = InMemorySnapshotStore::new();
        assert_eq!(store.read("anything").unwrap(), None);
    }

    #[test]
    fn writes_replace_the_whole_slot() {
        let store = InMemorySnapshotStore::new();
        store.write("slot", "first").unwrap();
        store.write("slot", "second").unwrap();
        assert_eq!(store.read("slot").unwrap().as_deref(), Some("second"));
    }
}
