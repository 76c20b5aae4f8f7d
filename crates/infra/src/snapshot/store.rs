use std::sync::Arc;

use thiserror::Error;

/// Slot holding the full product list.
pub const PRODUCTS_SLOT: &str = "invtrack_products";

/// Slot holding the full count history.
pub const COUNTS_SLOT: &str = "invtrack_history";

/// Snapshot storage operation error.
///
/// These are infrastructure errors (IO, encoding) as opposed to domain
/// errors (validation, invariants).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot read failed: {0}")]
    Read(String),

    #[error("snapshot write failed: {0}")]
    Write(String),

    #[error("snapshot decode failed: {0}")]
    Decode(String),

    #[error("snapshot encode failed: {0}")]
    Encode(String),
}

/// Named-slot, whole-snapshot storage.
///
/// Implementations must treat every write as a full replacement of the slot's
/// contents; a missing slot reads as `None`, never as an error.
pub trait SnapshotStore: Send + Sync {
    /// Read the full contents of a slot, if it has ever been written.
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace the full contents of a slot.
    fn write(&self, slot: &str, snapshot: &str) -> Result<(), StorageError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, snapshot: &str) -> Result<(), StorageError> {
        (**self).write(slot, snapshot)
    }
}
