//! `invtrack-infra` — durable storage collaborators.
//!
//! The core reads two whole-snapshot slots once at startup and rewrites the
//! relevant slot after every successful mutation; nothing here is
//! incremental.

pub mod snapshot;

pub use snapshot::{
    load_catalog, load_counts, save_catalog, save_counts, FsSnapshotStore, InMemorySnapshotStore,
    SnapshotStore, StorageError, COUNTS_SLOT, PRODUCTS_SLOT,
};
