//! Whole-snapshot slot storage.
//!
//! Two named slots hold the full product list and the full count history,
//! each serialized as a complete, self-contained JSON snapshot (no
//! incremental diffs).

mod fs;
mod in_memory;
mod store;

pub use fs::FsSnapshotStore;
pub use in_memory::InMemorySnapshotStore;
pub use store::{SnapshotStore, StorageError, COUNTS_SLOT, PRODUCTS_SLOT};

use invtrack_catalog::ProductCatalog;
use invtrack_counting::CountRepository;

/// Load the product catalog from its slot; an empty slot yields an empty
/// catalog.
pub fn load_catalog<S: SnapshotStore + ?Sized>(store: &S) -> Result<ProductCatalog, StorageError> {
    match store.read(PRODUCTS_SLOT)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| StorageError::Decode(format!("{PRODUCTS_SLOT}: {e}"))),
        None => Ok(ProductCatalog::new()),
    }
}

/// Rewrite the product slot with the full catalog.
pub fn save_catalog<S: SnapshotStore + ?Sized>(
    store: &S,
    catalog: &ProductCatalog,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(catalog)
        .map_err(|e| StorageError::Encode(format!("{PRODUCTS_SLOT}: {e}")))?;
    store.write(PRODUCTS_SLOT, &raw)
}

/// Load the count history from its slot; an empty slot yields an empty
/// repository.
pub fn load_counts<S: SnapshotStore + ?Sized>(store: &S) -> Result<CountRepository, StorageError> {
    match store.read(COUNTS_SLOT)? {
        Some(raw) => {
            serde_json::from_str(&raw).map_err(|e| StorageError::Decode(format!("{COUNTS_SLOT}: {e}")))
        }
        None => Ok(CountRepository::new()),
    }
}

/// Rewrite the history slot with the full ordered collection.
pub fn save_counts<S: SnapshotStore + ?Sized>(
    store: &S,
    counts: &CountRepository,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(counts)
        .map_err(|e| StorageError::Encode(format!("{COUNTS_SLOT}: {e}")))?;
    store.write(COUNTS_SLOT, &raw)
}
