//! Inventory counting domain module.
//!
//! This crate contains the consolidation arithmetic and the count aggregate
//! with its consistency rules, implemented purely as deterministic domain
//! logic (no IO, no storage).

pub mod consolidate;
pub mod count;
pub mod repository;
pub mod stores;

pub use consolidate::{consolidate, consolidate_product};
pub use count::{CountDraft, CountField, InventoryCount, InventoryEntry};
pub use repository::{CountRepository, DeleteAuthorizer, DELETE_SECRET};
