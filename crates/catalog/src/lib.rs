//! Product catalog domain module.
//!
//! This crate contains business rules for the product catalog, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod catalog;
pub mod product;

pub use catalog::ProductCatalog;
pub use product::{Product, ProductStatus, UnitType};
