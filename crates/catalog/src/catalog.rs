use serde::{Deserialize, Serialize};

use invtrack_core::{DomainError, DomainResult};

use crate::product::Product;

/// Ordered collection of products, keyed by their unique `code`.
///
/// Holds insertion order; callers sort for presentation. Serializes as the
/// plain product list so the snapshot is the collection itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Insert a new product or replace an edited one.
    ///
    /// `editing` carries the original code of the record being edited (the
    /// code field is immutable in the editing form, so edits target by the
    /// original code). Fails without mutating the catalog when `code` or
    /// `name` is blank, or when the code belongs to a different identity.
    pub fn add_or_update(&mut self, product: Product, editing: Option<&str>) -> DomainResult<()> {
        if product.code.trim().is_empty() || product.name.trim().is_empty() {
            return Err(DomainError::validation("code and name are required"));
        }

        let duplicate = self
            .products
            .iter()
            .any(|p| p.code == product.code && Some(p.code.as_str()) != editing);
        if duplicate {
            return Err(DomainError::duplicate_code(&product.code));
        }

        match editing {
            Some(original) => {
                let slot = self
                    .products
                    .iter_mut()
                    .find(|p| p.code == original)
                    .ok_or(DomainError::NotFound)?;
                *slot = product;
            }
            None => self.products.push(product),
        }

        Ok(())
    }

    /// Remove a product unconditionally.
    ///
    /// Does not cascade to historical counts: entries keep the stale code and
    /// the export step resolves them to a fallback label.
    pub fn remove(&mut self, code: &str) {
        self.products.retain(|p| p.code != code);
    }

    pub fn find(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Lookup that reports a missing code as the non-fatal reference error,
    /// for callers that degrade to a fallback value instead of failing.
    pub fn resolve(&self, code: &str) -> DomainResult<&Product> {
        self.find(code)
            .ok_or_else(|| DomainError::reference_not_found(code))
    }

    /// All products, in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Active products, in insertion order. Seeds new count drafts.
    pub fn active_only(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_active())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
