use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use invtrack_catalog::{Product, ProductCatalog};
use invtrack_core::{CountId, DomainError, DomainResult, Entity};

use crate::consolidate::consolidate_product;
use crate::stores;

/// Raw-count field of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Boxes,
    Packs,
    Units,
}

/// Per-product line item inside a count.
///
/// `total_consolidated` is derived state: it always equals the conversion
/// engine's output for the current raw counts and the referenced product's
/// factors, and is never mutated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    product_code: String,
    boxes: f64,
    packs: f64,
    units: f64,
    total_consolidated: f64,
}

impl InventoryEntry {
    /// Entry seeded at zero for a product, as used when a new draft opens.
    pub fn zeroed(product_code: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            boxes: 0.0,
            packs: 0.0,
            units: 0.0,
            total_consolidated: 0.0,
        }
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn boxes(&self) -> f64 {
        self.boxes
    }

    pub fn packs(&self) -> f64 {
        self.packs
    }

    pub fn units(&self) -> f64 {
        self.units
    }

    pub fn total_consolidated(&self) -> f64 {
        self.total_consolidated
    }

    fn set_raw(&mut self, field: CountField, value: f64) {
        match field {
            CountField::Boxes => self.boxes = value,
            CountField::Packs => self.packs = value,
            CountField::Units => self.units = value,
        }
    }

    fn recompute(&mut self, product: &Product) {
        self.total_consolidated = consolidate_product(product, self.boxes, self.packs, self.units);
    }
}

/// One recorded stocktake session for a specific store and date.
///
/// Built only by [`CountDraft::finalize`] (or deserialized from a snapshot),
/// which is what keeps the derived totals and the two timestamps honest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCount {
    id: CountId,
    date: NaiveDate,
    responsible: String,
    store: String,
    entries: Vec<InventoryEntry>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl InventoryCount {
    pub fn id(&self) -> CountId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn responsible(&self) -> &str {
        &self.responsible
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Timestamp of the first save, immutable across edits.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the most recent edit; `None` until the first edit.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for InventoryCount {
    type Id = CountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
struct EditTarget {
    id: CountId,
    created_at: DateTime<Utc>,
}

/// Mutable counting session: header fields plus one entry per product.
///
/// Lives in memory while the user edits raw counts; becomes durable only when
/// validated and finalized into an [`InventoryCount`].
#[derive(Debug, Clone, PartialEq)]
pub struct CountDraft {
    editing: Option<EditTarget>,
    date: NaiveDate,
    responsible: String,
    store: String,
    entries: Vec<InventoryEntry>,
}

impl CountDraft {
    /// Open a fresh draft, seeding one zeroed entry per currently-active
    /// product.
    pub fn new(date: NaiveDate, catalog: &ProductCatalog) -> Self {
        Self {
            editing: None,
            date,
            responsible: String::new(),
            store: String::new(),
            entries: catalog
                .active_only()
                .map(|p| InventoryEntry::zeroed(&p.code))
                .collect(),
        }
    }

    /// Reopen a stored count for editing.
    ///
    /// Reuses the stored entries verbatim rather than re-seeding, so entries
    /// for products since deactivated or removed remain editable.
    pub fn edit(count: &InventoryCount) -> Self {
        Self {
            editing: Some(EditTarget {
                id: count.id,
                created_at: count.created_at,
            }),
            date: count.date,
            responsible: count.responsible.clone(),
            store: count.store.clone(),
            entries: count.entries.clone(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn responsible(&self) -> &str {
        &self.responsible
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Identifier of the count being edited, if this draft reopened one.
    pub fn editing_id(&self) -> Option<CountId> {
        self.editing.as_ref().map(|t| t.id)
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_responsible(&mut self, responsible: impl Into<String>) {
        self.responsible = responsible.into();
    }

    pub fn set_store(&mut self, store: impl Into<String>) {
        self.store = store.into();
    }

    /// Apply a raw-count edit to one entry.
    ///
    /// The raw text is parsed as a number; empty or unparseable input counts
    /// as 0. Negative values are rejected silently, leaving the entry
    /// unchanged. On acceptance the consolidated total is recomputed with the
    /// product's current factors; when the product is gone from the catalog
    /// the raw field still updates but the total keeps its previous value.
    pub fn update_entry(&mut self, code: &str, field: CountField, raw: &str, catalog: &ProductCatalog) {
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        if value < 0.0 {
            return;
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.product_code == code) {
            entry.set_raw(field, value);
            if let Some(product) = catalog.find(code) {
                entry.recompute(product);
            }
        }
    }

    /// Number of entries with a positive consolidated total (the figure shown
    /// in the save confirmation summary).
    pub fn items_with_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.total_consolidated > 0.0)
            .count()
    }

    /// Run the pre-save checks against the stored counts.
    ///
    /// Required-field checks run first; the store+date duplicate check runs
    /// last and skips the count this draft is editing.
    pub fn validate_for_save(&self, existing: &[InventoryCount]) -> DomainResult<()> {
        if self.responsible.trim().is_empty() {
            return Err(DomainError::validation("responsible name is required"));
        }
        if self.store.is_empty() {
            return Err(DomainError::validation("a store must be selected"));
        }
        if !stores::is_known(&self.store) {
            return Err(DomainError::validation(format!(
                "unknown store: {}",
                self.store
            )));
        }

        let own_id = self.editing_id();
        let duplicate = existing
            .iter()
            .any(|c| c.date == self.date && c.store == self.store && Some(c.id) != own_id);
        if duplicate {
            return Err(DomainError::duplicate_store_date(&self.store, self.date));
        }

        Ok(())
    }

    /// Seal the draft into a durable count.
    ///
    /// First save assigns a fresh id and `created_at = now`; saving an edited
    /// count keeps its id and `created_at` and stamps `updated_at = now`,
    /// which is what distinguishes "first save" from "edited at least once".
    pub fn finalize(&self, now: DateTime<Utc>) -> InventoryCount {
        let (id, created_at, updated_at) = match &self.editing {
            Some(target) => (target.id, target.created_at, Some(now)),
            None => (CountId::new(), now, None),
        };

        InventoryCount {
            id,
            date: self.date,
            responsible: self.responsible.clone(),
            store: self.store.clone(),
            entries: self.entries.clone(),
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invtrack_catalog::{ProductStatus, UnitType};

    fn product(code: &str, status: ProductStatus) -> Product {
        Product {
            code: code.to_string(),
            name: format!("Produto {code}"),
            category: None,
            unit: UnitType::Piece,
            factor_box: 10.0,
            factor_pack: 5.0,
            factor_unit: 1.0,
            status,
        }
    }

    fn catalog() -> ProductCatalog {
        let mut catalog = ProductCatalog::new();
        catalog
            .add_or_update(product("1001", ProductStatus::Active), None)
            .unwrap();
        catalog
            .add_or_update(product("2002", ProductStatus::Inactive), None)
            .unwrap();
        catalog
            .add_or_update(product("3003", ProductStatus::Active), None)
            .unwrap();
        catalog
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2024-05-01T14:30:00Z".parse().unwrap()
    }

    #[test]
    fn new_draft_seeds_zeroed_entries_for_active_products_only() {
        let draft = CountDraft::new(date(2024, 5, 1), &catalog());

        let codes: Vec<&str> = draft.entries().iter().map(|e| e.product_code()).collect();
        assert_eq!(codes, vec!["1001", "3003"]);
        assert!(draft.entries().iter().all(|e| e.total_consolidated() == 0.0));
    }

    #[test]
    fn update_entry_recomputes_consolidated_total() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);

        draft.update_entry("1001", CountField::Boxes, "2", &catalog);
        draft.update_entry("1001", CountField::Packs, "3", &catalog);
        draft.update_entry("1001", CountField::Units, "4", &catalog);

        let entry = &draft.entries()[0];
        assert_eq!(entry.total_consolidated(), 39.000);
    }

    #[test]
    fn update_entry_is_idempotent() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);

        draft.update_entry("1001", CountField::Boxes, "2.5", &catalog);
        let once = draft.entries()[0].clone();
        draft.update_entry("1001", CountField::Boxes, "2.5", &catalog);
        assert_eq!(draft.entries()[0], once);
    }

    #[test]
    fn negative_input_is_a_silent_no_op() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);

        draft.update_entry("1001", CountField::Boxes, "2", &catalog);
        draft.update_entry("1001", CountField::Boxes, "-1", &catalog);

        assert_eq!(draft.entries()[0].boxes(), 2.0);
        assert_eq!(draft.entries()[0].total_consolidated(), 20.0);
    }

    #[test]
    fn unparseable_input_counts_as_zero() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);

        draft.update_entry("1001", CountField::Boxes, "2", &catalog);
        for raw in ["", "  ", "abc", "NaN"] {
            draft.update_entry("1001", CountField::Boxes, raw, &catalog);
            assert_eq!(draft.entries()[0].boxes(), 0.0, "raw input {raw:?}");
        }
    }

    #[test]
    fn missing_product_freezes_the_total_but_updates_raw_counts() {
        let mut catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);
        draft.update_entry("1001", CountField::Boxes, "2", &catalog);
        assert_eq!(draft.entries()[0].total_consolidated(), 20.0);

        catalog.remove("1001");
        draft.update_entry("1001", CountField::Boxes, "9", &catalog);

        assert_eq!(draft.entries()[0].boxes(), 9.0);
        assert_eq!(draft.entries()[0].total_consolidated(), 20.0);
    }

    #[test]
    fn edit_reuses_stored_entries_even_after_catalog_changes() {
        let mut catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);
        draft.set_responsible("Maria");
        draft.set_store("CAMBUÍ");
        draft.update_entry("1001", CountField::Units, "7", &catalog);
        let saved = draft.finalize(now());

        // Product removed and a new one activated after the count was saved.
        catalog.remove("1001");
        catalog
            .add_or_update(product("4004", ProductStatus::Active), None)
            .unwrap();

        let reopened = CountDraft::edit(&saved);
        let codes: Vec<&str> = reopened.entries().iter().map(|e| e.product_code()).collect();
        assert_eq!(codes, vec!["1001", "3003"]);
        assert_eq!(reopened.entries()[0].units(), 7.0);
        assert_eq!(reopened.editing_id(), Some(saved.id()));
    }

    #[test]
    fn validation_requires_responsible_then_store() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);

        let err = draft.validate_for_save(&[]).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("responsible name is required")
        );

        draft.set_responsible("   ");
        assert!(draft.validate_for_save(&[]).is_err());

        draft.set_responsible("Maria");
        let err = draft.validate_for_save(&[]).unwrap_err();
        assert_eq!(err, DomainError::validation("a store must be selected"));

        draft.set_store("LOJA FANTASMA");
        let err = draft.validate_for_save(&[]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        draft.set_store("CAMBUÍ");
        assert!(draft.validate_for_save(&[]).is_ok());
    }

    #[test]
    fn duplicate_store_date_is_rejected_but_not_for_self() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);
        draft.set_responsible("Maria");
        draft.set_store("CAMBUÍ");
        let saved = draft.finalize(now());

        // A second, distinct count for the same store and date.
        let mut second = CountDraft::new(date(2024, 5, 1), &catalog);
        second.set_responsible("João");
        second.set_store("CAMBUÍ");
        let err = second
            .validate_for_save(std::slice::from_ref(&saved))
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate_store_date("CAMBUÍ", date(2024, 5, 1)));

        // Editing the saved count may keep its own store/date pair.
        let reopened = CountDraft::edit(&saved);
        assert!(reopened.validate_for_save(std::slice::from_ref(&saved)).is_ok());

        // Same date at a different store is fine.
        second.set_store("DOM 66");
        assert!(second.validate_for_save(std::slice::from_ref(&saved)).is_ok());
    }

    #[test]
    fn finalize_assigns_id_and_created_at_once() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);
        draft.set_responsible("Maria");
        draft.set_store("CAMBUÍ");

        let first = draft.finalize(now());
        assert_eq!(first.created_at(), now());
        assert_eq!(first.updated_at(), None);

        let later: DateTime<Utc> = "2024-05-02T09:00:00Z".parse().unwrap();
        let mut reopened = CountDraft::edit(&first);
        reopened.set_responsible("João");
        let second = reopened.finalize(later);

        assert_eq!(second.id(), first.id());
        assert_eq!(second.created_at(), first.created_at());
        assert_eq!(second.updated_at(), Some(later));
        assert_eq!(second.responsible(), "João");
    }

    #[test]
    fn items_with_count_tallies_positive_totals() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);
        assert_eq!(draft.items_with_count(), 0);

        draft.update_entry("1001", CountField::Units, "3", &catalog);
        assert_eq!(draft.items_with_count(), 1);

        draft.update_entry("1001", CountField::Units, "0", &catalog);
        assert_eq!(draft.items_with_count(), 0);
    }

    #[test]
    fn count_snapshot_round_trips_through_json() {
        let catalog = catalog();
        let mut draft = CountDraft::new(date(2024, 5, 1), &catalog);
        draft.set_responsible("Maria");
        draft.set_store("CAMBUÍ");
        draft.update_entry("1001", CountField::Boxes, "2", &catalog);
        let count = draft.finalize(now());

        let json = serde_json::to_string(&count).unwrap();
        let restored: InventoryCount = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, count);

        // First save: updatedAt must be absent, not null.
        assert!(!json.contains("updatedAt"));
    }

    #[test]
    fn entry_uses_snapshot_wire_field_names() {
        let entry = InventoryEntry::zeroed("1001");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("productCode").is_some());
        assert!(json.get("totalConsolidated").is_some());
    }
}
