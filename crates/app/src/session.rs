use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use invtrack_catalog::{Product, ProductCatalog};
use invtrack_core::{CountId, DomainError};
use invtrack_counting::{CountDraft, CountField, CountRepository, DeleteAuthorizer, InventoryCount};
use invtrack_infra::{load_catalog, load_counts, save_catalog, save_counts, SnapshotStore, StorageError};

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    Products,
    #[default]
    Counting,
    History,
}

/// Session-level failure: a domain rule or the storage collaborator.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One logical user session over the full in-process snapshot.
///
/// Loads both slots once at startup; every successful mutation rewrites the
/// relevant slot before the operation returns, so the durable snapshot never
/// lags the in-memory one.
#[derive(Debug)]
pub struct Session<S: SnapshotStore> {
    store: S,
    view: AppView,
    catalog: ProductCatalog,
    counts: CountRepository,
    draft: Option<CountDraft>,
}

impl<S: SnapshotStore> Session<S> {
    /// Open a session against a snapshot store.
    ///
    /// A corrupt slot is logged and treated as empty rather than blocking
    /// startup; read failures propagate.
    pub fn open(store: S) -> Result<Self, AppError> {
        let catalog = match load_catalog(&store) {
            Ok(catalog) => catalog,
            Err(StorageError::Decode(reason)) => {
                tracing::warn!(%reason, "product snapshot unreadable, starting empty");
                ProductCatalog::new()
            }
            Err(e) => return Err(e.into()),
        };
        let counts = match load_counts(&store) {
            Ok(counts) => counts,
            Err(StorageError::Decode(reason)) => {
                tracing::warn!(%reason, "count snapshot unreadable, starting empty");
                CountRepository::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            store,
            view: AppView::default(),
            catalog,
            counts,
            draft: None,
        })
    }

    pub fn view(&self) -> AppView {
        self.view
    }

    /// Navigate; leaving a screen abandons any draft in progress.
    pub fn set_view(&mut self, view: AppView) {
        self.view = view;
        self.draft = None;
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn counts(&self) -> &CountRepository {
        &self.counts
    }

    pub fn draft(&self) -> Option<&CountDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut CountDraft> {
        self.draft.as_mut()
    }

    /// Create or update a product, then persist the catalog slot.
    pub fn save_product(&mut self, product: Product, editing: Option<&str>) -> Result<(), AppError> {
        let code = product.code.clone();
        self.catalog.add_or_update(product, editing)?;
        save_catalog(&self.store, &self.catalog)?;
        tracing::info!(%code, editing = editing.is_some(), "product saved");
        Ok(())
    }

    /// Remove a product unconditionally, then persist the catalog slot.
    ///
    /// Historical counts keep the stale code; the export step resolves it to
    /// a fallback label.
    pub fn delete_product(&mut self, code: &str) -> Result<(), AppError> {
        self.catalog.remove(code);
        save_catalog(&self.store, &self.catalog)?;
        tracing::info!(%code, "product removed");
        Ok(())
    }

    /// Start a fresh counting session for `date`.
    pub fn begin_count(&mut self, date: NaiveDate) {
        self.draft = Some(CountDraft::new(date, &self.catalog));
        self.view = AppView::Counting;
    }

    /// Reopen a stored count from the history for editing.
    pub fn edit_count(&mut self, id: CountId) -> Result<(), AppError> {
        let count = self.counts.get(id).ok_or(DomainError::NotFound)?;
        self.draft = Some(CountDraft::edit(count));
        self.view = AppView::Counting;
        Ok(())
    }

    /// Apply a raw-count edit to the draft, if one is open.
    pub fn update_entry(&mut self, code: &str, field: CountField, raw: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.update_entry(code, field, raw, &self.catalog);
        }
    }

    /// Validate, finalize and upsert the open draft, then persist the history
    /// slot.
    ///
    /// Nothing is mutated until validation passes; on success the draft is
    /// closed and the session moves to the history view.
    pub fn save_count(&mut self, now: DateTime<Utc>) -> Result<CountId, AppError> {
        let draft = self.draft.as_ref().ok_or(DomainError::NotFound)?;
        draft.validate_for_save(self.counts.list())?;

        let count = draft.finalize(now);
        let id = count.id();
        let store_name = count.store().to_string();
        self.counts.upsert(count)?;
        save_counts(&self.store, &self.counts)?;

        self.draft = None;
        self.view = AppView::History;
        tracing::info!(%id, store = %store_name, "count saved");
        Ok(id)
    }

    /// Abandon the open draft; falls back to the history view when there is
    /// history to show.
    pub fn cancel_count(&mut self) {
        self.draft = None;
        if self.view == AppView::Counting && !self.counts.is_empty() {
            self.view = AppView::History;
        }
    }

    /// Delete a count once the authorizer grants it, then persist the history
    /// slot. Returns whether a count was removed.
    pub fn delete_count(
        &mut self,
        id: CountId,
        authorizer: &dyn DeleteAuthorizer,
    ) -> Result<bool, AppError> {
        let removed = self.counts.delete(id, authorizer)?;
        if removed {
            save_counts(&self.store, &self.counts)?;
            tracing::info!(%id, "count deleted");
        }
        Ok(removed)
    }

    /// Export one stored count to `dir` as a spreadsheet.
    pub fn export_count(&self, id: CountId, dir: &Path) -> anyhow::Result<PathBuf> {
        let count = self.counts.get(id).ok_or(DomainError::NotFound)?;
        invtrack_export::export_count(count, &self.catalog, dir)
    }
}
