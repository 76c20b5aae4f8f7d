use serde::{Deserialize, Serialize};

use invtrack_core::{CountId, DomainError, DomainResult, Entity};

use crate::count::InventoryCount;

/// Shared secret required to delete a count from the history.
pub const DELETE_SECRET: &str = "102030";

/// Capability injected into [`CountRepository::delete`].
///
/// Models the secret prompt and the final confirmation as pre-supplied
/// decisions so the repository stays decidable without a UI present.
pub trait DeleteAuthorizer {
    /// Ask for the shared-secret token. `None` means the prompt was
    /// cancelled.
    fn request_token(&self) -> Option<String>;

    /// Final yes/no gate shown once the token checks out. Deletion is
    /// irreversible.
    fn confirm_irreversible(&self) -> bool;
}

/// Ordered collection of inventory counts.
///
/// Holds insertion order and enforces the one-count-per-(store, date)
/// invariant. Serializes as the plain count list so the snapshot is the
/// collection itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountRepository {
    counts: Vec<InventoryCount>,
}

impl CountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: Vec<InventoryCount>) -> Self {
        Self { counts }
    }

    /// All counts, in insertion order.
    pub fn list(&self) -> &[InventoryCount] {
        &self.counts
    }

    /// Counts in presentation order: date descending, insertion order within
    /// a date.
    pub fn history(&self) -> Vec<&InventoryCount> {
        let mut counts: Vec<&InventoryCount> = self.counts.iter().collect();
        counts.sort_by(|a, b| b.date().cmp(&a.date()));
        counts
    }

    pub fn get(&self, id: CountId) -> Option<&InventoryCount> {
        self.counts.iter().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Insert or replace a count; the only mutation path.
    ///
    /// Replacing keeps the count's position in the collection. Fails without
    /// mutating when another count (different id) already holds the same
    /// (store, date) pair.
    pub fn upsert(&mut self, count: InventoryCount) -> DomainResult<()> {
        let collision = self.counts.iter().any(|c| {
            !c.same_identity_as(&count) && c.store() == count.store() && c.date() == count.date()
        });
        if collision {
            return Err(DomainError::duplicate_store_date(count.store(), count.date()));
        }

        match self.counts.iter().position(|c| c.same_identity_as(&count)) {
            Some(index) => self.counts[index] = count,
            None => self.counts.push(count),
        }
        Ok(())
    }

    /// Delete a count after the authorizer grants it.
    ///
    /// A wrong token fails with `PermissionDenied` and leaves the collection
    /// unchanged; a cancelled prompt or declined confirmation is a quiet
    /// no-op. Returns whether a count was actually removed.
    pub fn delete(&mut self, id: CountId, authorizer: &dyn DeleteAuthorizer) -> DomainResult<bool> {
        let token = match authorizer.request_token() {
            Some(token) => token,
            None => return Ok(false),
        };
        if token != DELETE_SECRET {
            return Err(DomainError::PermissionDenied);
        }
        if !authorizer.confirm_irreversible() {
            return Ok(false);
        }

        let before = self.counts.len();
        self.counts.retain(|c| c.id() != id);
        Ok(self.counts.len() < before)
    }
}
