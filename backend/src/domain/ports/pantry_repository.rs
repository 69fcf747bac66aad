//! Port for the per-user pantry document.
//!
//! Each user owns one document holding the inventory and the saved dishes,
//! guarded by a revision counter. Appends are single atomic writes that bump
//! the revision; replacements are compare-and-swap on the revision so that a
//! concurrent writer is detected rather than overwritten.

use async_trait::async_trait;

use crate::domain::{Inventory, InventoryEntry, SavedDish, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pantry repository adapters.
    pub enum PantryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "pantry repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pantry repository query failed: {message}",
        /// No pantry document exists for the user.
        MissingUser { user_id: String } => "no pantry for user {user_id}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
    }
}

/// Snapshot of a user's pantry document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PantryDocument {
    pub inventory: Inventory,
    pub saved_dishes: Vec<SavedDish>,
    /// Incremented by every successful write.
    pub revision: u32,
}

/// Port for pantry document storage.
///
/// Every mutating method returns the revision after the write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PantryRepository: Send + Sync {
    /// Load the user's document, or `None` when the user does not exist.
    async fn load(&self, user_id: &UserId) -> Result<Option<PantryDocument>, PantryRepositoryError>;

    /// Atomically append entries to the end of the inventory.
    async fn append_entries(
        &self,
        user_id: &UserId,
        entries: &[InventoryEntry],
    ) -> Result<u32, PantryRepositoryError>;

    /// Replace the inventory if the stored revision equals `expected_revision`.
    async fn replace_inventory(
        &self,
        user_id: &UserId,
        inventory: &Inventory,
        expected_revision: u32,
    ) -> Result<u32, PantryRepositoryError>;

    /// Atomically append one saved dish.
    async fn append_saved_dish(
        &self,
        user_id: &UserId,
        dish: &SavedDish,
    ) -> Result<u32, PantryRepositoryError>;

    /// Replace the saved dishes if the stored revision equals
    /// `expected_revision`.
    async fn replace_saved_dishes(
        &self,
        user_id: &UserId,
        dishes: &[SavedDish],
        expected_revision: u32,
    ) -> Result<u32, PantryRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn revision_mismatch_error_formats_correctly() {
        let message = PantryRepositoryError::revision_mismatch(2_u32, 5_u32).to_string();
        assert!(message.contains("expected 2"));
        assert!(message.contains("found 5"));
    }

    #[rstest]
    fn missing_user_names_the_user() {
        let id = UserId::random();
        let message = PantryRepositoryError::missing_user(id.to_string()).to_string();
        assert!(message.contains(id.as_ref()));
    }
}
