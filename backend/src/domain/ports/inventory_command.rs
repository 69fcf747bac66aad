//! Driving port for inventory mutations.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, InventoryEntry, ItemPatch, NewItems, UserId};

/// Entries appended by an add request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsResponse {
    pub added: usize,
    pub items: Vec<InventoryEntry>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryCommand: Send + Sync {
    /// Append a validated batch to the user's inventory.
    async fn add_items(&self, user_id: &UserId, items: NewItems)
    -> Result<AddItemsResponse, Error>;

    /// Patch the first entry named `name`.
    async fn update_item(
        &self,
        user_id: &UserId,
        name: &str,
        patch: ItemPatch,
    ) -> Result<InventoryEntry, Error>;

    /// Remove the first entry named `name`.
    async fn delete_item(&self, user_id: &UserId, name: &str) -> Result<InventoryEntry, Error>;
}
