//! Inventory domain services.
//!
//! Appends go straight to the repository's atomic append. Updates and deletes
//! read the document, apply the change to the [`Inventory`] aggregate and
//! write it back against the revision they read, re-reading on a stale write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::pantry_service_support::{
    MAX_WRITE_ATTEMPTS, WriteOutcome, classify_write, load_document, map_inventory_error,
    map_pantry_error, revision_conflict, today,
};
use crate::domain::ports::{AddItemsResponse, InventoryCommand, InventoryQuery, PantryRepository};
use crate::domain::{
    EXPIRING_SOON_DAYS, Error, ExpiringItem, ExpiryFilter, Inventory, InventoryColumns,
    InventoryEntry, InventoryError, ItemPatch, NewItems, UserId,
};

/// Inventory service implementing the inventory driving ports.
#[derive(Clone)]
pub struct InventoryService<P> {
    pantry: Arc<P>,
    clock: Arc<dyn Clock>,
    expiring_soon_days: u32,
}

impl<P> InventoryService<P> {
    /// Create a service using the default expiring-soon horizon.
    pub fn new(pantry: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pantry,
            clock,
            expiring_soon_days: EXPIRING_SOON_DAYS,
        }
    }

    /// Override the expiring-soon horizon in days.
    #[must_use]
    pub fn with_expiring_soon_days(mut self, days: u32) -> Self {
        self.expiring_soon_days = days;
        self
    }
}

impl<P> InventoryService<P>
where
    P: PantryRepository,
{
    async fn classify(
        &self,
        user_id: &UserId,
        filter: ExpiryFilter,
    ) -> Result<Vec<ExpiringItem>, Error> {
        let document = load_document(self.pantry.as_ref(), user_id).await?;
        Ok(document
            .inventory
            .classify(today(self.clock.as_ref()), filter))
    }

    /// Apply `change` to a fresh copy of the inventory and write it back,
    /// retrying when another writer got there first.
    async fn rewrite<F>(&self, user_id: &UserId, mut change: F) -> Result<InventoryEntry, Error>
    where
        F: FnMut(&mut Inventory) -> Result<(InventoryEntry, bool), InventoryError> + Send,
    {
        let mut last_seen = (0, 0);
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut document = load_document(self.pantry.as_ref(), user_id).await?;
            let (entry, changed) = change(&mut document.inventory).map_err(map_inventory_error)?;
            if !changed {
                return Ok(entry);
            }
            let result = self
                .pantry
                .replace_inventory(user_id, &document.inventory, document.revision)
                .await;
            match classify_write(result, entry, user_id, attempt)? {
                WriteOutcome::Written(entry) => return Ok(entry),
                WriteOutcome::Stale { expected, actual } => last_seen = (expected, actual),
            }
        }
        warn!(%user_id, "inventory write lost to concurrent writers");
        Err(revision_conflict(last_seen.0, last_seen.1))
    }
}

#[async_trait]
impl<P> InventoryCommand for InventoryService<P>
where
    P: PantryRepository,
{
    async fn add_items(
        &self,
        user_id: &UserId,
        items: NewItems,
    ) -> Result<AddItemsResponse, Error> {
        let entries = items.into_entries();
        self.pantry
            .append_entries(user_id, &entries)
            .await
            .map_err(map_pantry_error)?;
        info!(%user_id, added = entries.len(), "inventory items added");
        Ok(AddItemsResponse {
            added: entries.len(),
            items: entries,
        })
    }

    async fn update_item(
        &self,
        user_id: &UserId,
        name: &str,
        patch: ItemPatch,
    ) -> Result<InventoryEntry, Error> {
        let changed = !patch.is_empty();
        self.rewrite(user_id, |inventory| {
            inventory.update(name, &patch).map(|entry| (entry, changed))
        })
        .await
    }

    async fn delete_item(&self, user_id: &UserId, name: &str) -> Result<InventoryEntry, Error> {
        let removed = self
            .rewrite(user_id, |inventory| {
                inventory.remove(name).map(|entry| (entry, true))
            })
            .await?;
        info!(%user_id, item = %removed.name, "inventory item deleted");
        Ok(removed)
    }
}

#[async_trait]
impl<P> InventoryQuery for InventoryService<P>
where
    P: PantryRepository,
{
    async fn list_items(&self, user_id: &UserId) -> Result<InventoryColumns, Error> {
        let document = load_document(self.pantry.as_ref(), user_id).await?;
        Ok(document.inventory.columns())
    }

    async fn expiring_soon(&self, user_id: &UserId) -> Result<Vec<ExpiringItem>, Error> {
        let filter = ExpiryFilter::ExpiringSoon {
            horizon_days: self.expiring_soon_days,
        };
        self.classify(user_id, filter).await
    }

    async fn expired(&self, user_id: &UserId) -> Result<Vec<ExpiringItem>, Error> {
        self.classify(user_id, ExpiryFilter::Expired).await
    }
}

#[cfg(test)]
#[path = "inventory_service_tests.rs"]
mod tests;
