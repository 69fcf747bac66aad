//! Driving port for inventory reads.

use async_trait::async_trait;

use crate::domain::{Error, ExpiringItem, InventoryColumns, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryQuery: Send + Sync {
    /// The inventory as four index-aligned lists.
    async fn list_items(&self, user_id: &UserId) -> Result<InventoryColumns, Error>;

    /// Entries expiring after today and within the configured horizon.
    async fn expiring_soon(&self, user_id: &UserId) -> Result<Vec<ExpiringItem>, Error>;

    /// Entries whose expiry is before today.
    async fn expired(&self, user_id: &UserId) -> Result<Vec<ExpiringItem>, Error>;
}
