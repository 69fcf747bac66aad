//! Driving port for the saved-dish list.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, SavedDish, UserId};

/// Dish selected by the user, typically copied from a suggestion.
///
/// Extra suggestion fields such as `suggested_due_to` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct SaveDishRequest {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedDishesCommand: Send + Sync {
    /// Saved dishes in the order they were saved.
    async fn list(&self, user_id: &UserId) -> Result<Vec<SavedDish>, Error>;

    /// Append a dish, stamped with the current time.
    async fn save(&self, user_id: &UserId, request: SaveDishRequest) -> Result<SavedDish, Error>;

    /// Remove every saved dish named `name` and return how many went.
    async fn delete(&self, user_id: &UserId, name: &str) -> Result<usize, Error>;
}
