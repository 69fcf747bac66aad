//! Read-only port over the dish catalogue.

use async_trait::async_trait;

use crate::domain::Dish;

use super::define_port_error;

define_port_error! {
    /// Errors raised by dish catalogue adapters.
    pub enum DishCatalogueError {
        /// Catalogue store could not be reached.
        Connection { message: String } => "dish catalogue connection failed: {message}",
        /// Catalogue read failed or returned malformed rows.
        Query { message: String } => "dish catalogue query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishCatalogue: Send + Sync {
    /// Every dish, in stable catalogue order.
    async fn all_dishes(&self) -> Result<Vec<Dish>, DishCatalogueError>;
}

/// Empty catalogue used when nothing has been seeded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDishCatalogue;

#[async_trait]
impl DishCatalogue for FixtureDishCatalogue {
    async fn all_dishes(&self) -> Result<Vec<Dish>, DishCatalogueError> {
        Ok(Vec::new())
    }
}
