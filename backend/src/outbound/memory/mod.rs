//! In-process adapters used when no database is configured and in tests.

mod in_memory_store;
mod static_dish_catalogue;

pub use in_memory_store::InMemoryStore;
pub use static_dish_catalogue::{CatalogueLoadError, StaticDishCatalogue};
