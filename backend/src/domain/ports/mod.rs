//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_repository;
mod dish_catalogue;
mod inventory_command;
mod inventory_query;
mod pantry_repository;
mod password_hasher;
mod saved_dishes_command;
mod suggestion_query;
mod token_service;

pub use account_command::{AccountCommand, AccountQuery, LoginResponse};
#[cfg(test)]
pub use account_command::{MockAccountCommand, MockAccountQuery};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use dish_catalogue::MockDishCatalogue;
pub use dish_catalogue::{DishCatalogue, DishCatalogueError, FixtureDishCatalogue};
#[cfg(test)]
pub use inventory_command::MockInventoryCommand;
pub use inventory_command::{AddItemsResponse, InventoryCommand};
pub use inventory_query::InventoryQuery;
#[cfg(test)]
pub use inventory_query::MockInventoryQuery;
#[cfg(test)]
pub use pantry_repository::MockPantryRepository;
pub use pantry_repository::{PantryDocument, PantryRepository, PantryRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use saved_dishes_command::MockSavedDishesCommand;
pub use saved_dishes_command::{SaveDishRequest, SavedDishesCommand};
#[cfg(test)]
pub use suggestion_query::MockSuggestionQuery;
pub use suggestion_query::{SuggestionOutcome, SuggestionQuery};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenService, TokenServiceError};
