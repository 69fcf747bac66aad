//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the table definitions (`schema.rs`)
//! stay private to this module. Connections come from a `bb8` pool driven by
//! `diesel-async`, and every database failure is mapped into the owning
//! port's error type.
//!
//! # Example
//!
//! ```ignore
//! use pantry::outbound::persistence::{DbPool, DieselPantryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pantry")).await?;
//! let pantry = DieselPantryRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_dish_catalogue;
mod diesel_error_mapping;
mod diesel_pantry_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_dish_catalogue::DieselDishCatalogue;
pub use diesel_pantry_repository::DieselPantryRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
