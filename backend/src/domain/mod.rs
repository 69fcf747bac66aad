//! Domain primitives, aggregates and services.
//!
//! Purpose: define the pantry's strongly typed entities and the services
//! that implement the driving ports. Nothing here knows about HTTP or SQL;
//! adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Inventory, InventoryEntry, NewItems, ItemPatch: the pantry ledger.
//! - Dish, Suggestion, SuggestionPolicy, suggest: the suggestion matcher.
//! - Account, UserId, UserProfile, LoginCredentials, Registration: identity.
//! - *Service: driving-port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod inventory;
pub mod inventory_service;
mod pantry_service_support;
pub mod ports;
pub mod saved_dish;
pub mod saved_dishes_service;
pub mod suggestion_service;
pub mod suggestions;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, CredentialsValidationError, LoginCredentials, PASSWORD_MIN_LEN, PasswordHash,
    Registration,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::inventory::{
    DEFAULT_UNIT, EXPIRING_SOON_DAYS, ExpiringItem, ExpiryFilter, Inventory, InventoryColumns,
    InventoryEntry, InventoryError, ItemPatch, NewItems, SUGGESTION_WINDOW_DAYS,
    parse_expiry_date,
};
pub use self::inventory_service::InventoryService;
pub use self::saved_dish::{SavedDish, SavedDishValidationError, remove_saved_dishes};
pub use self::saved_dishes_service::SavedDishesService;
pub use self::suggestion_service::SuggestionService;
pub use self::suggestions::{
    DEFAULT_SUGGESTION_CAP, Dish, DishValidationError, Suggestion, SuggestionPolicy, suggest,
    youtube_search_url,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Account, EmailAddress, USER_NAME_MAX, UserId, UserName, UserProfile, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pantry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such item"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
