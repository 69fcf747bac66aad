//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers stay thin: they parse JSON, resolve the caller through
//! [`auth::AuthenticatedUser`] and delegate to the driving ports held in
//! [`state::HttpState`].

pub mod accounts;
pub mod auth;
pub mod error;
pub mod health;
pub mod json;
pub mod pantry_items;
pub mod saved_dishes;
pub mod state;
pub mod suggestions;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` handler and the shared JSON configuration.
///
/// Mount inside a scope: `web::scope("/api/v1").configure(configure_api)`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json::json_config())
        .service(accounts::register)
        .service(accounts::login)
        .service(accounts::current_user)
        .service(pantry_items::expiring_soon)
        .service(pantry_items::expired)
        .service(pantry_items::list_items)
        .service(pantry_items::add_items)
        .service(pantry_items::update_item)
        .service(pantry_items::delete_item)
        .service(suggestions::suggest_dishes)
        .service(saved_dishes::list_saved_dishes)
        .service(saved_dishes::save_dish)
        .service(saved_dishes::delete_saved_dish);
}
