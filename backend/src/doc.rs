//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler, the shared error envelope and the
//! bearer-token security scheme. Swagger UI serves it at `/docs` in debug
//! builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{AddItemsResponse, LoginResponse, SaveDishRequest};
use crate::domain::{
    AccessToken, Error, ErrorCode, ExpiringItem, InventoryColumns, InventoryEntry, SavedDish,
    Suggestion, UserProfile,
};
use crate::inbound::http::accounts::{LoginRequest, RegisterRequest};
use crate::inbound::http::pantry_items::{AddItemsRequest, DeleteItemRequest, UpdateItemRequest};
use crate::inbound::http::saved_dishes::DeleteSavedDishResponse;
use crate::inbound::http::suggestions::SuggestionsResponse;

/// Name of the bearer security scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/v1/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pantry API",
        description = "Pantry inventory tracking and expiry-driven dish suggestions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::pantry_items::list_items,
        crate::inbound::http::pantry_items::add_items,
        crate::inbound::http::pantry_items::update_item,
        crate::inbound::http::pantry_items::delete_item,
        crate::inbound::http::pantry_items::expiring_soon,
        crate::inbound::http::pantry_items::expired,
        crate::inbound::http::suggestions::suggest_dishes,
        crate::inbound::http::saved_dishes::list_saved_dishes,
        crate::inbound::http::saved_dishes::save_dish,
        crate::inbound::http::saved_dishes::delete_saved_dish,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserProfile,
        AccessToken,
        LoginResponse,
        RegisterRequest,
        LoginRequest,
        InventoryColumns,
        InventoryEntry,
        AddItemsRequest,
        AddItemsResponse,
        UpdateItemRequest,
        DeleteItemRequest,
        ExpiringItem,
        Suggestion,
        SuggestionsResponse,
        SavedDish,
        SaveDishRequest,
        DeleteSavedDishResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login and the current account"),
        (name = "pantry", description = "Pantry items and expiry listings"),
        (name = "suggestions", description = "Dish suggestions for expiring items"),
        (name = "saved-dishes", description = "Dishes the user chose to keep"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("UserProfile", "email")]
    #[case("InventoryColumns", "expiryDates")]
    #[case("SavedDish", "dateSelected")]
    fn schemas_expose_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[rstest]
    #[case("/api/v1/auth/register")]
    #[case("/api/v1/pantry/items")]
    #[case("/api/v1/pantry/suggestions")]
    #[case("/api/v1/pantry/saved-dishes/{name}")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
