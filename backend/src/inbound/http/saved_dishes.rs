//! Saved ("selected") dish handlers.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Serialize;

use crate::domain::ports::SaveDishRequest;
use crate::domain::{Error, SavedDish};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::blank_field_error;

/// Result of deleting saved dishes by name.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteSavedDishResponse {
    /// Number of saved entries that carried the name.
    pub removed: usize,
}

/// Saved dishes in the order they were selected.
#[utoipa::path(
    get,
    path = "/api/v1/pantry/saved-dishes",
    responses(
        (status = 200, description = "Saved dishes", body = [SavedDish]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["saved-dishes"],
    operation_id = "listSavedDishes"
)]
#[get("/pantry/saved-dishes")]
pub async fn list_saved_dishes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<SavedDish>>> {
    let dishes = state.saved_dishes.list(user.id()).await?;
    Ok(web::Json(dishes))
}

/// Record a dish the user picked, stamped with the selection time.
#[utoipa::path(
    post,
    path = "/api/v1/pantry/saved-dishes",
    request_body = SaveDishRequest,
    responses(
        (status = 201, description = "Dish saved", body = SavedDish),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["saved-dishes"],
    operation_id = "saveDish"
)]
#[post("/pantry/saved-dishes")]
pub async fn save_dish(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<SaveDishRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    if request.name.trim().is_empty() {
        return Err(blank_field_error("name"));
    }
    let saved = state.saved_dishes.save(user.id(), request).await?;
    Ok(HttpResponse::Created().json(saved))
}

/// Remove every saved dish with the given name.
#[utoipa::path(
    delete,
    path = "/api/v1/pantry/saved-dishes/{name}",
    params(("name" = String, Path, description = "Exact dish name")),
    responses(
        (status = 200, description = "Dishes removed", body = DeleteSavedDishResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No saved dish with this name", body = Error),
        (status = 409, description = "Concurrent modification", body = Error)
    ),
    tags = ["saved-dishes"],
    operation_id = "deleteSavedDish"
)]
#[delete("/pantry/saved-dishes/{name}")]
pub async fn delete_saved_dish(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    name: web::Path<String>,
) -> ApiResult<web::Json<DeleteSavedDishResponse>> {
    let removed = state.saved_dishes.delete(user.id(), &name).await?;
    Ok(web::Json(DeleteSavedDishResponse { removed }))
}
