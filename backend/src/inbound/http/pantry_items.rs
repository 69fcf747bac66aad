//! Pantry inventory handlers.
//!
//! ```text
//! GET    /api/v1/pantry/items
//! POST   /api/v1/pantry/items {"items":["milk"],"expiryDates":["2025-06-05"],"quantities":["1"]}
//! PATCH  /api/v1/pantry/items {"item":"milk","quantity":"2"}
//! DELETE /api/v1/pantry/items {"item":"milk"}
//! GET    /api/v1/pantry/items/expiring-soon
//! GET    /api/v1/pantry/items/expired
//! ```

use actix_web::{delete, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AddItemsResponse;
use crate::domain::{Error, ExpiringItem, InventoryColumns, InventoryEntry, ItemPatch, NewItems};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Batch of items to append, as four parallel lists.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsRequest {
    pub items: Vec<String>,
    #[serde(default)]
    pub expiry_dates: Vec<String>,
    #[serde(default)]
    pub quantities: Vec<String>,
    /// Optional; blank or omitted units default to `pieces`.
    #[serde(default)]
    pub units: Option<Vec<String>>,
}

/// Partial update addressed by item name.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub item: String,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Item to remove; only the first entry with this name is deleted.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DeleteItemRequest {
    pub item: String,
}

/// List the pantry as parallel lists.
#[utoipa::path(
    get,
    path = "/api/v1/pantry/items",
    responses(
        (status = 200, description = "Pantry contents", body = InventoryColumns),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["pantry"],
    operation_id = "listItems"
)]
#[get("/pantry/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<InventoryColumns>> {
    let columns = state.inventory_query.list_items(user.id()).await?;
    Ok(web::Json(columns))
}

/// Append items to the end of the pantry.
#[utoipa::path(
    post,
    path = "/api/v1/pantry/items",
    request_body = AddItemsRequest,
    responses(
        (status = 200, description = "Items appended", body = AddItemsResponse),
        (status = 400, description = "Parallel lists do not line up", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["pantry"],
    operation_id = "addItems"
)]
#[post("/pantry/items")]
pub async fn add_items(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<AddItemsRequest>,
) -> ApiResult<web::Json<AddItemsResponse>> {
    let AddItemsRequest {
        items,
        expiry_dates,
        quantities,
        units,
    } = payload.into_inner();
    let batch = NewItems::try_new(items, expiry_dates, quantities, units)?;
    let added = state.inventory.add_items(user.id(), batch).await?;
    Ok(web::Json(added))
}

/// Change the expiry, quantity or unit of one item.
#[utoipa::path(
    patch,
    path = "/api/v1/pantry/items",
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Updated entry", body = InventoryEntry),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Item not found", body = Error),
        (status = 409, description = "Concurrent modification", body = Error)
    ),
    tags = ["pantry"],
    operation_id = "updateItem"
)]
#[patch("/pantry/items")]
pub async fn update_item(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateItemRequest>,
) -> ApiResult<web::Json<InventoryEntry>> {
    let UpdateItemRequest {
        item,
        expiry_date,
        quantity,
        unit,
    } = payload.into_inner();
    let patch = ItemPatch {
        expiry_date,
        quantity,
        unit,
    };
    let entry = state.inventory.update_item(user.id(), &item, patch).await?;
    Ok(web::Json(entry))
}

/// Remove the first item with the given name.
#[utoipa::path(
    delete,
    path = "/api/v1/pantry/items",
    request_body = DeleteItemRequest,
    responses(
        (status = 200, description = "Removed entry", body = InventoryEntry),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Item not found", body = Error),
        (status = 409, description = "Concurrent modification", body = Error)
    ),
    tags = ["pantry"],
    operation_id = "deleteItem"
)]
#[delete("/pantry/items")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<DeleteItemRequest>,
) -> ApiResult<web::Json<InventoryEntry>> {
    let removed = state
        .inventory
        .delete_item(user.id(), &payload.item)
        .await?;
    Ok(web::Json(removed))
}

/// Items expiring after today and within the configured horizon.
#[utoipa::path(
    get,
    path = "/api/v1/pantry/items/expiring-soon",
    responses(
        (status = 200, description = "Items expiring soon", body = [ExpiringItem]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["pantry"],
    operation_id = "expiringSoon"
)]
#[get("/pantry/items/expiring-soon")]
pub async fn expiring_soon(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ExpiringItem>>> {
    let items = state.inventory_query.expiring_soon(user.id()).await?;
    Ok(web::Json(items))
}

/// Items whose expiry date is before today.
#[utoipa::path(
    get,
    path = "/api/v1/pantry/items/expired",
    responses(
        (status = 200, description = "Expired items", body = [ExpiringItem]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["pantry"],
    operation_id = "expiredItems"
)]
#[get("/pantry/items/expired")]
pub async fn expired(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ExpiringItem>>> {
    let items = state.inventory_query.expired(user.id()).await?;
    Ok(web::Json(items))
}
