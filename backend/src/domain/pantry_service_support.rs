//! Internal helpers shared by the pantry-backed services.

use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{PantryDocument, PantryRepository, PantryRepositoryError};
use crate::domain::{Error, InventoryError, UserId};

/// Read-modify-write attempts before a concurrent writer wins.
pub(crate) const MAX_WRITE_ATTEMPTS: u32 = 3;

pub(crate) fn map_pantry_error(error: PantryRepositoryError) -> Error {
    match error {
        PantryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("pantry repository unavailable: {message}"))
        }
        PantryRepositoryError::Query { message } => {
            Error::internal(format!("pantry repository error: {message}"))
        }
        PantryRepositoryError::MissingUser { .. } => user_not_found(),
        PantryRepositoryError::RevisionMismatch { expected, actual } => {
            revision_conflict(expected, actual)
        }
    }
}

pub(crate) fn map_inventory_error(error: InventoryError) -> Error {
    match &error {
        InventoryError::LengthMismatch { field, .. } => Error::invalid_request(error.to_string())
            .with_details(json!({ "field": field, "code": "length_mismatch" })),
        InventoryError::EmptyItemName { index } => Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "items", "index": index, "code": "empty_item" })),
        InventoryError::MissingItemName => Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "item", "code": "missing_item" })),
        InventoryError::ItemNotFound { name } => Error::not_found(error.to_string())
            .with_details(json!({ "item": name, "code": "item_not_found" })),
    }
}

impl From<InventoryError> for Error {
    fn from(error: InventoryError) -> Self {
        map_inventory_error(error)
    }
}

pub(crate) fn user_not_found() -> Error {
    Error::not_found("user not found")
}

pub(crate) fn revision_conflict(expected: u32, actual: u32) -> Error {
    Error::conflict("pantry was modified concurrently; retry the request").with_details(json!({
        "expectedRevision": expected,
        "actualRevision": actual,
        "code": "revision_mismatch",
    }))
}

/// Today's date in UTC.
pub(crate) fn today(clock: &dyn Clock) -> NaiveDate {
    clock.utc().date_naive()
}

pub(crate) async fn load_document<P>(pantry: &P, user_id: &UserId) -> Result<PantryDocument, Error>
where
    P: PantryRepository + ?Sized,
{
    pantry
        .load(user_id)
        .await
        .map_err(map_pantry_error)?
        .ok_or_else(user_not_found)
}

/// Outcome of one compare-and-swap write.
pub(crate) enum WriteOutcome<T> {
    Written(T),
    Stale { expected: u32, actual: u32 },
}

/// Sort a replace result into success, a retryable stale write, or failure.
pub(crate) fn classify_write<T>(
    result: Result<u32, PantryRepositoryError>,
    value: T,
    user_id: &UserId,
    attempt: u32,
) -> Result<WriteOutcome<T>, Error> {
    match result {
        Ok(_) => Ok(WriteOutcome::Written(value)),
        Err(PantryRepositoryError::RevisionMismatch { expected, actual }) => {
            debug!(%user_id, attempt, expected, actual, "stale pantry write; re-reading");
            Ok(WriteOutcome::Stale { expected, actual })
        }
        Err(err) => Err(map_pantry_error(err)),
    }
}
