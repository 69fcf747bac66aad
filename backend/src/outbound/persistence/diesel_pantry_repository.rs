//! PostgreSQL-backed `PantryRepository` implementation.
//!
//! The pantry documents live in the `inventory` and `saved_dishes` JSONB
//! columns of `accounts`. Appends are a single `jsonb || jsonb` UPDATE so
//! concurrent appends never lose each other; replacements only apply when
//! `revision` still matches what the caller read.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Jsonb, Uuid as SqlUuid};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;
use serde_json::Value;

use crate::domain::ports::{PantryDocument, PantryRepository, PantryRepositoryError};
use crate::domain::{Inventory, InventoryEntry, SavedDish, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{PantryRow, RevisionRow};
use super::pool::DbPool;
use super::schema::accounts;

const APPEND_INVENTORY_SQL: &str = "UPDATE accounts \
     SET inventory = inventory || $2, revision = revision + 1, updated_at = now() \
     WHERE id = $1 RETURNING revision";

const APPEND_SAVED_DISH_SQL: &str = "UPDATE accounts \
     SET saved_dishes = saved_dishes || $2, revision = revision + 1, updated_at = now() \
     WHERE id = $1 RETURNING revision";

/// Diesel-backed implementation of the [`PantryRepository`] port.
#[derive(Clone)]
pub struct DieselPantryRepository {
    pool: DbPool,
}

impl DieselPantryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, AsyncPgConnection>,
        PantryRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PantryRepositoryError::connection))
    }

    async fn append(
        &self,
        sql: &'static str,
        user_id: &UserId,
        values: Value,
    ) -> Result<u32, PantryRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<RevisionRow> = diesel::sql_query(sql)
            .bind::<SqlUuid, _>(*user_id.as_uuid())
            .bind::<Jsonb, _>(values)
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        match row {
            Some(row) => revision_from_db(row.revision),
            None => Err(PantryRepositoryError::missing_user(user_id.to_string())),
        }
    }

    /// Explain why a revision-guarded UPDATE touched no rows.
    async fn stale_or_missing(
        conn: &mut AsyncPgConnection,
        user_id: &UserId,
        expected: u32,
    ) -> PantryRepositoryError {
        let current: Result<Option<i32>, _> = accounts::table
            .filter(accounts::id.eq(*user_id.as_uuid()))
            .select(accounts::revision)
            .first(conn)
            .await
            .optional();
        match current {
            Ok(Some(actual)) => match revision_from_db(actual) {
                Ok(actual) => PantryRepositoryError::revision_mismatch(expected, actual),
                Err(err) => err,
            },
            Ok(None) => PantryRepositoryError::missing_user(user_id.to_string()),
            Err(err) => map_error(err),
        }
    }
}

fn map_error(error: diesel::result::Error) -> PantryRepositoryError {
    map_diesel_error(
        error,
        PantryRepositoryError::query,
        PantryRepositoryError::connection,
    )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, PantryRepositoryError> {
    serde_json::to_value(value)
        .map_err(|err| PantryRepositoryError::query(format!("failed to encode document: {err}")))
}

fn revision_from_db(revision: i32) -> Result<u32, PantryRepositoryError> {
    u32::try_from(revision)
        .map_err(|_| PantryRepositoryError::query(format!("negative revision {revision}")))
}

fn revision_to_db(revision: u32) -> Result<i32, PantryRepositoryError> {
    i32::try_from(revision)
        .map_err(|_| PantryRepositoryError::query(format!("revision {revision} out of range")))
}

fn row_to_document(row: PantryRow) -> Result<PantryDocument, PantryRepositoryError> {
    let inventory: Inventory = serde_json::from_value(row.inventory).map_err(|err| {
        PantryRepositoryError::query(format!("stored inventory is malformed: {err}"))
    })?;
    let saved_dishes: Vec<SavedDish> = serde_json::from_value(row.saved_dishes).map_err(|err| {
        PantryRepositoryError::query(format!("stored saved dishes are malformed: {err}"))
    })?;
    Ok(PantryDocument {
        inventory,
        saved_dishes,
        revision: revision_from_db(row.revision)?,
    })
}

#[async_trait]
impl PantryRepository for DieselPantryRepository {
    async fn load(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PantryDocument>, PantryRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<PantryRow> = accounts::table
            .filter(accounts::id.eq(*user_id.as_uuid()))
            .select(PantryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        row.map(row_to_document).transpose()
    }

    async fn append_entries(
        &self,
        user_id: &UserId,
        entries: &[InventoryEntry],
    ) -> Result<u32, PantryRepositoryError> {
        self.append(APPEND_INVENTORY_SQL, user_id, to_json(entries)?)
            .await
    }

    async fn replace_inventory(
        &self,
        user_id: &UserId,
        inventory: &Inventory,
        expected_revision: u32,
    ) -> Result<u32, PantryRepositoryError> {
        let document = to_json(inventory)?;
        let expected = revision_to_db(expected_revision)?;
        let mut conn = self.connection().await?;
        let updated: Option<i32> = diesel::update(
            accounts::table
                .filter(accounts::id.eq(*user_id.as_uuid()))
                .filter(accounts::revision.eq(expected)),
        )
        .set((
            accounts::inventory.eq(document),
            accounts::revision.eq(accounts::revision + 1),
            accounts::updated_at.eq(diesel::dsl::now),
        ))
        .returning(accounts::revision)
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_error)?;
        match updated {
            Some(revision) => revision_from_db(revision),
            None => Err(Self::stale_or_missing(&mut conn, user_id, expected_revision).await),
        }
    }

    async fn append_saved_dish(
        &self,
        user_id: &UserId,
        dish: &SavedDish,
    ) -> Result<u32, PantryRepositoryError> {
        let payload = to_json(std::slice::from_ref(dish))?;
        self.append(APPEND_SAVED_DISH_SQL, user_id, payload).await
    }

    async fn replace_saved_dishes(
        &self,
        user_id: &UserId,
        dishes: &[SavedDish],
        expected_revision: u32,
    ) -> Result<u32, PantryRepositoryError> {
        let document = to_json(dishes)?;
        let expected = revision_to_db(expected_revision)?;
        let mut conn = self.connection().await?;
        let updated: Option<i32> = diesel::update(
            accounts::table
                .filter(accounts::id.eq(*user_id.as_uuid()))
                .filter(accounts::revision.eq(expected)),
        )
        .set((
            accounts::saved_dishes.eq(document),
            accounts::revision.eq(accounts::revision + 1),
            accounts::updated_at.eq(diesel::dsl::now),
        ))
        .returning(accounts::revision)
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_error)?;
        match updated {
            Some(revision) => revision_from_db(revision),
            None => Err(Self::stale_or_missing(&mut conn, user_id, expected_revision).await),
        }
    }
}
