//! Internal Diesel row types. Never exposed outside the persistence module.

use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::schema::{accounts, dishes};

/// Identity columns of an account row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Pantry columns of an account row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PantryRow {
    pub inventory: Value,
    pub saved_dishes: Value,
    pub revision: i32,
}

/// Insertable account; pantry columns take their empty defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row returned by raw `... RETURNING revision` statements.
#[derive(Debug, QueryableByName)]
pub(crate) struct RevisionRow {
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub revision: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DishRow {
    pub name: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = dishes)]
pub(crate) struct NewDishRow<'a> {
    pub name: &'a str,
    pub ingredients: &'a [String],
}
