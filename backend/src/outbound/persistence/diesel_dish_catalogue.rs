//! PostgreSQL-backed dish catalogue.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::Dish;
use crate::domain::ports::{DishCatalogue, DishCatalogueError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DishRow, NewDishRow};
use super::pool::DbPool;
use super::schema::dishes;

/// Diesel-backed implementation of the [`DishCatalogue`] port.
///
/// Reads return dishes in insertion (`id`) order so suggestion output is
/// deterministic. [`Self::upsert_all`] backs the `seed-dishes` binary.
#[derive(Clone)]
pub struct DieselDishCatalogue {
    pool: DbPool,
}

impl DieselDishCatalogue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert or refresh dishes keyed by name. Returns the number of rows
    /// written.
    pub async fn upsert_all(&self, catalogue: &[Dish]) -> Result<usize, DishCatalogueError> {
        if catalogue.is_empty() {
            return Ok(0);
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DishCatalogueError::connection))?;
        let rows: Vec<NewDishRow<'_>> = catalogue
            .iter()
            .map(|dish| NewDishRow {
                name: dish.name(),
                ingredients: dish.ingredients(),
            })
            .collect();
        let written = diesel::insert_into(dishes::table)
            .values(&rows)
            .on_conflict(dishes::name)
            .do_update()
            .set(dishes::ingredients.eq(excluded(dishes::ingredients)))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        debug!(written, "dish catalogue upserted");
        Ok(written)
    }
}

fn map_error(error: diesel::result::Error) -> DishCatalogueError {
    map_diesel_error(
        error,
        DishCatalogueError::query,
        DishCatalogueError::connection,
    )
}

fn rows_to_dishes(rows: Vec<DishRow>) -> Vec<Dish> {
    rows.into_iter()
        .filter_map(|row| match Dish::try_new(row.name, row.ingredients) {
            Ok(dish) => Some(dish),
            Err(err) => {
                warn!(%err, "skipping invalid catalogue row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl DishCatalogue for DieselDishCatalogue {
    async fn all_dishes(&self) -> Result<Vec<Dish>, DishCatalogueError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DishCatalogueError::connection))?;
        let rows: Vec<DishRow> = dishes::table
            .order(dishes::id.asc())
            .select(DishRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(rows_to_dishes(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn invalid_rows_are_skipped_in_order() {
        let rows = vec![
            DishRow {
                name: "Omelette".to_owned(),
                ingredients: vec!["egg".to_owned()],
            },
            DishRow {
                name: "Nothing".to_owned(),
                ingredients: Vec::new(),
            },
            DishRow {
                name: "Rice pudding".to_owned(),
                ingredients: vec!["rice".to_owned(), "milk".to_owned()],
            },
        ];
        let names: Vec<String> = rows_to_dishes(rows)
            .iter()
            .map(|dish| dish.name().to_owned())
            .collect();
        assert_eq!(names, vec!["Omelette", "Rice pudding"]);
    }
}
