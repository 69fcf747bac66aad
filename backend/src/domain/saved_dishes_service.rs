//! Saved-dish domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::pantry_service_support::{
    MAX_WRITE_ATTEMPTS, WriteOutcome, classify_write, load_document, map_pantry_error,
    revision_conflict,
};
use crate::domain::ports::{PantryRepository, SaveDishRequest, SavedDishesCommand};
use crate::domain::{Error, SavedDish, UserId, remove_saved_dishes};

/// Saved-dish service implementing [`SavedDishesCommand`].
#[derive(Clone)]
pub struct SavedDishesService<P> {
    pantry: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> SavedDishesService<P> {
    pub fn new(pantry: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { pantry, clock }
    }
}

#[async_trait]
impl<P> SavedDishesCommand for SavedDishesService<P>
where
    P: PantryRepository,
{
    async fn list(&self, user_id: &UserId) -> Result<Vec<SavedDish>, Error> {
        Ok(load_document(self.pantry.as_ref(), user_id)
            .await?
            .saved_dishes)
    }

    async fn save(&self, user_id: &UserId, request: SaveDishRequest) -> Result<SavedDish, Error> {
        let dish = SavedDish::try_new(
            &request.name,
            request.ingredients,
            request.youtube_url,
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.pantry
            .append_saved_dish(user_id, &dish)
            .await
            .map_err(map_pantry_error)?;
        info!(%user_id, dish = %dish.name, "dish saved");
        Ok(dish)
    }

    async fn delete(&self, user_id: &UserId, name: &str) -> Result<usize, Error> {
        if name.trim().is_empty() {
            return Err(Error::invalid_request("dish name must not be empty"));
        }
        let mut last_seen = (0, 0);
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut document = load_document(self.pantry.as_ref(), user_id).await?;
            let removed = remove_saved_dishes(&mut document.saved_dishes, name);
            if removed == 0 {
                return Err(Error::not_found(format!("saved dish not found: {name}")));
            }
            let result = self
                .pantry
                .replace_saved_dishes(user_id, &document.saved_dishes, document.revision)
                .await;
            match classify_write(result, removed, user_id, attempt)? {
                WriteOutcome::Written(removed) => {
                    info!(%user_id, dish = %name, removed, "saved dish deleted");
                    return Ok(removed);
                }
                WriteOutcome::Stale { expected, actual } => last_seen = (expected, actual),
            }
        }
        warn!(%user_id, "saved-dish write lost to concurrent writers");
        Err(revision_conflict(last_seen.0, last_seen.1))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPantryRepository, PantryDocument, PantryRepositoryError};

    struct FixtureClock;

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0)
                .single()
                .expect("valid fixture timestamp")
        }
    }

    fn service(repo: MockPantryRepository) -> SavedDishesService<MockPantryRepository> {
        SavedDishesService::new(Arc::new(repo), Arc::new(FixtureClock))
    }

    fn with_saved(names: &[&str]) -> PantryDocument {
        PantryDocument {
            saved_dishes: names
                .iter()
                .map(|name| {
                    SavedDish::try_new(name, Vec::new(), None, FixtureClock.utc())
                        .expect("valid dish")
                })
                .collect(),
            revision: 1,
            ..PantryDocument::default()
        }
    }

    #[tokio::test]
    async fn save_stamps_selection_time() {
        let mut repo = MockPantryRepository::new();
        repo.expect_append_saved_dish()
            .withf(|_, dish| dish.name == "Omelette")
            .times(1)
            .return_once(|_, _| Ok(2));

        let saved = service(repo)
            .save(
                &UserId::random(),
                SaveDishRequest {
                    name: " Omelette ".into(),
                    ingredients: vec!["egg".into()],
                    youtube_url: None,
                },
            )
            .await
            .expect("saved");
        assert_eq!(saved.date_selected, FixtureClock.utc());
    }

    #[tokio::test]
    async fn save_rejects_blank_name() {
        let mut repo = MockPantryRepository::new();
        repo.expect_append_saved_dish().never();

        let err = service(repo)
            .save(
                &UserId::random(),
                SaveDishRequest {
                    name: "  ".into(),
                    ingredients: Vec::new(),
                    youtube_url: None,
                },
            )
            .await
            .expect_err("blank");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn delete_removes_all_matches() {
        let mut repo = MockPantryRepository::new();
        repo.expect_load()
            .return_once(|_| Ok(Some(with_saved(&["Toast", "Omelette", "Toast"]))));
        repo.expect_replace_saved_dishes()
            .withf(|_, dishes, expected| *expected == 1 && dishes.len() == 1)
            .times(1)
            .return_once(|_, _, _| Ok(2));

        let removed = service(repo)
            .delete(&UserId::random(), "Toast")
            .await
            .expect("deleted");
        assert_eq!(removed, 2);
    }

    #[rstest]
    #[case("Pizza", ErrorCode::NotFound)]
    #[case("", ErrorCode::InvalidRequest)]
    #[tokio::test]
    async fn delete_rejections_never_write(#[case] name: &str, #[case] expected: ErrorCode) {
        let mut repo = MockPantryRepository::new();
        repo.expect_load()
            .returning(|_| Ok(Some(with_saved(&["Toast"]))));
        repo.expect_replace_saved_dishes().never();

        let err = service(repo)
            .delete(&UserId::random(), name)
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn delete_gives_up_after_repeated_conflicts() {
        let mut repo = MockPantryRepository::new();
        repo.expect_load()
            .times(MAX_WRITE_ATTEMPTS as usize)
            .returning(|_| Ok(Some(with_saved(&["Toast"]))));
        repo.expect_replace_saved_dishes()
            .times(MAX_WRITE_ATTEMPTS as usize)
            .returning(|_, _, _| Err(PantryRepositoryError::revision_mismatch(1_u32, 9_u32)));

        let err = service(repo)
            .delete(&UserId::random(), "Toast")
            .await
            .expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn list_returns_saved_dishes_in_order() {
        let mut repo = MockPantryRepository::new();
        repo.expect_load()
            .return_once(|_| Ok(Some(with_saved(&["Toast", "Omelette"]))));

        let dishes = service(repo).list(&UserId::random()).await.expect("listed");
        let names: Vec<&str> = dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Toast", "Omelette"]);
    }
}
