//! Suggestion domain service.
//!
//! Picks candidate items whose expiry falls inside the suggestion window,
//! then runs the pure matcher against the dish catalogue. A catalogue outage
//! degrades to "no dishes" instead of failing the request.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::pantry_service_support::{load_document, today};
use crate::domain::ports::{DishCatalogue, PantryRepository, SuggestionOutcome, SuggestionQuery};
use crate::domain::{Error, SUGGESTION_WINDOW_DAYS, SuggestionPolicy, UserId, suggest};

/// Suggestion service implementing [`SuggestionQuery`].
#[derive(Clone)]
pub struct SuggestionService<P, C: ?Sized> {
    pantry: Arc<P>,
    catalogue: Arc<C>,
    clock: Arc<dyn Clock>,
    policy: SuggestionPolicy,
    window_days: u32,
}

impl<P, C: ?Sized> SuggestionService<P, C> {
    /// Create a service with the default policy and window.
    pub fn new(pantry: Arc<P>, catalogue: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pantry,
            catalogue,
            clock,
            policy: SuggestionPolicy::default(),
            window_days: SUGGESTION_WINDOW_DAYS,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SuggestionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }
}

#[async_trait]
impl<P, C> SuggestionQuery for SuggestionService<P, C>
where
    P: PantryRepository,
    C: DishCatalogue + ?Sized,
{
    async fn suggest_for_user(&self, user_id: &UserId) -> Result<SuggestionOutcome, Error> {
        let document = load_document(self.pantry.as_ref(), user_id).await?;
        let candidates = document
            .inventory
            .suggestion_candidates(today(self.clock.as_ref()), self.window_days);
        if candidates.is_empty() {
            return Ok(SuggestionOutcome::NoIngredients);
        }

        let catalogue = match self.catalogue.all_dishes().await {
            Ok(dishes) => dishes,
            Err(err) => {
                warn!(
                    %user_id,
                    error = %err,
                    "dish catalogue unavailable; returning no suggestions"
                );
                Vec::new()
            }
        };
        let suggestions = suggest(&catalogue, &candidates, &self.policy);
        debug!(
            %user_id,
            candidates = candidates.len(),
            suggestions = suggestions.len(),
            "suggestions computed"
        );
        if suggestions.is_empty() {
            Ok(SuggestionOutcome::NoDishes)
        } else {
            Ok(SuggestionOutcome::Dishes(suggestions))
        }
    }
}
