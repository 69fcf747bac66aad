//! Driving port for dish suggestions.

use async_trait::async_trait;

use crate::domain::{Error, Suggestion, UserId};

/// Result of asking for suggestions.
///
/// The two empty cases are kept apart so the boundary can tell the user
/// whether they have nothing expiring or nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// No inventory entry falls inside the suggestion window.
    NoIngredients,
    /// Candidates existed but no dish matched them.
    NoDishes,
    /// At least one dish matched.
    Dishes(Vec<Suggestion>),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionQuery: Send + Sync {
    /// Suggest dishes for the user's soon-to-expire items.
    async fn suggest_for_user(&self, user_id: &UserId) -> Result<SuggestionOutcome, Error>;
}
