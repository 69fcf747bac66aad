//! Dish catalogue types and the expiry-driven suggestion matcher.
//!
//! [`suggest`] is pure: it takes the catalogue, the candidate item names and
//! a [`SuggestionPolicy`], and returns suggestion records in a deterministic
//! order. Fetching the catalogue and picking candidates by expiry window live
//! in [`crate::domain::SuggestionService`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default number of dishes suggested per candidate item.
pub const DEFAULT_SUGGESTION_CAP: usize = 3;

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

/// Validation errors raised when building a [`Dish`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DishValidationError {
    #[error("dish name must not be empty")]
    EmptyName,
    #[error("dish {name} must list at least one ingredient")]
    NoIngredients { name: String },
    #[error("dish {name} has a blank ingredient")]
    BlankIngredient { name: String },
}

/// Catalogue entry: a dish name and its ordered ingredient list.
///
/// ## Invariants
/// - `name` is non-blank.
/// - `ingredients` is non-empty and has no blank entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "DishDto", into = "DishDto")]
pub struct Dish {
    name: String,
    ingredients: Vec<String>,
}

impl Dish {
    /// Validate and construct a dish.
    ///
    /// # Examples
    /// ```
    /// use pantry::domain::Dish;
    ///
    /// let dish = Dish::try_new("Egg fried rice", vec!["egg".into(), "rice".into()]).unwrap();
    /// assert!(dish.contains("egg"));
    /// assert!(!dish.contains("eg"));
    /// assert!(Dish::try_new("Air", vec![]).is_err());
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        ingredients: Vec<String>,
    ) -> Result<Self, DishValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DishValidationError::EmptyName);
        }
        if ingredients.is_empty() {
            return Err(DishValidationError::NoIngredients { name });
        }
        if ingredients.iter().any(|item| item.trim().is_empty()) {
            return Err(DishValidationError::BlankIngredient { name });
        }
        Ok(Self { name, ingredients })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Exact, case-sensitive ingredient membership.
    pub fn contains(&self, item: &str) -> bool {
        self.ingredients.iter().any(|ingredient| ingredient == item)
    }
}

#[derive(Deserialize, Serialize)]
struct DishDto {
    name: String,
    ingredients: Vec<String>,
}

impl TryFrom<DishDto> for Dish {
    type Error = DishValidationError;

    fn try_from(value: DishDto) -> Result<Self, Self::Error> {
        Self::try_new(value.name, value.ingredients)
    }
}

impl From<Dish> for DishDto {
    fn from(value: Dish) -> Self {
        Self {
            name: value.name,
            ingredients: value.ingredients,
        }
    }
}

/// One suggested dish and the pantry items that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Suggestion {
    #[schema(example = "Egg fried rice")]
    pub name: String,
    pub ingredients: Vec<String>,
    /// Pantry item names that matched this dish.
    pub suggested_due_to: Vec<String>,
    /// Search link built from the dish name; not a resolved video.
    #[schema(example = "https://www.youtube.com/results?search_query=Egg+fried rice+recipe")]
    pub youtube_url: String,
}

impl Suggestion {
    fn new(dish: &Dish, trigger: &str) -> Self {
        Self {
            name: dish.name.clone(),
            ingredients: dish.ingredients.clone(),
            suggested_due_to: vec![trigger.to_owned()],
            youtube_url: youtube_search_url(&dish.name),
        }
    }
}

/// Recipe search link for a dish; only the first space becomes `+`.
///
/// # Examples
/// ```
/// use pantry::domain::youtube_search_url;
///
/// assert_eq!(
///     youtube_search_url("Egg fried rice"),
///     "https://www.youtube.com/results?search_query=Egg+fried rice+recipe",
/// );
/// ```
pub fn youtube_search_url(dish_name: &str) -> String {
    format!(
        "{YOUTUBE_SEARCH_URL}{}+recipe",
        dish_name.replacen(' ', "+", 1)
    )
}

/// Tunables for [`suggest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionPolicy {
    /// Maximum dishes emitted per candidate item.
    pub per_item_cap: usize,
    /// Collapse repeated dishes into one record listing every trigger.
    pub dedupe: bool,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            per_item_cap: DEFAULT_SUGGESTION_CAP,
            dedupe: false,
        }
    }
}

/// Match candidate item names against the catalogue.
///
/// Items are visited in input order; for each, the catalogue is scanned in
/// order and at most `policy.per_item_cap` dishes containing the item are
/// emitted. Without dedupe a dish matched by two items appears twice. With
/// dedupe the first record for a dish name is kept and later triggers are
/// appended to its `suggested_due_to`; a dish absorbed this way still counts
/// toward the later item's cap.
///
/// Returns an empty vector when nothing matches.
pub fn suggest(catalogue: &[Dish], items: &[String], policy: &SuggestionPolicy) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for item in items {
        let matches = catalogue
            .iter()
            .filter(|dish| dish.contains(item))
            .take(policy.per_item_cap);
        for dish in matches {
            if !policy.dedupe {
                suggestions.push(Suggestion::new(dish, item));
                continue;
            }
            match by_name.get(dish.name()) {
                Some(&index) => {
                    if let Some(existing) = suggestions.get_mut(index)
                        && !existing.suggested_due_to.contains(item)
                    {
                        existing.suggested_due_to.push(item.clone());
                    }
                }
                None => {
                    by_name.insert(dish.name.clone(), suggestions.len());
                    suggestions.push(Suggestion::new(dish, item));
                }
            }
        }
    }
    suggestions
}
