//! Dishes a user chose to keep from their suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors for [`SavedDish`] construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavedDishValidationError {
    #[error("dish name must not be empty")]
    EmptyName,
}

/// A dish saved to the user's list.
///
/// Field names follow the stored document shape (`youtube_url`,
/// `dateSelected`) so documents written by older clients still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedDish {
    #[schema(example = "Egg fried rice")]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(rename = "dateSelected")]
    pub date_selected: DateTime<Utc>,
}

impl SavedDish {
    /// Build a saved dish, stamping it with `selected_at`.
    pub fn try_new(
        name: &str,
        ingredients: Vec<String>,
        youtube_url: Option<String>,
        selected_at: DateTime<Utc>,
    ) -> Result<Self, SavedDishValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SavedDishValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            ingredients,
            youtube_url: youtube_url.filter(|url| !url.trim().is_empty()),
            date_selected: selected_at,
        })
    }
}

/// Remove every saved dish named `name`, returning how many were dropped.
pub fn remove_saved_dishes(dishes: &mut Vec<SavedDish>, name: &str) -> usize {
    let before = dishes.len();
    dishes.retain(|dish| dish.name != name);
    before - dishes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn saved(name: &str) -> SavedDish {
        SavedDish::try_new(name, vec!["egg".into()], None, at()).expect("valid dish")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_names_are_rejected(#[case] name: &str) {
        assert_eq!(
            SavedDish::try_new(name, vec![], None, at()).expect_err("blank"),
            SavedDishValidationError::EmptyName
        );
    }

    #[rstest]
    fn remove_drops_every_match() {
        let mut dishes = vec![saved("Omelette"), saved("Toast"), saved("Omelette")];
        assert_eq!(remove_saved_dishes(&mut dishes, "Omelette"), 2);
        assert_eq!(dishes, vec![saved("Toast")]);
    }

    #[rstest]
    fn remove_without_match_is_zero() {
        let mut dishes = vec![saved("Toast")];
        assert_eq!(remove_saved_dishes(&mut dishes, "Omelette"), 0);
        assert_eq!(dishes.len(), 1);
    }

    #[rstest]
    fn serialises_with_stored_field_names() {
        let dish = SavedDish::try_new(
            "Toast",
            vec!["bread".into()],
            Some("https://example.test".into()),
            at(),
        )
        .expect("valid dish");
        let value = serde_json::to_value(&dish).expect("serialise");
        assert_eq!(value["youtube_url"], "https://example.test");
        assert_eq!(value["dateSelected"], "2025-06-01T12:00:00Z");
    }
}
