//! Dish catalogue held in memory, optionally loaded from a JSON file.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};

use crate::domain::Dish;
use crate::domain::ports::{DishCatalogue, DishCatalogueError};

/// Errors raised while reading a catalogue file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueLoadError {
    #[error("catalogue path {path} has no file name")]
    InvalidPath { path: String },
    #[error("failed to read catalogue {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalogue {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fixed, ordered list of dishes.
#[derive(Debug, Clone, Default)]
pub struct StaticDishCatalogue {
    dishes: Arc<[Dish]>,
}

impl StaticDishCatalogue {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self {
            dishes: dishes.into(),
        }
    }

    /// Parse a JSON array of `{ "name", "ingredients" }` objects.
    ///
    /// Every entry is validated; an invalid dish fails the whole parse.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<Dish>>(raw).map(Self::new)
    }

    /// Read and parse a catalogue file through `cap_std`.
    pub fn from_path(path: &Path) -> Result<Self, CatalogueLoadError> {
        let display = path.display().to_string();
        let file_name = path
            .file_name()
            .ok_or_else(|| CatalogueLoadError::InvalidPath {
                path: display.clone(),
            })?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let raw = Dir::open_ambient_dir(parent, ambient_authority())
            .and_then(|dir| dir.read_to_string(Path::new(file_name)))
            .map_err(|source| CatalogueLoadError::Read {
                path: display.clone(),
                source,
            })?;
        Self::from_json(&raw).map_err(|source| CatalogueLoadError::Parse {
            path: display,
            source,
        })
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }
}

#[async_trait]
impl DishCatalogue for StaticDishCatalogue {
    async fn all_dishes(&self) -> Result<Vec<Dish>, DishCatalogueError> {
        Ok(self.dishes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    const CATALOGUE: &str = r#"[
        { "name": "Omelette", "ingredients": ["egg", "milk"] },
        { "name": "Rice pudding", "ingredients": ["rice", "milk"] }
    ]"#;

    #[rstest]
    #[tokio::test]
    async fn parses_in_file_order() {
        let catalogue = StaticDishCatalogue::from_json(CATALOGUE).expect("valid catalogue");
        let dishes = catalogue.all_dishes().await.expect("static read");
        let names: Vec<&str> = dishes.iter().map(Dish::name).collect();
        assert_eq!(names, vec!["Omelette", "Rice pudding"]);
    }

    #[rstest]
    fn rejects_dishes_without_ingredients() {
        let raw = r#"[{ "name": "Air", "ingredients": [] }]"#;
        assert!(StaticDishCatalogue::from_json(raw).is_err());
    }

    #[rstest]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(CATALOGUE.as_bytes())
            .expect("write catalogue");
        let catalogue = StaticDishCatalogue::from_path(file.path()).expect("load");
        assert_eq!(catalogue.dishes().len(), 2);
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = StaticDishCatalogue::from_path(&dir.path().join("absent.json"))
            .expect_err("missing file");
        assert!(matches!(err, CatalogueLoadError::Read { .. }));
    }
}
