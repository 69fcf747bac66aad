//! Pantry inventory aggregate.
//!
//! A user's pantry is one ordered sequence of [`InventoryEntry`] records, so
//! a name, quantity, unit and expiry date always travel together. Clients
//! still speak in four parallel lists (`items`, `quantities`, `units`,
//! `expiryDates`); [`NewItems`] validates that shape on the way in and
//! [`InventoryColumns`] rebuilds it on the way out.

mod expiry;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use expiry::{
    EXPIRING_SOON_DAYS, ExpiringItem, ExpiryFilter, SUGGESTION_WINDOW_DAYS, parse_expiry_date,
};

/// Unit recorded when the caller does not supply one.
pub const DEFAULT_UNIT: &str = "pieces";

/// Validation and lookup failures raised by the inventory aggregate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// A parallel input list does not line up with `items`.
    #[error("{field} has {actual} values but items has {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An item name in an add batch was blank.
    #[error("item name at index {index} must not be empty")]
    EmptyItemName { index: usize },
    /// The item name addressing an update or delete was blank.
    #[error("item name must not be empty")]
    MissingItemName,
    /// No entry carries the requested name.
    #[error("item not found: {name}")]
    ItemNotFound { name: String },
}

/// One tracked pantry item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    #[schema(example = "milk")]
    pub name: String,
    /// Decimal-capable quantity kept as the caller wrote it.
    #[schema(example = "1.5")]
    pub quantity: String,
    #[schema(example = "litres")]
    pub unit: String,
    /// Expiry as supplied; parsed lazily by [`parse_expiry_date`].
    #[schema(example = "2025-06-05")]
    pub expiry_date: String,
}

impl InventoryEntry {
    /// Parsed expiry date, or `None` when the stored string is unparseable.
    pub fn parsed_expiry(&self) -> Option<NaiveDate> {
        parse_expiry_date(&self.expiry_date)
    }
}

/// A validated batch of entries to append.
///
/// ## Invariants
/// - `expiry_dates` and `quantities` had exactly one value per item name.
/// - `units`, when supplied, had exactly one value per item name; blank or
///   omitted units become [`DEFAULT_UNIT`].
/// - No item name is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItems {
    entries: Vec<InventoryEntry>,
}

impl NewItems {
    /// Zip the parallel request lists into entries, rejecting any mismatch
    /// before anything is written.
    ///
    /// # Examples
    /// ```
    /// use pantry::domain::{NewItems, DEFAULT_UNIT};
    ///
    /// let batch = NewItems::try_new(
    ///     vec!["milk".into()],
    ///     vec!["2025-06-05".into()],
    ///     vec!["1".into()],
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(batch.entries()[0].unit, DEFAULT_UNIT);
    /// ```
    pub fn try_new(
        names: Vec<String>,
        expiry_dates: Vec<String>,
        quantities: Vec<String>,
        units: Option<Vec<String>>,
    ) -> Result<Self, InventoryError> {
        let expected = names.len();
        check_len("expiryDates", expected, expiry_dates.len())?;
        check_len("quantities", expected, quantities.len())?;
        if let Some(units) = &units {
            check_len("units", expected, units.len())?;
        }
        if let Some(index) = names.iter().position(|name| name.trim().is_empty()) {
            return Err(InventoryError::EmptyItemName { index });
        }

        let mut units = units.map(Vec::into_iter);
        let entries = names
            .into_iter()
            .zip(expiry_dates)
            .zip(quantities)
            .map(|((name, expiry_date), quantity)| {
                let unit = unit_or_default(units.as_mut().and_then(Iterator::next));
                InventoryEntry {
                    name,
                    quantity,
                    unit,
                    expiry_date,
                }
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<InventoryEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A missing or blank unit becomes [`DEFAULT_UNIT`].
fn unit_or_default(unit: Option<String>) -> String {
    unit.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_UNIT.to_owned())
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<(), InventoryError> {
    if expected == actual {
        Ok(())
    } else {
        Err(InventoryError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}

/// Partial update applied to a single entry.
///
/// `None` fields are left untouched; an all-`None` patch is a no-op. A
/// blank unit is stored as [`DEFAULT_UNIT`], as on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub expiry_date: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl ItemPatch {
    /// Whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.expiry_date.is_none() && self.quantity.is_none() && self.unit.is_none()
    }

    fn apply(&self, entry: &mut InventoryEntry) {
        if let Some(expiry_date) = &self.expiry_date {
            entry.expiry_date.clone_from(expiry_date);
        }
        if let Some(quantity) = &self.quantity {
            entry.quantity.clone_from(quantity);
        }
        if let Some(unit) = &self.unit {
            entry.unit = unit_or_default(Some(unit.clone()));
        }
    }
}

/// The four parallel lists clients read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryColumns {
    pub items: Vec<String>,
    pub quantities: Vec<String>,
    pub units: Vec<String>,
    pub expiry_dates: Vec<String>,
}

/// Ordered pantry contents for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new(entries: Vec<InventoryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<InventoryEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first entry named exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    /// Append a validated batch at the end, preserving order.
    pub fn append(&mut self, items: NewItems) {
        self.entries.extend(items.into_entries());
    }

    /// Patch the first entry named `name` and return its new state.
    pub fn update(
        &mut self,
        name: &str,
        patch: &ItemPatch,
    ) -> Result<InventoryEntry, InventoryError> {
        require_name(name)?;
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == name)
            .ok_or_else(|| InventoryError::ItemNotFound {
                name: name.to_owned(),
            })?;
        patch.apply(entry);
        Ok(entry.clone())
    }

    /// Remove and return the first entry named `name`.
    pub fn remove(&mut self, name: &str) -> Result<InventoryEntry, InventoryError> {
        require_name(name)?;
        let index = self
            .position(name)
            .ok_or_else(|| InventoryError::ItemNotFound {
                name: name.to_owned(),
            })?;
        Ok(self.entries.remove(index))
    }

    /// Split the entries back into parallel lists.
    pub fn columns(&self) -> InventoryColumns {
        let mut columns = InventoryColumns {
            items: Vec::with_capacity(self.len()),
            quantities: Vec::with_capacity(self.len()),
            units: Vec::with_capacity(self.len()),
            expiry_dates: Vec::with_capacity(self.len()),
        };
        for entry in &self.entries {
            columns.items.push(entry.name.clone());
            columns.quantities.push(entry.quantity.clone());
            columns.units.push(entry.unit.clone());
            columns.expiry_dates.push(entry.expiry_date.clone());
        }
        columns
    }

    /// Entries whose parseable expiry falls inside `filter`, in pantry order.
    ///
    /// Entries with unparseable expiry strings never match.
    pub fn classify(&self, today: NaiveDate, filter: ExpiryFilter) -> Vec<ExpiringItem> {
        self.entries
            .iter()
            .filter(|entry| {
                entry
                    .parsed_expiry()
                    .is_some_and(|expiry| filter.matches(expiry, today))
            })
            .map(|entry| ExpiringItem {
                name: entry.name.clone(),
                expiry: entry.expiry_date.clone(),
            })
            .collect()
    }

    /// Names of the entries that seed dish suggestions: everything expiring
    /// on or before `today + window_days`, already-expired entries included.
    pub fn suggestion_candidates(&self, today: NaiveDate, window_days: u32) -> Vec<String> {
        self.classify(today, ExpiryFilter::WithinWindow { days: window_days })
            .into_iter()
            .map(|item| item.name)
            .collect()
    }
}

fn require_name(name: &str) -> Result<(), InventoryError> {
    if name.trim().is_empty() {
        Err(InventoryError::MissingItemName)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
