//! Tests for the inventory aggregate.

use super::*;
use rstest::{fixture, rstest};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn assert_aligned(columns: &InventoryColumns) {
    let len = columns.items.len();
    assert_eq!(columns.quantities.len(), len);
    assert_eq!(columns.units.len(), len);
    assert_eq!(columns.expiry_dates.len(), len);
}

#[fixture]
fn milk_and_egg() -> Inventory {
    let mut inventory = Inventory::default();
    inventory.append(
        NewItems::try_new(
            strings(&["milk", "egg"]),
            strings(&["2025-01-01", "2025-02-01"]),
            strings(&["1", "2"]),
            None,
        )
        .expect("valid batch"),
    );
    inventory
}

#[rstest]
fn add_rejects_expiry_length_mismatch() {
    let err = NewItems::try_new(
        strings(&["a", "b"]),
        strings(&["2025-01-01"]),
        strings(&["1", "2"]),
        None,
    )
    .expect_err("mismatch");
    assert_eq!(
        err,
        InventoryError::LengthMismatch {
            field: "expiryDates",
            expected: 2,
            actual: 1
        }
    );
}

#[rstest]
fn add_rejects_quantity_length_mismatch() {
    let err = NewItems::try_new(
        strings(&["a"]),
        strings(&["2025-01-01"]),
        strings(&["1", "2"]),
        None,
    )
    .expect_err("mismatch");
    assert!(matches!(
        err,
        InventoryError::LengthMismatch {
            field: "quantities",
            ..
        }
    ));
}

#[rstest]
fn add_rejects_units_length_mismatch() {
    let err = NewItems::try_new(
        strings(&["a", "b"]),
        strings(&["2025-01-01", "2025-01-02"]),
        strings(&["1", "2"]),
        Some(strings(&["kg"])),
    )
    .expect_err("mismatch");
    assert!(matches!(
        err,
        InventoryError::LengthMismatch { field: "units", .. }
    ));
}

#[rstest]
fn add_rejects_blank_names() {
    let err = NewItems::try_new(
        strings(&["a", "  "]),
        strings(&["2025-01-01", "2025-01-02"]),
        strings(&["1", "2"]),
        None,
    )
    .expect_err("blank name");
    assert_eq!(err, InventoryError::EmptyItemName { index: 1 });
}

#[rstest]
fn add_defaults_missing_and_blank_units() {
    let batch = NewItems::try_new(
        strings(&["a", "b"]),
        strings(&["2025-01-01", "2025-01-02"]),
        strings(&["1", "0.5"]),
        Some(strings(&["", "kg"])),
    )
    .expect("valid batch");
    let units: Vec<&str> = batch.entries().iter().map(|e| e.unit.as_str()).collect();
    assert_eq!(units, vec![DEFAULT_UNIT, "kg"]);
}

#[rstest]
fn append_preserves_order_and_alignment(mut milk_and_egg: Inventory) {
    milk_and_egg.append(
        NewItems::try_new(
            strings(&["rice"]),
            strings(&["2026-01-01"]),
            strings(&["3"]),
            Some(strings(&["cups"])),
        )
        .expect("valid batch"),
    );
    let columns = milk_and_egg.columns();
    assert_aligned(&columns);
    assert_eq!(columns.items, strings(&["milk", "egg", "rice"]));
    assert_eq!(columns.units, strings(&["pieces", "pieces", "cups"]));
}

#[rstest]
fn delete_removes_the_aligned_index(mut milk_and_egg: Inventory) {
    let removed = milk_and_egg.remove("milk").expect("milk exists");
    assert_eq!(removed.name, "milk");

    let columns = milk_and_egg.columns();
    assert_aligned(&columns);
    assert_eq!(columns.items, strings(&["egg"]));
    assert_eq!(columns.quantities, strings(&["2"]));
    assert_eq!(columns.expiry_dates, strings(&["2025-02-01"]));
}

#[rstest]
fn delete_only_removes_first_match() {
    let mut inventory = Inventory::default();
    inventory.append(
        NewItems::try_new(
            strings(&["egg", "egg"]),
            strings(&["2025-01-01", "2025-02-01"]),
            strings(&["1", "2"]),
            None,
        )
        .expect("valid batch"),
    );
    inventory.remove("egg").expect("egg exists");
    assert_eq!(inventory.columns().expiry_dates, strings(&["2025-02-01"]));
}

#[rstest]
fn delete_missing_item_leaves_state_untouched(mut milk_and_egg: Inventory) {
    let before = milk_and_egg.clone();
    let err = milk_and_egg.remove("cheese").expect_err("absent");
    assert_eq!(
        err,
        InventoryError::ItemNotFound {
            name: "cheese".to_owned()
        }
    );
    assert_eq!(milk_and_egg, before);
}

#[rstest]
fn delete_requires_a_name(mut milk_and_egg: Inventory) {
    assert_eq!(
        milk_and_egg.remove(" ").expect_err("blank"),
        InventoryError::MissingItemName
    );
}

#[rstest]
fn update_changes_only_supplied_fields(mut milk_and_egg: Inventory) {
    let patch = ItemPatch {
        quantity: Some("4".to_owned()),
        ..ItemPatch::default()
    };
    let updated = milk_and_egg.update("egg", &patch).expect("egg exists");
    assert_eq!(updated.quantity, "4");
    assert_eq!(updated.expiry_date, "2025-02-01");
    assert_eq!(updated.unit, DEFAULT_UNIT);
    assert_aligned(&milk_and_egg.columns());
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_unit_update_falls_back_to_default(mut milk_and_egg: Inventory, #[case] unit: &str) {
    let patch = ItemPatch {
        unit: Some(unit.to_owned()),
        ..ItemPatch::default()
    };
    let updated = milk_and_egg.update("milk", &patch).expect("milk exists");
    assert_eq!(updated.unit, DEFAULT_UNIT);
    assert_eq!(milk_and_egg.columns().units, strings(&["pieces", "pieces"]));
}

#[rstest]
fn unit_update_matches_insert_normalisation() {
    let mut inventory = Inventory::default();
    inventory.append(
        NewItems::try_new(
            strings(&["flour"]),
            strings(&["2025-09-01"]),
            strings(&["1"]),
            Some(strings(&[""])),
        )
        .expect("valid batch"),
    );
    let inserted = inventory.entries()[0].unit.clone();
    let blank = ItemPatch {
        unit: Some(String::new()),
        ..ItemPatch::default()
    };
    let updated = inventory.update("flour", &blank).expect("flour exists");
    assert_eq!(updated.unit, inserted);

    let kilograms = ItemPatch {
        unit: Some("kg".to_owned()),
        ..ItemPatch::default()
    };
    let relabelled = inventory.update("flour", &kilograms).expect("flour exists");
    assert_eq!(relabelled.unit, "kg");
}

#[rstest]
fn empty_patch_is_a_no_op(mut milk_and_egg: Inventory) {
    let before = milk_and_egg.clone();
    let patch = ItemPatch::default();
    assert!(patch.is_empty());
    milk_and_egg.update("milk", &patch).expect("milk exists");
    assert_eq!(milk_and_egg, before);
}

#[rstest]
fn update_missing_item_is_not_found(mut milk_and_egg: Inventory) {
    let err = milk_and_egg
        .update("cheese", &ItemPatch::default())
        .expect_err("absent");
    assert!(matches!(err, InventoryError::ItemNotFound { .. }));
}

#[rstest]
fn classification_skips_unparseable_dates() {
    let mut inventory = Inventory::default();
    inventory.append(
        NewItems::try_new(
            strings(&["mystery", "yoghurt", "bread"]),
            strings(&["not-a-date", "2025-06-05", "2025-05-01"]),
            strings(&["1", "1", "1"]),
            None,
        )
        .expect("valid batch"),
    );
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");

    let soon = inventory.classify(today, ExpiryFilter::expiring_soon());
    let expired = inventory.classify(today, ExpiryFilter::Expired);

    assert_eq!(
        soon,
        vec![ExpiringItem {
            name: "yoghurt".to_owned(),
            expiry: "2025-06-05".to_owned()
        }]
    );
    assert_eq!(
        expired,
        vec![ExpiringItem {
            name: "bread".to_owned(),
            expiry: "2025-05-01".to_owned()
        }]
    );
}

#[rstest]
fn entries_round_trip_as_json_array(milk_and_egg: Inventory) {
    let value = serde_json::to_value(&milk_and_egg).expect("serialise");
    assert!(value.is_array());
    assert_eq!(value[0]["expiryDate"], "2025-01-01");
    let back: Inventory = serde_json::from_value(value).expect("deserialise");
    assert_eq!(back, milk_and_egg);
}

#[rstest]
fn suggestion_candidates_include_expired_entries() {
    let mut inventory = Inventory::default();
    inventory.append(
        NewItems::try_new(
            strings(&["rice", "bread", "mystery", "jam"]),
            strings(&["2025-06-21", "2025-05-01", "soon", "2025-06-22"]),
            strings(&["1", "1", "1", "1"]),
            None,
        )
        .expect("valid batch"),
    );
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");

    assert_eq!(
        inventory.suggestion_candidates(today, 20),
        strings(&["rice", "bread"])
    );
    assert!(inventory.suggestion_candidates(today, 0).contains(&"bread".to_owned()));
}
