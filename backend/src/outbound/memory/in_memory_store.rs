//! `DashMap`-backed account and pantry store.
//!
//! Each account record sits in one map shard, so holding the shard guard
//! for the duration of a write gives the same atomic append and
//! compare-and-swap semantics as the PostgreSQL adapter.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, PantryDocument, PantryRepository,
    PantryRepositoryError,
};
use crate::domain::{Account, EmailAddress, Inventory, InventoryEntry, SavedDish, UserId, UserName};

#[derive(Debug, Clone)]
struct Record {
    account: Account,
    pantry: PantryDocument,
}

#[derive(Debug, Default)]
struct Tables {
    records: DashMap<UserId, Record>,
    by_email: DashMap<String, UserId>,
    by_name: DashMap<String, UserId>,
}

/// Shared in-memory store. Clones observe the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.tables.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.records.is_empty()
    }

    fn lookup(&self, id: Option<UserId>) -> Option<Account> {
        let id = id?;
        self.tables
            .records
            .get(&id)
            .map(|record| record.account.clone())
    }

    fn write<T>(
        &self,
        user_id: &UserId,
        mutate: impl FnOnce(&mut PantryDocument) -> Result<T, PantryRepositoryError>,
    ) -> Result<u32, PantryRepositoryError> {
        let mut record = self
            .tables
            .records
            .get_mut(user_id)
            .ok_or_else(|| PantryRepositoryError::missing_user(user_id.to_string()))?;
        mutate(&mut record.pantry)?;
        record.pantry.revision = record.pantry.revision.wrapping_add(1);
        Ok(record.pantry.revision)
    }

    fn compare_and_swap(
        &self,
        user_id: &UserId,
        expected: u32,
        replace: impl FnOnce(&mut PantryDocument),
    ) -> Result<u32, PantryRepositoryError> {
        self.write(user_id, |pantry| {
            if pantry.revision != expected {
                return Err(PantryRepositoryError::revision_mismatch(
                    expected,
                    pantry.revision,
                ));
            }
            replace(pantry);
            Ok(())
        })
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self.lookup(Some(id.clone())))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let id = self
            .tables
            .by_email
            .get(email.as_ref())
            .map(|entry| entry.value().clone());
        Ok(self.lookup(id))
    }

    async fn find_by_name(
        &self,
        name: &UserName,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let id = self
            .tables
            .by_name
            .get(name.as_ref())
            .map(|entry| entry.value().clone());
        Ok(self.lookup(id))
    }

    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let email = account.email.as_ref().to_owned();
        match self.tables.by_email.entry(email.clone()) {
            Entry::Occupied(_) => return Err(AccountRepositoryError::duplicate("email")),
            Entry::Vacant(slot) => {
                slot.insert(account.id.clone());
            }
        }
        match self.tables.by_name.entry(account.name.as_ref().to_owned()) {
            Entry::Occupied(_) => {
                self.tables.by_email.remove(&email);
                return Err(AccountRepositoryError::duplicate("name"));
            }
            Entry::Vacant(slot) => {
                slot.insert(account.id.clone());
            }
        }
        self.tables.records.insert(
            account.id.clone(),
            Record {
                account: account.clone(),
                pantry: PantryDocument::default(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl PantryRepository for InMemoryStore {
    async fn load(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PantryDocument>, PantryRepositoryError> {
        Ok(self
            .tables
            .records
            .get(user_id)
            .map(|record| record.pantry.clone()))
    }

    async fn append_entries(
        &self,
        user_id: &UserId,
        entries: &[InventoryEntry],
    ) -> Result<u32, PantryRepositoryError> {
        self.write(user_id, |pantry| {
            let mut combined = std::mem::take(&mut pantry.inventory).into_entries();
            combined.extend_from_slice(entries);
            pantry.inventory = Inventory::new(combined);
            Ok(())
        })
    }

    async fn replace_inventory(
        &self,
        user_id: &UserId,
        inventory: &Inventory,
        expected_revision: u32,
    ) -> Result<u32, PantryRepositoryError> {
        self.compare_and_swap(user_id, expected_revision, |pantry| {
            pantry.inventory = inventory.clone();
        })
    }

    async fn append_saved_dish(
        &self,
        user_id: &UserId,
        dish: &SavedDish,
    ) -> Result<u32, PantryRepositoryError> {
        self.write(user_id, |pantry| {
            pantry.saved_dishes.push(dish.clone());
            Ok(())
        })
    }

    async fn replace_saved_dishes(
        &self,
        user_id: &UserId,
        dishes: &[SavedDish],
        expected_revision: u32,
    ) -> Result<u32, PantryRepositoryError> {
        self.compare_and_swap(user_id, expected_revision, |pantry| {
            pantry.saved_dishes = dishes.to_vec();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordHash;
    use rstest::{fixture, rstest};

    fn account(name: &str, email: &str) -> Account {
        Account {
            id: UserId::random(),
            name: UserName::new(name).expect("valid name"),
            email: EmailAddress::new(email).expect("valid email"),
            password_hash: PasswordHash::new("hash"),
        }
    }

    fn entry(name: &str) -> InventoryEntry {
        InventoryEntry {
            name: name.to_owned(),
            quantity: "1".to_owned(),
            unit: "pieces".to_owned(),
            expiry_date: "2025-06-05".to_owned(),
        }
    }

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_then_find_by_each_key(store: InMemoryStore) {
        let ada = account("ada", "ada@example.com");
        store.insert(&ada).await.expect("insert");

        let by_id = store.find_by_id(&ada.id).await.expect("query");
        let by_email = store.find_by_email(&ada.email).await.expect("query");
        let by_name = store.find_by_name(&ada.name).await.expect("query");

        assert_eq!(by_id.as_ref(), Some(&ada));
        assert_eq!(by_email.as_ref(), Some(&ada));
        assert_eq!(by_name.as_ref(), Some(&ada));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(store: InMemoryStore) {
        store
            .insert(&account("ada", "ada@example.com"))
            .await
            .expect("insert");
        let err = store
            .insert(&account("grace", "ada@example.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, AccountRepositoryError::duplicate("email"));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_name_releases_the_email(store: InMemoryStore) {
        store
            .insert(&account("ada", "ada@example.com"))
            .await
            .expect("insert");
        let err = store
            .insert(&account("ada", "other@example.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, AccountRepositoryError::duplicate("name"));

        store
            .insert(&account("grace", "other@example.com"))
            .await
            .expect("email is free again");
        assert_eq!(store.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn new_accounts_start_with_an_empty_pantry(store: InMemoryStore) {
        let ada = account("ada", "ada@example.com");
        store.insert(&ada).await.expect("insert");
        let pantry = store.load(&ada.id).await.expect("load").expect("present");
        assert_eq!(pantry, PantryDocument::default());
    }

    #[rstest]
    #[tokio::test]
    async fn appends_bump_the_revision(store: InMemoryStore) {
        let ada = account("ada", "ada@example.com");
        store.insert(&ada).await.expect("insert");

        let first = store
            .append_entries(&ada.id, &[entry("milk")])
            .await
            .expect("append");
        let second = store
            .append_entries(&ada.id, &[entry("egg")])
            .await
            .expect("append");

        assert_eq!((first, second), (1, 2));
        let pantry = store.load(&ada.id).await.expect("load").expect("present");
        assert_eq!(pantry.inventory.columns().items, vec!["milk", "egg"]);
    }

    #[rstest]
    #[tokio::test]
    async fn stale_replace_is_rejected(store: InMemoryStore) {
        let ada = account("ada", "ada@example.com");
        store.insert(&ada).await.expect("insert");
        store
            .append_entries(&ada.id, &[entry("milk")])
            .await
            .expect("append");

        let err = store
            .replace_inventory(&ada.id, &Inventory::default(), 0)
            .await
            .expect_err("stale");
        assert_eq!(err, PantryRepositoryError::revision_mismatch(0_u32, 1_u32));

        let revision = store
            .replace_inventory(&ada.id, &Inventory::default(), 1)
            .await
            .expect("fresh");
        assert_eq!(revision, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn writes_for_unknown_users_fail(store: InMemoryStore) {
        let err = store
            .append_entries(&UserId::random(), &[entry("milk")])
            .await
            .expect_err("missing");
        assert!(matches!(err, PantryRepositoryError::MissingUser { .. }));
        assert!(store.load(&UserId::random()).await.expect("load").is_none());
    }
}
