//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, EmailAddress, PasswordHash, UserId, UserName};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{AccountRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel-backed implementation of the [`AccountRepository`] port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one<F>(&self, filter: F) -> Result<Option<Account>, AccountRepositoryError>
    where
        F: FnOnce(accounts::table) -> accounts::BoxedQuery<'static, diesel::pg::Pg> + Send,
    {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;
        let row: Option<AccountRow> = filter(accounts::table)
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        row.map(row_to_account).transpose()
    }
}

fn map_error(error: diesel::result::Error) -> AccountRepositoryError {
    if let Some(constraint) = unique_violation(&error) {
        let field = if constraint.contains("email") {
            "email"
        } else {
            "name"
        };
        return AccountRepositoryError::duplicate(field);
    }
    map_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let invalid = |field: &str, err: &dyn std::fmt::Display| {
        warn!(account_id = %row.id, field, %err, "stored account failed validation");
        AccountRepositoryError::query(format!("stored account has invalid {field}"))
    };
    let name = UserName::new(&row.name).map_err(|err| invalid("name", &err))?;
    let email = EmailAddress::new(&row.email).map_err(|err| invalid("email", &err))?;
    Ok(Account {
        id: UserId::from_uuid(row.id),
        name,
        email,
        password_hash: PasswordHash::new(row.password_hash),
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        let id = *id.as_uuid();
        self.find_one(move |table| table.filter(accounts::id.eq(id)).into_boxed())
            .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let email = email.as_ref().to_owned();
        self.find_one(move |table| table.filter(accounts::email.eq(email)).into_boxed())
            .await
    }

    async fn find_by_name(
        &self,
        name: &UserName,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let name = name.as_ref().to_owned();
        self.find_one(move |table| table.filter(accounts::name.eq(name)).into_boxed())
            .await
    }

    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;
        let row = NewAccountRow {
            id: *account.id.as_uuid(),
            name: account.name.as_ref(),
            email: account.email.as_ref(),
            password_hash: account.password_hash.as_ref(),
        };
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }
}
