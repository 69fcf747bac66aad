//! Port for account persistence.
//!
//! Adapters store one account per user, keyed by id, with unique name and
//! email. Creating an account also creates the user's empty pantry document.

use async_trait::async_trait;

use crate::domain::{Account, EmailAddress, UserId, UserName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// A unique field already belongs to another account.
        Duplicate { field: String } => "an account with this {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch an account by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by its (lower-cased) email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by name.
    async fn find_by_name(&self, name: &UserName)
    -> Result<Option<Account>, AccountRepositoryError>;

    /// Insert a new account with an empty pantry.
    ///
    /// Fails with [`AccountRepositoryError::Duplicate`] when the name or email
    /// is taken.
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError>;
}
