//! Account domain services.
//!
//! Implements sign-up, login and bearer-token resolution over the account
//! repository, password hasher and token ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, AccountQuery, AccountRepository, AccountRepositoryError, LoginResponse,
    PasswordHasher, PasswordHasherError, TokenService, TokenServiceError,
};
use crate::domain::{Account, Error, LoginCredentials, Registration, UserId, UserProfile};

const INVALID_LOGIN: &str = "invalid email or password";

fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::Duplicate { field } => duplicate_account(&field),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    match error {
        PasswordHasherError::Hashing { message } => {
            Error::internal(format!("password hashing failed: {message}"))
        }
    }
}

fn map_token_error(error: TokenServiceError) -> Error {
    match error {
        TokenServiceError::Invalid { message } => {
            debug!(%message, "rejected bearer token");
            Error::unauthorized("invalid token")
        }
        TokenServiceError::Expired => Error::unauthorized("token expired"),
        TokenServiceError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
    }
}

fn duplicate_account(field: &str) -> Error {
    Error::conflict(format!("an account with this {field} already exists")).with_details(json!({
        "field": field,
        "code": "duplicate_account",
    }))
}

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<A, H, T> {
    accounts: Arc<A>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<A, H, T> AccountService<A, H, T> {
    /// Create a new service from its collaborators.
    pub fn new(accounts: Arc<A>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
            clock,
        }
    }
}

#[async_trait]
impl<A, H, T> AccountCommand for AccountService<A, H, T>
where
    A: AccountRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn register(&self, registration: Registration) -> Result<UserProfile, Error> {
        if self
            .accounts
            .find_by_email(registration.email())
            .await
            .map_err(map_account_error)?
            .is_some()
        {
            return Err(duplicate_account("email"));
        }
        if self
            .accounts
            .find_by_name(registration.name())
            .await
            .map_err(map_account_error)?
            .is_some()
        {
            return Err(duplicate_account("name"));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let account = Account {
            id: UserId::random(),
            name: registration.name().clone(),
            email: registration.email().clone(),
            password_hash,
        };
        self.accounts
            .insert(&account)
            .await
            .map_err(map_account_error)?;

        info!(user_id = %account.id, "account registered");
        Ok(account.profile())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, Error> {
        let Some(account) = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_account_error)?
        else {
            return Err(Error::unauthorized(INVALID_LOGIN));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(user_id = %account.id, "password mismatch");
            return Err(Error::unauthorized(INVALID_LOGIN));
        }

        let access_token = self
            .tokens
            .issue(&account.id, self.clock.utc())
            .map_err(map_token_error)?;
        Ok(LoginResponse {
            access_token,
            user: account.profile(),
        })
    }
}

#[async_trait]
impl<A, H, T> AccountQuery for AccountService<A, H, T>
where
    A: AccountRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn authenticate(&self, token: &str) -> Result<UserId, Error> {
        self.tokens
            .verify(token, self.clock.utc())
            .map_err(map_token_error)
    }

    async fn profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.accounts
            .find_by_id(user_id)
            .await
            .map_err(map_account_error)?
            .map(|account| account.profile())
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
