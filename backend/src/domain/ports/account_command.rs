//! Driving ports for account sign-up, login and token resolution.
//!
//! Inbound adapters call these ports without importing the hashing or token
//! infrastructure, which keeps handler tests free of crypto setup.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AccessToken, Error, LoginCredentials, Registration, UserId, UserProfile};

/// Successful login: a bearer token and the account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: AccessToken,
    pub user: UserProfile,
}

/// Account mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account with an empty pantry.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the name or email is taken.
    async fn register(&self, registration: Registration) -> Result<UserProfile, Error>;

    /// Check credentials and issue a bearer token.
    ///
    /// Unknown emails and wrong passwords fail identically.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, Error>;
}

/// Account lookups keyed by a bearer token or user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Resolve a raw bearer token to its user.
    async fn authenticate(&self, token: &str) -> Result<UserId, Error>;

    /// Public profile of an existing account.
    async fn profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;
}
