//! Port for issuing and verifying bearer tokens.
//!
//! Both operations take the current instant explicitly so callers decide
//! which clock is authoritative.

use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenServiceError {
        /// Token is malformed, badly signed or names an invalid subject.
        Invalid { message: String } => "invalid token: {message}",
        /// Token lifetime has elapsed.
        Expired => "token expired",
        /// Token could not be produced.
        Signing { message: String } => "token signing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `user_id` valid from `now` for the configured TTL.
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>)
    -> Result<AccessToken, TokenServiceError>;

    /// Verify a token and return the user it was issued to.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenServiceError>;
}
