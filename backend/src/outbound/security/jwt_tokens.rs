//! HS256 JWT implementation of [`TokenService`].
//!
//! Expiry is checked against the caller-supplied `now` rather than the
//! system clock so services can drive it from a mockable clock.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenService, TokenServiceError};
use crate::domain::{AccessToken, UserId};

/// Lifetime of issued tokens unless configured otherwise.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::minutes(60);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn convert_jwt_error(err: &jsonwebtoken::errors::Error) -> TokenServiceError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenServiceError::expired(),
        ErrorKind::InvalidSignature => TokenServiceError::invalid("bad signature"),
        _ => TokenServiceError::invalid("malformed token"),
    }
}

impl TokenService for JwtTokenService {
    fn issue(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, TokenServiceError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenServiceError::signing(err.to_string()))?;
        Ok(AccessToken { token, expires_at })
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenServiceError> {
        let claims = decode::<Claims>(token, &self.decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(|err| convert_jwt_error(&err))?;
        if claims.exp <= now.timestamp() {
            return Err(TokenServiceError::expired());
        }
        UserId::new(&claims.sub).map_err(|err| TokenServiceError::invalid(err.to_string()))
    }
}
