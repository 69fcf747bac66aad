//! bcrypt-backed [`PasswordHasher`].

use async_trait::async_trait;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, TraceId};

/// Hashes passwords with bcrypt on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher using `cost` rounds; see [`bcrypt::DEFAULT_COST`].
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn hashing_error(err: impl std::fmt::Display) -> PasswordHasherError {
    PasswordHasherError::hashing(err.to_string())
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        TraceId::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(hashing_error)?
            .map(PasswordHash::new)
            .map_err(hashing_error)
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_ref().to_owned();
        TraceId::spawn_blocking(move || bcrypt::verify(password.as_str(), &encoded))
            .await
            .map_err(hashing_error)?
            .map_err(hashing_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn verifies_its_own_hashes() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("correct horse").await.expect("hash");
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("wrong horse", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let hasher = BcryptPasswordHasher::new(4);
        let err = hasher
            .verify("pw", &PasswordHash::new("not-bcrypt"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHasherError::Hashing { .. }));
    }
}
