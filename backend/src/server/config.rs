//! Server settings loaded via OrthoConfig and the validated server config.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use ortho_config::OrthoConfig;
use pantry::domain::{
    DEFAULT_SUGGESTION_CAP, EXPIRING_SOON_DAYS, SUGGESTION_WINDOW_DAYS, SuggestionPolicy,
};
use pantry::outbound::persistence::DbPool;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_MINUTES: u32 = 60;

/// Shortest accepted token signing secret, in bytes.
pub const JWT_SECRET_MIN_BYTES: usize = 32;

/// Raw settings as read from `PANTRY_*` environment variables, CLI flags or a
/// configuration file.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PANTRY")]
pub struct AppSettings {
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. In-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    pub token_ttl_minutes: Option<u32>,
    /// Maximum dishes suggested per expiring item.
    pub suggestion_cap: Option<usize>,
    /// Merge repeated dishes into one suggestion.
    #[ortho_config(default = false)]
    pub suggestion_dedupe: bool,
    pub suggestion_window_days: Option<u32>,
    pub expiring_soon_days: Option<u32>,
    /// JSON dish catalogue for the in-memory adapters.
    pub dish_seed_path: Option<PathBuf>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "jwt_secret",
                &self.jwt_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("suggestion_cap", &self.suggestion_cap)
            .field("suggestion_dedupe", &self.suggestion_dedupe)
            .field("suggestion_window_days", &self.suggestion_window_days)
            .field("expiring_soon_days", &self.expiring_soon_days)
            .field("dish_seed_path", &self.dish_seed_path)
            .finish()
    }
}

/// Reasons settings fail validation.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(String),
    #[error("PANTRY_JWT_SECRET must be set")]
    MissingJwtSecret,
    #[error("PANTRY_JWT_SECRET must be at least {min} bytes, got {actual}")]
    JwtSecretTooShort { min: usize, actual: usize },
    #[error("invalid bind address {value}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Validated settings the server is built from.
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub jwt_secret: Zeroizing<String>,
    pub token_ttl: Duration,
    pub suggestion_policy: SuggestionPolicy,
    pub suggestion_window_days: u32,
    pub expiring_soon_days: u32,
    pub dish_seed_path: Option<PathBuf>,
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database", &self.database_url.is_some())
            .field("token_ttl", &self.token_ttl)
            .field("suggestion_policy", &self.suggestion_policy)
            .field("suggestion_window_days", &self.suggestion_window_days)
            .field("expiring_soon_days", &self.expiring_soon_days)
            .field("dish_seed_path", &self.dish_seed_path)
            .finish_non_exhaustive()
    }
}

fn non_zero<T: PartialEq + From<u8>>(value: T, field: &'static str) -> Result<T, SettingsError> {
    if value == T::from(0) {
        Err(SettingsError::Zero { field })
    } else {
        Ok(value)
    }
}

impl AppSettings {
    /// Load settings from the process environment and command line.
    pub fn load_settings() -> Result<Self, SettingsError> {
        Self::load().map_err(|err| SettingsError::Load(err.to_string()))
    }

    /// Apply defaults and reject unusable values.
    pub fn validate(self) -> Result<ServerSettings, SettingsError> {
        let raw_addr = self
            .bind_addr
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_addr
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let secret = Zeroizing::new(self.jwt_secret.ok_or(SettingsError::MissingJwtSecret)?);
        if secret.len() < JWT_SECRET_MIN_BYTES {
            return Err(SettingsError::JwtSecretTooShort {
                min: JWT_SECRET_MIN_BYTES,
                actual: secret.len(),
            });
        }

        let ttl_minutes = non_zero(
            self.token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES),
            "PANTRY_TOKEN_TTL_MINUTES",
        )?;
        let per_item_cap = non_zero(
            self.suggestion_cap.unwrap_or(DEFAULT_SUGGESTION_CAP),
            "PANTRY_SUGGESTION_CAP",
        )?;

        Ok(ServerSettings {
            bind_addr,
            database_url: self.database_url.filter(|url| !url.trim().is_empty()),
            jwt_secret: secret,
            token_ttl: Duration::minutes(i64::from(ttl_minutes)),
            suggestion_policy: SuggestionPolicy {
                per_item_cap,
                dedupe: self.suggestion_dedupe,
            },
            suggestion_window_days: self
                .suggestion_window_days
                .unwrap_or(SUGGESTION_WINDOW_DAYS),
            expiring_soon_days: self.expiring_soon_days.unwrap_or(EXPIRING_SOON_DAYS),
            dish_seed_path: self.dish_seed_path,
        })
    }
}

/// Everything [`super::create_server`] needs.
pub struct ServerConfig {
    pub(crate) settings: ServerSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(settings: ServerSettings) -> Self {
        Self {
            settings,
            db_pool: None,
        }
    }

    /// Attach a database pool; persistence adapters replace the in-memory
    /// store when present.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
