//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pantry::inbound::http::health::HealthState;
use pantry::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, create_server};

/// Run migrations, then open and ping the pool.
async fn connect_database(database_url: &str) -> io::Result<DbPool> {
    let applied = run_pending_migrations(database_url)
        .await
        .map_err(|err| io::Error::other(format!("database migrations failed: {err}")))?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| io::Error::other(format!("database pool: {err}")))?;
    pool.ping()
        .await
        .map_err(|err| io::Error::other(format!("database unreachable: {err}")))?;
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_settings()
        .and_then(AppSettings::validate)
        .map_err(io::Error::other)?;
    info!(?settings, "settings loaded");

    let database_url = settings.database_url.clone();
    let mut config = ServerConfig::new(settings);
    if let Some(url) = database_url.as_deref() {
        config = config.with_db_pool(connect_database(url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
