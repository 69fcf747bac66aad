//! Load a JSON dish catalogue into the `dishes` table.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use pantry::outbound::memory::StaticDishCatalogue;
use pantry::outbound::persistence::{
    DbPool, DieselDishCatalogue, PoolConfig, run_pending_migrations,
};
use tokio::runtime::Builder;

/// `seed-dishes` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-dishes",
    about = "Insert or refresh catalogue dishes from a JSON file",
    version
)]
struct CliArgs {
    /// JSON array of `{"name", "ingredients"}` objects.
    #[arg(long = "file", value_name = "path")]
    file: PathBuf,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let catalogue = StaticDishCatalogue::from_path(&args.file).map_err(io::Error::other)?;

    let database_url = resolve_database_url(args.database_url, env::var("DATABASE_URL").ok())?;
    let applied = run_pending_migrations(&database_url)
        .await
        .map_err(|error| io::Error::other(format!("run migrations: {error}")))?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let written = DieselDishCatalogue::new(pool)
        .upsert_all(catalogue.dishes())
        .await
        .map_err(|error| io::Error::other(format!("seed dishes: {error}")))?;

    println!("migrations_applied={applied}");
    println!("dishes_read={}", catalogue.dishes().len());
    println!("dishes_written={written}");
    Ok(())
}

fn resolve_database_url(explicit: Option<String>, from_env: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = from_env.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::{CliArgs, resolve_database_url};

    #[rstest]
    #[case(Some("postgres://cli"), Some("postgres://env"), "postgres://cli")]
    #[case(None, Some("postgres://env"), "postgres://env")]
    fn explicit_url_wins_over_environment(
        #[case] explicit: Option<&str>,
        #[case] from_env: Option<&str>,
        #[case] expected: &str,
    ) {
        let url = resolve_database_url(explicit.map(str::to_owned), from_env.map(str::to_owned))
            .expect("url resolves");
        assert_eq!(url, expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("  "), None)]
    #[case(None, Some(""))]
    fn missing_or_blank_urls_are_rejected(
        #[case] explicit: Option<&str>,
        #[case] from_env: Option<&str>,
    ) {
        let err = resolve_database_url(explicit.map(str::to_owned), from_env.map(str::to_owned))
            .expect_err("url rejected");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[rstest]
    fn file_flag_is_required() {
        assert!(CliArgs::try_parse_from(["seed-dishes"]).is_err());
        let args = CliArgs::try_parse_from(["seed-dishes", "--file", "dishes.json"])
            .expect("args parse");
        assert_eq!(args.file, std::path::PathBuf::from("dishes.json"));
        assert!(args.database_url.is_none());
    }
}
