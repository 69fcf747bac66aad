//! Builders wiring driven adapters into the driving-port services.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use pantry::domain::ports::{
    AccountRepository, DishCatalogue, FixtureDishCatalogue, PantryRepository,
};
use pantry::domain::{AccountService, InventoryService, SavedDishesService, SuggestionService};
use pantry::inbound::http::state::HttpState;
use pantry::outbound::memory::{CatalogueLoadError, InMemoryStore, StaticDishCatalogue};
use pantry::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselDishCatalogue, DieselPantryRepository,
};
use pantry::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::config::{ServerConfig, ServerSettings};

/// Driven adapters the services are built on.
struct Adapters<A: ?Sized, P: ?Sized, C: ?Sized> {
    accounts: Arc<A>,
    pantry: Arc<P>,
    catalogue: Arc<C>,
}

/// Build every service over one set of adapters and collect the ports.
fn build_state<A, P, C>(
    adapters: Adapters<A, P, C>,
    settings: &ServerSettings,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    A: AccountRepository + 'static,
    P: PantryRepository + 'static,
    C: DishCatalogue + ?Sized + 'static,
{
    let Adapters {
        accounts,
        pantry,
        catalogue,
    } = adapters;

    let tokens = JwtTokenService::new(settings.jwt_secret.as_bytes()).with_ttl(settings.token_ttl);
    let account_service = Arc::new(AccountService::new(
        accounts,
        Arc::new(BcryptPasswordHasher::default()),
        Arc::new(tokens),
        clock.clone(),
    ));
    let inventory_service = Arc::new(
        InventoryService::new(pantry.clone(), clock.clone())
            .with_expiring_soon_days(settings.expiring_soon_days),
    );
    let suggestion_service = SuggestionService::new(pantry.clone(), catalogue, clock.clone())
        .with_policy(settings.suggestion_policy)
        .with_window_days(settings.suggestion_window_days);

    HttpState {
        accounts: account_service.clone(),
        sessions: account_service,
        inventory: inventory_service.clone(),
        inventory_query: inventory_service,
        suggestions: Arc::new(suggestion_service),
        saved_dishes: Arc::new(SavedDishesService::new(pantry, clock)),
    }
}

fn in_memory_catalogue(
    settings: &ServerSettings,
) -> Result<Arc<dyn DishCatalogue>, CatalogueLoadError> {
    match &settings.dish_seed_path {
        Some(path) => {
            let catalogue = StaticDishCatalogue::from_path(path)?;
            info!(
                path = %path.display(),
                dishes = catalogue.dishes().len(),
                "loaded dish catalogue"
            );
            Ok(Arc::new(catalogue))
        }
        None => {
            warn!("no dish catalogue configured; suggestions will be empty");
            Ok(Arc::new(FixtureDishCatalogue))
        }
    }
}

fn database_adapters(
    pool: &DbPool,
) -> Adapters<DieselAccountRepository, DieselPantryRepository, DieselDishCatalogue> {
    Adapters {
        accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
        pantry: Arc::new(DieselPantryRepository::new(pool.clone())),
        catalogue: Arc::new(DieselDishCatalogue::new(pool.clone())),
    }
}

fn memory_adapters(
    settings: &ServerSettings,
) -> Result<Adapters<InMemoryStore, InMemoryStore, dyn DishCatalogue>, CatalogueLoadError> {
    let store = Arc::new(InMemoryStore::new());
    Ok(Adapters {
        accounts: store.clone(),
        pantry: store,
        catalogue: in_memory_catalogue(settings)?,
    })
}

/// Build the shared HTTP state, preferring database adapters when a pool is
/// configured.
///
/// # Errors
/// Fails when the configured dish seed file cannot be read or parsed.
pub(super) fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, CatalogueLoadError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL adapters");
            build_state(database_adapters(pool), &config.settings, clock)
        }
        None => {
            warn!("no database configured; data lives in memory only");
            build_state(memory_adapters(&config.settings)?, &config.settings, clock)
        }
    };
    Ok(web::Data::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pantry::domain::ports::SuggestionOutcome;
    use pantry::domain::{NewItems, Registration, SuggestionPolicy};
    use rstest::{fixture, rstest};
    use std::io::Write;
    use zeroize::Zeroizing;

    #[fixture]
    fn settings() -> ServerSettings {
        ServerSettings {
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            database_url: None,
            jwt_secret: Zeroizing::new("0123456789abcdef0123456789abcdef".to_owned()),
            token_ttl: Duration::minutes(60),
            suggestion_policy: SuggestionPolicy::default(),
            suggestion_window_days: 20,
            expiring_soon_days: 4,
            dish_seed_path: None,
        }
    }

    #[rstest]
    fn missing_seed_file_is_an_error(mut settings: ServerSettings) {
        settings.dish_seed_path = Some("/nonexistent/dishes.json".into());
        let config = ServerConfig::new(settings);
        assert!(build_http_state(&config).is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_state_serves_seeded_suggestions(mut settings: ServerSettings) {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"name": "Omelette", "ingredients": ["egg", "milk"]}}]"#
        )
        .expect("write catalogue");
        settings.dish_seed_path = Some(file.path().to_path_buf());
        let state = build_http_state(&ServerConfig::new(settings)).expect("state");

        let profile = state
            .accounts
            .register(
                Registration::try_from_parts("ada", "ada@example.com", "long enough")
                    .expect("registration"),
            )
            .await
            .expect("register");
        let today = chrono::Utc::now().date_naive().to_string();
        state
            .inventory
            .add_items(
                &profile.id,
                NewItems::try_new(vec!["egg".into()], vec![today], vec!["2".into()], None)
                    .expect("batch"),
            )
            .await
            .expect("add");

        let outcome = state
            .suggestions
            .suggest_for_user(&profile.id)
            .await
            .expect("suggest");
        let dishes = match outcome {
            SuggestionOutcome::Dishes(dishes) => dishes,
            other => panic!("expected dishes, got {other:?}"),
        };
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].suggested_due_to, vec!["egg".to_owned()]);
    }
}
